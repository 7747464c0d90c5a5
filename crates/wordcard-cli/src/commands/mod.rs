pub mod cards;
pub mod cloze;
pub mod fetch;
pub mod import;
pub mod init;
pub mod quiz;
pub mod report;
pub mod reset;
pub mod search;
pub mod study;
pub mod validate;
