//! wordcard-core — Study engine, data model, and persistence.
//!
//! This crate defines the word-set data model, the question generators,
//! the study session state machine shared by multiple choice and cloze,
//! flashcard navigation, bulk import, form validation and progress storage
//! that the rest of wordcard builds on.

pub mod cloze;
pub mod error;
pub mod flashcard;
pub mod grade;
pub mod import;
pub mod model;
pub mod multichoice;
pub mod progress;
pub mod report;
pub mod sampling;
pub mod session;
pub mod store;
pub mod traits;
pub mod validation;
