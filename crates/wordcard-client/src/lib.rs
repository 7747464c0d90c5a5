//! wordcard-client — HTTP client for the word-set API.
//!
//! Every response arrives in a `{type, payload}` envelope. The client
//! unwraps it, checks the payload against its schema and reports anything
//! else as an `ApiFailure` with a user-facing message.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod mock;
pub mod requests;
pub mod schema;
pub mod source;

pub use client::{ApiClient, ClientError, PostBody};
pub use config::{create_client, load_config, load_config_from, WordcardConfig};
pub use schema::Schema;
pub use source::{fetch_decks, DeckSource};
