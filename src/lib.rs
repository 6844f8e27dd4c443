//! Nyaya - statute retrieval for an Indian-law legal assistant
//!
//! Given a plain-language question, Nyaya works out which law and section it
//! refers to and what it is asking, scores every section of the six criminal
//! codes (three current, three they replaced) against it, and hands the best
//! ones to a text generator as grounding context.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod query;
pub mod retrieval;

pub use error::{NyayaError, Result};
