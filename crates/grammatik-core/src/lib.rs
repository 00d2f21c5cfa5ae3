//! grammatik-core — Exercise validation, answer matching and practice sessions.
//!
//! Raw exercise records flow through the schema validator and the corpus
//! integrity checker into an immutable [`corpus::ValidatedCorpus`]. Practice
//! sessions borrow that corpus, serve exercises and grade answers with the
//! exact-match [`matcher`].

pub mod config;
pub mod corpus;
pub mod error;
pub mod integrity;
pub mod matcher;
pub mod model;
pub mod report;
pub mod schema;
pub mod session;
pub mod source;
pub mod statistics;
pub mod traits;
