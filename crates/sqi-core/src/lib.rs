//! sqi-core — Student Quality Index scoring, aggregation and ranking.
//!
//! This crate turns a student's exam attempts into normalised topic and
//! concept indices plus a ranked list of concepts for a downstream summary
//! agent. Everything is a pure function of the input apart from the
//! timestamp, which comes from an injectable [`traits::Clock`].

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod ranker;
pub mod report;
pub mod scorer;
pub mod traits;
pub mod weights;

pub use engine::SqiEngine;
pub use error::SqiError;
pub use model::{Attempt, SqiInput};
pub use report::SqiResult;
