//! Document model for the library record
//!
//! The record is kept as an untyped [`serde_json::Value`] tree: fields are
//! accessed ad hoc and request bodies are stored exactly as received.

pub mod borrow;
pub mod document;
pub mod value;
