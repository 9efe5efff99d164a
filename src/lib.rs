//! Simple, intuitive extractive question answering for Rust.
//!
//! Powered by [Candle](https://github.com/huggingface/candle), with an API inspired by Python's [Transformers](https://huggingface.co/docs/transformers).
//! Given a question and a supporting passage, the pipeline returns the span
//! of the passage most likely to answer it.

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod error;

pub use pipelines::question_answering;
