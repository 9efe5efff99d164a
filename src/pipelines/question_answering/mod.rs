//! Extractive question answering pipeline.
//!
//! Given a question and a supporting passage, extract the substring of the
//! passage most likely to answer the question. Returns the answer text and a
//! confidence score; an unanswerable question yields an empty answer rather
//! than an error.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use candle_qa::question_answering::{QuestionAnsweringPipelineBuilder, BertSize};
//!
//! # fn main() -> candle_qa::error::Result<()> {
//! let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base).build()?;
//!
//! let output = pipeline.run((
//!     "What color is the sky?",
//!     "The sky is blue today.",
//! ))?;
//! println!("answer: {} (confidence: {:.2})", output.answer.text, output.answer.score);
//! # Ok(())
//! # }
//! ```
//!
//! # Batch Inference
//!
//! Answer multiple (question, context) pairs at once (returns `BatchOutput`);
//! each pair still gets its own forward pass:
//!
//! ```rust,no_run
//! # use candle_qa::question_answering::{QuestionAnsweringPipelineBuilder, BertSize};
//! # fn main() -> candle_qa::error::Result<()> {
//! # let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base).build()?;
//! let pairs = &[
//!     ("Who painted it?", "The ceiling was painted by Michelangelo."),
//!     ("When did it open?", "The museum opened its doors in 1793."),
//! ];
//!
//! let output = pipeline.run(pairs)?;
//!
//! for r in output.results {
//!     println!("{}: {}", r.question, r.answer?.text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Supported Models
//!
//! | Model | Sizes | Builder Method |
//! |-------|-------|----------------|
//! | BERT (SQuAD2) | `Base`, `Large` | [`QuestionAnsweringPipelineBuilder::bert`] |

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;
pub(crate) mod span;

// ============ Public API ============

pub use crate::models::BertSize;
pub use crate::pipelines::stats::PipelineStats;
pub use builder::QuestionAnsweringPipelineBuilder;
pub use pipeline::{Answer, BatchOutput, BatchResult, Output, QuestionAnsweringPipeline};

#[doc(hidden)]
pub use pipeline::QaInput;

/// Only for generic annotations. Use [`QuestionAnsweringPipelineBuilder::bert`].
pub type QuestionAnsweringBert = crate::models::bert::BertQaModel;
