use std::sync::Arc;

use super::model::{EncodedInput, QuestionAnsweringModel};
use super::span::{select_span, span_confidence};
use crate::error::{PipelineError, Result};
use crate::pipelines::stats::PipelineStats;
use tokenizers::Tokenizer;

// ============ Output types ============

/// An extracted answer with confidence score.
///
/// `text` is empty (and `score` is `0.0`) when the model found no answer
/// span in the context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Answer {
    /// The answer substring extracted from the context.
    pub text: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

impl Answer {
    /// Whether the model found no answer span in the context.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Single-pair output from `run()`.
#[derive(Debug)]
pub struct Output {
    /// The extracted answer.
    pub answer: Answer,
    /// Execution statistics.
    pub stats: PipelineStats,
}

/// Single result in batch output.
#[derive(Debug)]
pub struct BatchResult {
    /// Input question.
    pub question: String,
    /// Answer or error for this input.
    pub answer: Result<Answer>,
}

/// Batch output from `run()`.
#[derive(Debug)]
pub struct BatchOutput {
    /// Results for each input pair.
    pub results: Vec<BatchResult>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

// ============ Input trait for type-based dispatch ============

#[doc(hidden)]
pub trait QaInput<'a> {
    /// Output type for `.run()`.
    type Output;

    #[doc(hidden)]
    fn into_pairs(self) -> Vec<(&'a str, &'a str)>;
    #[doc(hidden)]
    fn convert_output(
        pairs: Vec<(&'a str, &'a str)>,
        answers: Vec<Result<Answer>>,
        stats: PipelineStats,
    ) -> Result<Self::Output>;
}

impl<'a> QaInput<'a> for (&'a str, &'a str) {
    type Output = Output;

    fn into_pairs(self) -> Vec<(&'a str, &'a str)> {
        vec![self]
    }

    fn convert_output(
        _pairs: Vec<(&'a str, &'a str)>,
        mut answers: Vec<Result<Answer>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        let answer = answers
            .pop()
            .ok_or_else(|| PipelineError::Unexpected("No answers returned".into()))??;
        Ok(Output { answer, stats })
    }
}

impl<'a> QaInput<'a> for &'a [(&'a str, &'a str)] {
    type Output = BatchOutput;

    fn into_pairs(self) -> Vec<(&'a str, &'a str)> {
        self.to_vec()
    }

    fn convert_output(
        pairs: Vec<(&'a str, &'a str)>,
        answers: Vec<Result<Answer>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        let results = pairs
            .into_iter()
            .zip(answers)
            .map(|((question, _context), answer)| BatchResult {
                question: question.to_string(),
                answer,
            })
            .collect();
        Ok(BatchOutput { results, stats })
    }
}

impl<'a, const N: usize> QaInput<'a> for &'a [(&'a str, &'a str); N] {
    type Output = BatchOutput;

    fn into_pairs(self) -> Vec<(&'a str, &'a str)> {
        self.as_slice().to_vec()
    }

    fn convert_output(
        pairs: Vec<(&'a str, &'a str)>,
        answers: Vec<Result<Answer>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        let results = pairs
            .into_iter()
            .zip(answers)
            .map(|((question, _context), answer)| BatchResult {
                question: question.to_string(),
                answer,
            })
            .collect();
        Ok(BatchOutput { results, stats })
    }
}

// ============ Pipeline ============

/// Extracts the answer to a question from a supporting passage.
///
/// Construct with
/// [`QuestionAnsweringPipelineBuilder`](super::QuestionAnsweringPipelineBuilder).
///
/// # Examples
///
/// ```rust,no_run
/// # use candle_qa::question_answering::{QuestionAnsweringPipelineBuilder, BertSize};
/// # fn main() -> candle_qa::error::Result<()> {
/// let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base).build()?;
///
/// // Single (question, context) pair - direct access
/// let output = pipeline.run(("What color is the sky?", "The sky is blue today."))?;
/// println!("{} ({:.2})", output.answer.text, output.answer.score);
///
/// // Batch - results include the question
/// let output = pipeline.run(&[
///     ("Who wrote it?", "The book was written by Ada."),
///     ("Where is it?", "The shop is in Reykjavik."),
/// ])?;
/// for r in output.results {
///     println!("{} → {}", r.question, r.answer?.text);
/// }
/// # Ok(())
/// # }
/// ```
pub struct QuestionAnsweringPipeline<M: QuestionAnsweringModel> {
    pub(crate) model: Arc<M>,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: QuestionAnsweringModel> QuestionAnsweringPipeline<M> {
    /// Extract the answer span for one or more (question, context) pairs.
    ///
    /// Single pair → [`Output`], batch → [`BatchOutput`].
    ///
    /// An unanswerable question yields an empty [`Answer`], not an error.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use candle_qa::question_answering::{QuestionAnsweringPipelineBuilder, BertSize};
    /// # fn main() -> candle_qa::error::Result<()> {
    /// # let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base).build()?;
    /// // Single
    /// let output = pipeline.run(("Who discovered it?", "Marie Curie discovered radium."))?;
    /// println!("{}", output.answer.text);
    ///
    /// // Batch
    /// let output = pipeline.run(&[
    ///     ("What is it made of?", "The bridge is made of steel."),
    ///     ("When was it built?", "Construction finished in 1932."),
    /// ])?;
    /// for r in output.results {
    ///     println!("{} → {}", r.question, r.answer?.text);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn run<'a, I: QaInput<'a>>(&self, input: I) -> Result<I::Output> {
        let stats_builder = PipelineStats::start();
        let pairs = input.into_pairs();
        let item_count = pairs.len();

        // One forward pass per pair; no batching across requests.
        let answers: Vec<Result<Answer>> = pairs
            .iter()
            .map(|&(question, context)| self.answer_one(question, context))
            .collect();

        I::convert_output(pairs, answers, stats_builder.finish(item_count))
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }

    fn answer_one(&self, question: &str, context: &str) -> Result<Answer> {
        let encoded = self.encode(question, context)?;
        let scores = self.model.predict_scores(&encoded)?;

        if scores.start.len() != encoded.len() || scores.end.len() != encoded.len() {
            return Err(PipelineError::Inference(format!(
                "Score length mismatch: input has {} tokens, model returned {} start / {} end scores",
                encoded.len(),
                scores.start.len(),
                scores.end.len()
            )));
        }

        let span = select_span(&scores.start, &scores.end).ok_or_else(|| {
            PipelineError::Inference("Model returned empty score vectors".to_string())
        })?;

        // An inverted span means the model found no answer in the context.
        let token_ids = if span.is_empty() {
            &[][..]
        } else {
            &encoded.input_ids[span.start..=span.end]
        };

        let text = self.decode(token_ids)?;
        let score = if token_ids.is_empty() {
            0.0
        } else {
            span_confidence(&scores.start, &scores.end, &span)
        };

        Ok(Answer { text, score })
    }

    fn encode(&self, question: &str, context: &str) -> Result<EncodedInput> {
        if question.is_empty() {
            return Err(PipelineError::Tokenization(
                "Question must be a non-empty string".to_string(),
            ));
        }
        if context.is_empty() {
            return Err(PipelineError::Tokenization(
                "Context must be a non-empty string".to_string(),
            ));
        }

        let encoding = self.tokenizer.encode((question, context), true).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Tokenization failed on '{}': {}",
                &question.chars().take(50).collect::<String>(),
                e
            ))
        })?;

        Ok(EncodedInput {
            input_ids: encoding.get_ids().to_vec(),
            attention_mask: encoding.get_attention_mask().to_vec(),
            type_ids: encoding.get_type_ids().to_vec(),
        })
    }

    fn decode(&self, token_ids: &[u32]) -> Result<String> {
        if token_ids.is_empty() {
            return Ok(String::new());
        }

        let text = self
            .tokenizer
            .decode(token_ids, true)
            .map_err(|e| PipelineError::Tokenization(format!("Failed to decode answer span: {e}")))?;

        Ok(text.trim().to_string())
    }
}
