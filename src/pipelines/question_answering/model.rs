use crate::error::Result;
use tokenizers::Tokenizer;

/// A tokenized (question, context) pair, ready for the model.
///
/// All three sequences have the same length; position `i` is attended to iff
/// `attention_mask[i] == 1`. `type_ids` marks question (0) vs context (1)
/// segments for models that use them.
#[derive(Debug, Clone)]
pub struct EncodedInput {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub type_ids: Vec<u32>,
}

impl EncodedInput {
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }
}

/// Per-position start/end scores from one forward pass.
///
/// Each vector has one score per input position.
#[derive(Debug, Clone)]
pub struct SpanScores {
    pub start: Vec<f32>,
    pub end: Vec<f32>,
}

pub trait QuestionAnsweringModel {
    type Options: std::fmt::Debug + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Run exactly one inference-mode forward pass on a batch of size 1 and
    /// return the raw start/end score vectors. No retries.
    fn predict_scores(&self, encoded: &EncodedInput) -> Result<SpanScores>;

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}
