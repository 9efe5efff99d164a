use super::model::QuestionAnsweringModel;
use super::pipeline::QuestionAnsweringPipeline;
use crate::error::Result;
use crate::pipelines::cache::ModelOptions;
use crate::pipelines::utils::{BasePipelineBuilder, DeviceRequest, StandardPipelineBuilder};
use std::sync::Arc;

/// Builder for creating [`QuestionAnsweringPipeline`] instances.
///
/// Use [`Self::bert`] as the entry point.
///
/// # Examples
///
/// ```rust,no_run
/// # use candle_qa::question_answering::{QuestionAnsweringPipelineBuilder, BertSize};
/// # fn main() -> candle_qa::error::Result<()> {
/// let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base)
///     .cuda(0)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct QuestionAnsweringPipelineBuilder<M: QuestionAnsweringModel>(
    StandardPipelineBuilder<M::Options>,
);

impl<M: QuestionAnsweringModel> QuestionAnsweringPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self(StandardPipelineBuilder::new(options))
    }

    /// Use CPU for inference (default).
    pub fn cpu(mut self) -> Self {
        self.0.device_request = DeviceRequest::Cpu;
        self
    }

    /// Use a specific CUDA GPU for inference.
    ///
    /// Requires the `cuda` feature to be enabled.
    pub fn cuda(mut self, index: usize) -> Self {
        self.0.device_request = DeviceRequest::Cuda(index);
        self
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if model loading or device initialization fails.
    pub fn build(self) -> Result<QuestionAnsweringPipeline<M>>
    where
        M: Send + Sync + 'static,
        M::Options: ModelOptions + Clone,
    {
        BasePipelineBuilder::build(self)
    }
}

impl<M: QuestionAnsweringModel> BasePipelineBuilder<M> for QuestionAnsweringPipelineBuilder<M>
where
    M: Send + Sync + 'static,
    M::Options: ModelOptions + Clone,
{
    type Pipeline = QuestionAnsweringPipeline<M>;
    type Options = M::Options;

    fn options(&self) -> &Self::Options {
        &self.0.options
    }

    fn device_request(&self) -> &DeviceRequest {
        &self.0.device_request
    }

    fn create_model(options: Self::Options, device: candle_core::Device) -> Result<M> {
        M::new(options, device)
    }

    fn get_tokenizer(options: Self::Options) -> Result<tokenizers::Tokenizer> {
        M::get_tokenizer(options)
    }

    fn construct_pipeline(
        model: Arc<M>,
        tokenizer: tokenizers::Tokenizer,
    ) -> Result<Self::Pipeline> {
        Ok(QuestionAnsweringPipeline { model, tokenizer })
    }
}

impl QuestionAnsweringPipelineBuilder<super::QuestionAnsweringBert> {
    /// Creates a builder for a BERT model finetuned on SQuAD2.
    pub fn bert(size: crate::models::BertSize) -> Self {
        Self::new(size)
    }
}
