use candle_core::{Device, IndexOp, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use hf_hub::{api::sync::Api, Repo, RepoType};
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams, TruncationStrategy};

use crate::error::{PipelineError, Result};
use crate::pipelines::question_answering::model::{EncodedInput, SpanScores};

// BERT position embeddings cap the joint question+context encoding.
const MAX_INPUT_TOKENS: usize = 512;

/// Available BERT SQuAD2 model sizes.
#[derive(Debug, Clone, Copy)]
pub enum BertSize {
    /// Base model (~110M parameters).
    Base,
    /// Large model (~340M parameters).
    Large,
}

impl std::fmt::Display for BertSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BertSize::Base => "bert-squad-base",
            BertSize::Large => "bert-squad-large",
        };
        write!(f, "{name}")
    }
}

impl crate::pipelines::cache::ModelOptions for BertSize {
    fn cache_key(&self) -> String {
        self.to_string()
    }
}

/// BERT encoder plus the SQuAD-finetuned span-prediction head.
pub struct BertQaModel {
    model: BertModel,
    qa_outputs: Linear,
    device: Device,
    span: tracing::Span,
}

impl BertQaModel {
    pub fn new(size: BertSize, device: Device) -> Result<Self> {
        let model_id = match size {
            BertSize::Base => "deepset/bert-base-cased-squad2",
            BertSize::Large => "deepset/bert-large-uncased-whole-word-masking-squad2",
        };

        let (config, head, vb) = load_qa_weights(model_id, &device)?;
        let model = BertModel::load(vb.pp("bert"), &config)
            .map_err(|e| PipelineError::Unexpected(format!("Failed to load BERT weights: {e}")))?;
        let qa_outputs = candle_nn::linear(head.hidden_size, 2, vb.pp("qa_outputs"))
            .map_err(|e| PipelineError::Unexpected(format!("Failed to load QA head: {e}")))?;

        let span = tracing::span!(tracing::Level::TRACE, "bert-qa-forward");

        Ok(Self {
            model,
            qa_outputs,
            device,
            span,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// One forward pass on a batch of size 1. The last projection yields two
    /// logits per position; column 0 scores span starts, column 1 span ends.
    pub fn predict_scores(&self, encoded: &EncodedInput) -> Result<SpanScores> {
        let _enter = self.span.enter();

        let input_ids = Tensor::new(encoded.input_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoded.type_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoded.attention_mask.as_slice(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .model
            .forward(&input_ids, &type_ids, Some(&attention_mask))?;
        let logits = self.qa_outputs.forward(&hidden)?;

        let start = logits.i((0, .., 0))?.to_vec1::<f32>()?;
        let end = logits.i((0, .., 1))?.to_vec1::<f32>()?;

        Ok(SpanScores { start, end })
    }

    pub fn get_tokenizer(size: BertSize) -> Result<Tokenizer> {
        let repo_id = match size {
            BertSize::Base => "deepset/bert-base-cased-squad2",
            BertSize::Large => "deepset/bert-large-uncased-whole-word-masking-squad2",
        };
        load_tokenizer(repo_id)
    }
}

impl crate::pipelines::question_answering::model::QuestionAnsweringModel for BertQaModel {
    type Options = BertSize;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        BertQaModel::new(options, device)
    }

    fn predict_scores(&self, encoded: &EncodedInput) -> Result<SpanScores> {
        self.predict_scores(encoded)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        Self::get_tokenizer(options)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

fn load_tokenizer(repo_id: &str) -> Result<Tokenizer> {
    let api = Api::new()?;
    let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));
    let tokenizer_path = repo.get("tokenizer.json")?;
    let path_str = tokenizer_path.display().to_string();

    let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
        PipelineError::Tokenization(format!(
            "Failed to load tokenizer from '{}': {}",
            path_str, e
        ))
    })?;

    // Truncate the context, never the question, at the position limit.
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: MAX_INPUT_TOKENS,
            strategy: TruncationStrategy::OnlySecond,
            ..Default::default()
        }))
        .map_err(|e| {
            PipelineError::Tokenization(format!("Failed to configure truncation: {e}"))
        })?;

    Ok(tokenizer)
}

#[derive(Deserialize)]
struct QaHeadConfig {
    hidden_size: usize,
}

fn load_qa_weights(
    repo_id: &str,
    device: &Device,
) -> Result<(Config, QaHeadConfig, VarBuilder<'static>)> {
    let api = Api::new()?;
    let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));

    let config_path = repo.get("config.json")?;
    let weights_path = repo
        .get("model.safetensors")
        .or_else(|_| repo.get("pytorch_model.bin"))?;

    let config_str = std::fs::read_to_string(&config_path)?;
    let config: Config = serde_json::from_str(&config_str)?;
    let head: QaHeadConfig = serde_json::from_str(&config_str)?;

    tracing::info!(
        "loading {repo_id} weights from {}",
        weights_path.display()
    );

    let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
        unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, device)? }
    } else {
        VarBuilder::from_pth(&weights_path, DTYPE, device)?
    };

    Ok((config, head, vb))
}
