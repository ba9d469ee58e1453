//! Model loading and batch inference for the GoEmotions classifier

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{
    Config as RobertaConfig, XLMRobertaForSequenceClassification,
};
use crowdpulse_core::{EmotionScores, Error, Result, EMOTION_COUNT};
use std::path::{Path, PathBuf};
use tokenizers::{
    PaddingDirection, PaddingParams, PaddingStrategy, Tokenizer, TruncationDirection,
    TruncationParams, TruncationStrategy,
};

/// Fixed sequence length in token positions.
///
/// Texts are padded and truncated to exactly this many positions, both
/// at the end of the sequence ("post"). The model was trained with post
/// padding; padding at the front systematically skews predictions, so
/// the direction is a correctness parameter, not a preference.
pub const MAX_POSITIONS: usize = 128;

/// Default checkpoint on the Hugging Face Hub.
pub const DEFAULT_HUB_REPO: &str = "SamLowe/roberta-base-go_emotions";

/// Paths to the three artifacts a checkpoint consists of.
#[derive(Debug)]
pub struct ModelFiles {
    pub config_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub weights_path: PathBuf,
}

impl ModelFiles {
    /// Use a local checkpoint directory containing `config.json`,
    /// `tokenizer.json`, and `model.safetensors`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let files = Self {
            config_path: dir.join("config.json"),
            tokenizer_path: dir.join("tokenizer.json"),
            weights_path: dir.join("model.safetensors"),
        };
        for path in [&files.config_path, &files.tokenizer_path, &files.weights_path] {
            if !path.exists() {
                return Err(Error::config(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(files)
    }

    /// Download a checkpoint from the Hugging Face Hub.
    ///
    /// Synchronous I/O; call from `spawn_blocking` in async contexts.
    /// Files are cached by `hf-hub` under `~/.cache/huggingface/hub/`.
    pub fn download(repo_id: &str) -> Result<Self> {
        let api = hf_hub::api::sync::Api::new()
            .map_err(|e| Error::config(format!("failed to initialize Hugging Face API: {e}")))?;
        let repo = api.model(repo_id.to_string());

        let get = |filename: &str| {
            repo.get(filename)
                .map_err(|e| Error::config(format!("failed to download {filename}: {e}")))
        };

        Ok(Self {
            config_path: get("config.json")?,
            tokenizer_path: get("tokenizer.json")?,
            weights_path: get("model.safetensors")?,
        })
    }
}

/// Map a configured device name to a candle device.
pub fn resolve_device(name: &str) -> Result<Device> {
    match name {
        "cpu" => Ok(Device::Cpu),
        "cuda" => Device::new_cuda(0)
            .map_err(|e| Error::config(format!("failed to initialize CUDA device: {e}"))),
        "metal" => Device::new_metal(0)
            .map_err(|e| Error::config(format!("failed to initialize Metal device: {e}"))),
        other => Err(Error::config(format!("unknown device '{other}'"))),
    }
}

/// Loaded GoEmotions checkpoint: RoBERTa encoder with a 28-way
/// sequence-classification head, plus its paired tokenizer.
///
/// Immutable after construction; safe to share across concurrent
/// read-only inference calls.
pub struct GoEmotionsModel {
    model: XLMRobertaForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
}

impl GoEmotionsModel {
    /// Load model weights and tokenizer from checkpoint files.
    pub fn load(files: &ModelFiles, device: Device) -> Result<Self> {
        let config_str = std::fs::read_to_string(&files.config_path)
            .map_err(|e| Error::classifier(format!("failed to read model config: {e}")))?;
        let config: RobertaConfig = serde_json::from_str(&config_str)
            .map_err(|e| Error::classifier(format!("failed to parse model config: {e}")))?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer_path)
            .map_err(|e| Error::classifier(format!("failed to load tokenizer: {e}")))?;

        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(MAX_POSITIONS),
            direction: PaddingDirection::Right,
            ..Default::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_POSITIONS,
                direction: TruncationDirection::Right,
                strategy: TruncationStrategy::LongestFirst,
                ..Default::default()
            }))
            .map_err(|e| Error::classifier(format!("failed to configure truncation: {e}")))?;

        // SAFETY: mmap'd safetensors file — safe as long as the file is
        // not modified while the model is in use.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&files.weights_path], DType::F32, &device)
                .map_err(|e| Error::classifier(format!("failed to load model weights: {e}")))?
        };
        let model = XLMRobertaForSequenceClassification::new(EMOTION_COUNT, &config, vb)
            .map_err(|e| Error::classifier(format!("failed to construct classifier model: {e}")))?;

        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    /// Classify a batch of texts into per-class probability vectors.
    ///
    /// Returns one [`EmotionScores`] per input, index-aligned. An empty
    /// batch returns immediately without touching the model.
    pub fn infer(&self, texts: &[String]) -> Result<Vec<EmotionScores>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let str_refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let encodings = self
            .tokenizer
            .encode_batch(str_refs, true)
            .map_err(|e| Error::classifier(format!("tokenization failed: {e}")))?;

        let batch_size = encodings.len();
        // Fixed-length padding makes every row exactly MAX_POSITIONS wide.
        let input_ids: Vec<u32> = encodings
            .iter()
            .flat_map(|e| e.get_ids().to_vec())
            .collect();
        let attention_mask: Vec<u32> = encodings
            .iter()
            .flat_map(|e| e.get_attention_mask().to_vec())
            .collect();

        let input_ids =
            Tensor::from_vec(input_ids, (batch_size, MAX_POSITIONS), &self.device)
                .map_err(|e| Error::classifier(format!("failed to build input tensor: {e}")))?;
        let attention_mask =
            Tensor::from_vec(attention_mask, (batch_size, MAX_POSITIONS), &self.device)
                .map_err(|e| Error::classifier(format!("failed to build mask tensor: {e}")))?;
        // RoBERTa does not use token type ids — pass zeros
        let token_type_ids = input_ids
            .zeros_like()
            .map_err(|e| Error::classifier(format!("failed to build token type tensor: {e}")))?;

        // Forward pass -> [batch, EMOTION_COUNT] logits
        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)
            .map_err(|e| Error::classifier(format!("model forward pass failed: {e}")))?;

        // Sigmoid for independent multi-label activations
        let scores = candle_nn::ops::sigmoid(&logits)
            .map_err(|e| Error::classifier(format!("sigmoid activation failed: {e}")))?;
        let rows = scores
            .to_vec2::<f32>()
            .map_err(|e| Error::classifier(format!("failed to read scores: {e}")))?;

        rows.into_iter().map(EmotionScores::from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dir_rejects_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelFiles::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_dir_names_the_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        let err = ModelFiles::from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("tokenizer.json"));
    }

    #[test]
    fn test_from_dir_accepts_complete_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["config.json", "tokenizer.json", "model.safetensors"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let files = ModelFiles::from_dir(dir.path()).unwrap();
        assert!(files.weights_path.ends_with("model.safetensors"));
    }

    #[test]
    fn test_resolve_device_cpu() {
        assert!(matches!(resolve_device("cpu").unwrap(), Device::Cpu));
    }

    #[test]
    fn test_resolve_device_unknown_name() {
        assert!(resolve_device("tpu").is_err());
    }
}
