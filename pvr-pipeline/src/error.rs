//! Error types for pipeline resolution and configuration

use std::path::PathBuf;

/// Error returned while resolving or building a pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// Blend instruction outside the 3-bit hardware range
    #[error("Unsupported blend instruction: {0} (must be 0-7)")]
    InvalidBlendInstruction(u32),

    /// Depth mode outside the 3-bit hardware range
    #[error("Unsupported depth mode: {0} (must be 0-7)")]
    InvalidDepthMode(u32),

    /// The driver rejected a shader module
    #[error("Shader module creation failed: {0}")]
    ShaderCreation(String),

    /// The driver rejected the pipeline
    #[error("Render pipeline creation failed: {0}")]
    PipelineCreation(String),
}

impl PipelineError {
    /// True for out-of-range hardware fields, which mean the decoder upstream
    /// handed over corrupt data. Driver failures are recoverable.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidBlendInstruction(_) | PipelineError::InvalidDepthMode(_)
        )
    }
}

/// Error returned while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
