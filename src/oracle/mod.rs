pub mod gemini;
pub mod mock;
pub mod select;

use async_trait::async_trait;
use std::fmt;

use crate::consts::GENERATE_CONTENT;

/// A model advertised by the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Opaque model reference, e.g. `models/gemini-2.0-flash`.
    pub name: String,
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn new(name: impl Into<String>, methods: &[&str]) -> Self {
        Self {
            name: name.into(),
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Whether the model can be used for text generation.
    pub fn can_generate(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == GENERATE_CONTENT)
    }
}

/// What a generation call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Text of the first candidate.
    Text(String),
    /// No usable candidate. `reason` carries the block or finish reason
    /// when the service reported one.
    Empty { reason: Option<String> },
}

/// Why a call to the generation service failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    Timeout,
    /// Connection, TLS, or I/O failure before a response arrived.
    Transport(String),
    /// Non-success HTTP status, with the service's error message if any.
    Status { code: u16, message: String },
    /// The response body did not match the expected schema.
    Malformed(String),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Status { code, message } => write!(f, "service returned {code}: {message}"),
            Self::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for OracleError {}

/// The text generation service. Could be Gemini or a test script.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, OracleError>;
    async fn generate(&self, model: &str, prompt: &str) -> Result<Generation, OracleError>;
}
