use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Generation, ModelInfo, Oracle, OracleError};

/// A scripted oracle for tests. Returns a fixed model list and pre-defined
/// generations in order, and records what it was asked.
pub struct MockOracle {
    models: Result<Vec<ModelInfo>, OracleError>,
    generations: Vec<Result<Generation, OracleError>>,
    index: AtomicUsize,
    list_calls: AtomicUsize,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockOracle {
    pub fn new(
        models: Result<Vec<ModelInfo>, OracleError>,
        generations: Vec<Result<Generation, OracleError>>,
    ) -> Self {
        Self {
            models,
            generations,
            index: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// One generation-capable model that always answers with `text`.
    pub fn answering(model: &str, text: &str) -> Self {
        Self::new(
            Ok(vec![ModelInfo::new(model, &["generateContent"])]),
            vec![Ok(Generation::Text(text.to_string()))],
        )
    }

    /// How many times the model list was requested.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// `(model, prompt)` pairs passed to `generate`, oldest first.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, OracleError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.models.clone()
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<Generation, OracleError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((model.to_string(), prompt.to_string()));

        let i = self.index.fetch_add(1, Ordering::SeqCst);
        // The last scripted answer repeats once the script runs out.
        let last = self.generations.len().saturating_sub(1);
        self.generations
            .get(i.min(last))
            .cloned()
            .unwrap_or_else(|| {
                Err(OracleError::Transport(format!(
                    "MockOracle: no generations scripted (called {} times)",
                    i + 1
                )))
            })
    }
}
