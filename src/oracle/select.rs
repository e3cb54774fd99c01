//! Model resolution: pick the first listed model that can generate text.
//!
//! Every call asks the service unless a time-to-live is configured, in which
//! case a successful pick is reused until it expires.

use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::{ModelInfo, Oracle, OracleError};

/// Outcome of a model lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelection {
    Found(String),
    /// The list was fetched but no model supports content generation.
    NotFound,
    /// The list could not be fetched or decoded.
    TransportError(OracleError),
}

/// First model advertising content generation, in listing order.
pub fn first_generation_model(models: &[ModelInfo]) -> Option<&ModelInfo> {
    models.iter().find(|m| m.can_generate())
}

struct CachedModel {
    name: String,
    fetched_at: Instant,
}

pub struct ModelSelector {
    oracle: Arc<dyn Oracle>,
    ttl: Duration,
    cached: RwLock<Option<CachedModel>>,
}

impl ModelSelector {
    /// A zero `ttl` disables caching.
    pub fn new(oracle: Arc<dyn Oracle>, ttl: Duration) -> Self {
        Self {
            oracle,
            ttl,
            cached: RwLock::new(None),
        }
    }

    pub async fn select(&self) -> ModelSelection {
        if !self.ttl.is_zero()
            && let Some(cached) = self.cached.read().await.as_ref()
            && cached.fetched_at.elapsed() < self.ttl
        {
            debug!("using cached model {}", cached.name);
            return ModelSelection::Found(cached.name.clone());
        }

        let selection = match self.oracle.list_models().await {
            Ok(models) => match first_generation_model(&models) {
                Some(model) => ModelSelection::Found(model.name.clone()),
                None => ModelSelection::NotFound,
            },
            Err(err) => ModelSelection::TransportError(err),
        };

        if !self.ttl.is_zero()
            && let ModelSelection::Found(name) = &selection
        {
            *self.cached.write().await = Some(CachedModel {
                name: name.clone(),
                fetched_at: Instant::now(),
            });
        }

        selection
    }
}
