use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use super::{Analysis, BirthQuery, Engine};
use crate::chart::{self, ChartError};
use crate::consts::DEFAULT_FALLBACK_MODEL;
use crate::ephemeris::Ephemeris;
use crate::locale::Locale;
use crate::oracle::select::{ModelSelection, ModelSelector};
use crate::oracle::{Generation, Oracle, OracleError};
use crate::prompts::roast::build_roast_prompt;

pub struct RoastConfig {
    /// Model used when selection finds nothing or fails.
    pub fallback_model: String,
    pub locale: Locale,
}

impl Default for RoastConfig {
    fn default() -> Self {
        Self {
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
            locale: Locale::default(),
        }
    }
}

/// What came back from one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoastOutcome {
    Text(String),
    NoCandidates { block_reason: Option<String> },
    Failed(OracleError),
}

impl RoastOutcome {
    /// Text shown to the user. Failures become a readable message.
    pub fn into_message(self, locale: Locale) -> String {
        match (self, locale) {
            (RoastOutcome::Text(text), _) => text,
            (RoastOutcome::NoCandidates { .. }, Locale::Tr) => {
                "Yapay zeka sessiz kaldı. Tekrar dene.".to_string()
            }
            (RoastOutcome::NoCandidates { .. }, Locale::En) => {
                "The AI went quiet. Try again.".to_string()
            }
            (RoastOutcome::Failed(e), Locale::Tr) => format!("Bağlantı Hatası: {e}"),
            (RoastOutcome::Failed(e), Locale::En) => format!("Connection error: {e}"),
        }
    }
}

impl From<Result<Generation, OracleError>> for RoastOutcome {
    fn from(result: Result<Generation, OracleError>) -> Self {
        match result {
            Ok(Generation::Text(text)) => RoastOutcome::Text(text),
            Ok(Generation::Empty { reason }) => RoastOutcome::NoCandidates {
                block_reason: reason,
            },
            Err(e) => RoastOutcome::Failed(e),
        }
    }
}

/// Chart, then model, then prompt, then one generation call.
pub struct RoastEngine {
    ephemeris: Arc<dyn Ephemeris>,
    oracle: Arc<dyn Oracle>,
    selector: ModelSelector,
    config: RoastConfig,
}

impl RoastEngine {
    pub fn new(
        ephemeris: Arc<dyn Ephemeris>,
        oracle: Arc<dyn Oracle>,
        model_cache_ttl: Duration,
        config: RoastConfig,
    ) -> Self {
        Self {
            ephemeris,
            selector: ModelSelector::new(oracle.clone(), model_cache_ttl),
            oracle,
            config,
        }
    }

    async fn resolve_model(&self) -> String {
        match self.selector.select().await {
            ModelSelection::Found(model) => {
                debug!("selected model {model}");
                model
            }
            ModelSelection::NotFound => {
                warn!(
                    "no model supports content generation, falling back to {}",
                    self.config.fallback_model
                );
                self.config.fallback_model.clone()
            }
            ModelSelection::TransportError(e) => {
                warn!(
                    "model listing failed ({e}), falling back to {}",
                    self.config.fallback_model
                );
                self.config.fallback_model.clone()
            }
        }
    }
}

#[async_trait]
impl Engine for RoastEngine {
    async fn analyze(&self, query: &BirthQuery) -> Result<Analysis, ChartError> {
        let locale = self.config.locale;
        let chart = chart::calculate(
            self.ephemeris.as_ref(),
            &query.date,
            &query.time,
            &query.latitude,
            &query.longitude,
        )?;
        debug!("chart: {}", chart.summary(locale));

        let model = self.resolve_model().await;
        let prompt = build_roast_prompt(query.mode, &chart, locale);

        let outcome = RoastOutcome::from(self.oracle.generate(&model, &prompt).await);
        match &outcome {
            RoastOutcome::Text(_) => {}
            RoastOutcome::NoCandidates { block_reason } => warn!(
                "{model} returned no candidates (reason: {})",
                block_reason.as_deref().unwrap_or("none")
            ),
            RoastOutcome::Failed(e) => warn!("generation with {model} failed: {e}"),
        }

        Ok(Analysis {
            engine: model,
            chart,
            roast_message: outcome.into_message(locale),
            locale,
        })
    }
}
