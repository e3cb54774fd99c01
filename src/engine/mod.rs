pub mod roast;

use async_trait::async_trait;

use crate::chart::{Chart, ChartError};
use crate::locale::Locale;
use crate::prompts::roast::Mode;

/// A birth query as received, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthQuery {
    pub date: String,
    pub time: String,
    pub latitude: String,
    pub longitude: String,
    pub mode: Mode,
}

/// A computed chart plus the generated roast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Model that produced (or was asked to produce) the roast.
    pub engine: String,
    pub chart: Chart,
    pub roast_message: String,
    /// Locale sign names should be rendered in.
    pub locale: Locale,
}

/// The outermost boundary. The HTTP layer only knows this trait.
///
/// Only chart errors fail an analysis. Generation problems end up in
/// `roast_message`.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn analyze(&self, query: &BirthQuery) -> Result<Analysis, ChartError>;
}
