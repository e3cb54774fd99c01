use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::engine::{Analysis, BirthQuery};
use crate::locale::Locale;
use crate::prompts::roast::Mode;
use crate::zodiac::Sign;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub date: String,
    pub time: String,
    pub city_lat: String,
    pub city_lon: String,
    pub mode: String,
}

impl From<AnalyzeRequest> for BirthQuery {
    fn from(req: AnalyzeRequest) -> Self {
        Self {
            date: req.date,
            time: req.time,
            latitude: req.city_lat,
            longitude: req.city_lon,
            mode: Mode::parse(&req.mode),
        }
    }
}

/// Sign names per body, in the service locale.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AstroData {
    pub sun: String,
    pub moon: String,
    pub mercury: String,
    pub mars: String,
    pub saturn: String,
}

impl AstroData {
    pub fn new(chart: &Chart, locale: Locale) -> Self {
        let name = |sign: Sign| sign.name(locale).to_string();
        Self {
            sun: name(chart.sun),
            moon: name(chart.moon),
            mercury: name(chart.mercury),
            mars: name(chart.mars),
            saturn: name(chart.saturn),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub engine: String,
    pub astro_data: AstroData,
    pub roast_message: String,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            astro_data: AstroData::new(&analysis.chart, analysis.locale),
            engine: analysis.engine,
            roast_message: analysis.roast_message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
