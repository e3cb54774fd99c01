pub mod api;
pub mod banner;
pub mod chart;
pub mod config;
pub mod consts;
pub mod engine;
pub mod ephemeris;
pub mod locale;
pub mod oracle;
pub mod prompts;
pub mod zodiac;
