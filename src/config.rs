//! Runtime configuration from flags, the environment, and `.env`.

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::time::Duration;

use crate::consts::{
    DEFAULT_API_BASE, DEFAULT_FALLBACK_MODEL, DEFAULT_GENERATE_TIMEOUT_SECS, DEFAULT_HOST,
    DEFAULT_LIST_TIMEOUT_SECS, DEFAULT_PORT,
};
use crate::engine::roast::RoastConfig;
use crate::locale::Locale;
use crate::oracle::gemini::GeminiConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "astroroast", version, about = "Birth chart in, roast out.")]
pub struct Config {
    /// Gemini API key
    #[arg(
        long,
        env = "GOOGLE_API_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub api_key: String,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Versioned Gemini API root
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Model used when none can be picked from the model list
    #[arg(long, env = "GEMINI_FALLBACK_MODEL", default_value = DEFAULT_FALLBACK_MODEL)]
    pub fallback_model: String,

    /// Model listing timeout in seconds
    #[arg(
        long,
        env = "GEMINI_LIST_TIMEOUT",
        default_value_t = DEFAULT_LIST_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub list_timeout: u64,

    /// Content generation timeout in seconds
    #[arg(
        long,
        env = "GEMINI_GENERATE_TIMEOUT",
        default_value_t = DEFAULT_GENERATE_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub generate_timeout: u64,

    /// Seconds to reuse a selected model (0 re-selects on every request)
    #[arg(long, env = "MODEL_CACHE_TTL", default_value_t = 0)]
    pub model_cache_ttl: u64,

    /// Language for sign names, prompts, and fixed messages
    #[arg(long, env = "ASTROROAST_LOCALE", value_enum, default_value_t = Locale::Tr)]
    pub locale: Locale,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            list_timeout: Duration::from_secs(self.list_timeout),
            generate_timeout: Duration::from_secs(self.generate_timeout),
        }
    }

    pub fn roast(&self) -> RoastConfig {
        RoastConfig {
            fallback_model: self.fallback_model.clone(),
            locale: self.locale,
        }
    }

    pub fn model_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.model_cache_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // Flags take precedence over the environment, so these pass even when
    // the variables are set in the test process.
    fn parse(extra: &[&str]) -> Config {
        let mut args = vec!["astroroast", "--api-key", "test-key"];
        args.extend_from_slice(extra);
        Config::try_parse_from(args).unwrap()
    }

    #[test]
    fn explicit_flags() {
        let config = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--locale",
            "en",
            "--model-cache-ttl",
            "300",
            "--fallback-model",
            "models/gemini-pro",
        ]);
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.model_cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.roast().fallback_model, "models/gemini-pro");
    }

    #[test]
    fn gemini_config_carries_timeouts() {
        let config = parse(&[
            "--api-base",
            "http://127.0.0.1:1/v1beta",
            "--list-timeout",
            "5",
            "--generate-timeout",
            "7",
        ]);
        let gemini = config.gemini();
        assert_eq!(gemini.api_key, "test-key");
        assert_eq!(gemini.api_base, "http://127.0.0.1:1/v1beta");
        assert_eq!(gemini.list_timeout, Duration::from_secs(5));
        assert_eq!(gemini.generate_timeout, Duration::from_secs(7));
    }

    #[test]
    fn unknown_locale_is_rejected() {
        let result = Config::try_parse_from(["astroroast", "--api-key", "k", "--locale", "fr"]);
        assert!(result.is_err());
    }

    #[test]
    fn api_key_is_required() {
        let command = Config::command();
        let api_key = command
            .get_arguments()
            .find(|arg| arg.get_id() == "api_key")
            .unwrap();
        assert!(api_key.is_required_set());
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = Config::try_parse_from(["astroroast", "--api-key", ""]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        for flag in ["--list-timeout", "--generate-timeout"] {
            let result = Config::try_parse_from(["astroroast", "--api-key", "k", flag, "0"]);
            assert!(result.is_err(), "{flag} 0 accepted");
        }
    }
}
