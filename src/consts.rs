//! Project-wide constants.

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Versioned root of the Gemini REST API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none can be resolved from the service's model list.
pub const DEFAULT_FALLBACK_MODEL: &str = "models/gemini-2.0-flash";

/// Generation method a model must advertise to be selectable.
pub const GENERATE_CONTENT: &str = "generateContent";

/// Header carrying the API key. Keeps the key out of request URLs.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

pub const DEFAULT_LIST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
