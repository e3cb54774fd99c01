//! Startup banner display.

use crate::consts::{NAME, VERSION};

/// Server configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub addr: &'a str,
    pub api_base: &'a str,
    pub fallback_model: &'a str,
    pub model_cache: &'a str,
    pub locale: &'a str,
}

/// Print the startup banner with server info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║          A S T R O R O A S T          ║
   ║     the stars have notes on you       ║
   ╚═══════════════════════════════════════╝

   {}   {}
   listen    http://{}
   gemini    {}
   fallback  {}
   models    {}
   locale    {}
"#,
        NAME,
        VERSION,
        info.addr,
        info.api_base,
        info.fallback_model,
        info.model_cache,
        info.locale,
    );
}

/// Human label for the model cache setting.
pub fn model_cache_label(ttl_secs: u64) -> String {
    if ttl_secs == 0 {
        "resolved per request".to_string()
    } else {
        format!("cached for {ttl_secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_banner_does_not_panic() {
        let info = BannerInfo {
            addr: "0.0.0.0:8000",
            api_base: "https://generativelanguage.googleapis.com/v1beta",
            fallback_model: "models/gemini-2.0-flash",
            model_cache: "resolved per request",
            locale: "tr",
        };
        print_banner(&info);
    }

    #[test]
    fn cache_labels() {
        assert_eq!(model_cache_label(0), "resolved per request");
        assert_eq!(model_cache_label(120), "cached for 120s");
    }
}
