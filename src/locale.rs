use clap::ValueEnum;

/// Language used for sign names, prompts, and fixed user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }
}
