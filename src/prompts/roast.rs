use crate::chart::Chart;
use crate::ephemeris::Body;
use crate::locale::Locale;

/// Persona the model is asked to adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Roast,
    /// Polite on the surface, backhanded underneath.
    FakePolite,
}

impl Mode {
    /// Lenient parse. Unknown values fall back to [`Mode::Roast`].
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "polite" | "fake_polite" | "fake-polite" => Mode::FakePolite,
            _ => Mode::Roast,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Roast => "roast",
            Mode::FakePolite => "polite",
        }
    }
}

struct Template {
    role: &'static str,
    data_label: &'static str,
    task: &'static str,
}

const TR_ROAST: Template = Template {
    role: "Rol: Acımasız, alaycı ve komik bir astrolog yapay zekasın.",
    data_label: "Kullanıcı Verileri",
    task: "Görev: Bu kişiyi burçlarına göre aşağıla (Roast et). Kısa ve vurucu olsun.",
};

const TR_FAKE_POLITE: Template = Template {
    role: "Rol: Aşırı kibar görünen ama her cümlesinde iğne olan bir astrolog yapay zekasın.",
    data_label: "Kullanıcı Verileri",
    task: "Görev: Bu kişiyi burçlarına göre övüyormuş gibi yap ama her iltifatın altına ince bir laf sıkıştır. Kısa tut.",
};

const EN_ROAST: Template = Template {
    role: "Role: You are a ruthless, sarcastic and funny astrologer AI.",
    data_label: "User Data",
    task: "Task: Roast this person based on their signs. Keep it short and punchy.",
};

const EN_FAKE_POLITE: Template = Template {
    role: "Role: You are an astrologer AI who sounds extremely polite but hides a jab in every sentence.",
    data_label: "User Data",
    task: "Task: Pretend to compliment this person based on their signs, but slip a backhanded remark into every compliment. Keep it short.",
};

fn template(mode: Mode, locale: Locale) -> &'static Template {
    match (locale, mode) {
        (Locale::Tr, Mode::Roast) => &TR_ROAST,
        (Locale::Tr, Mode::FakePolite) => &TR_FAKE_POLITE,
        (Locale::En, Mode::Roast) => &EN_ROAST,
        (Locale::En, Mode::FakePolite) => &EN_FAKE_POLITE,
    }
}

fn body_name(body: Body, locale: Locale) -> &'static str {
    match locale {
        Locale::Tr => match body {
            Body::Sun => "Güneş",
            Body::Moon => "Ay",
            Body::Mercury => "Merkür",
            Body::Mars => "Mars",
            Body::Saturn => "Satürn",
        },
        Locale::En => match body {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Mars => "Mars",
            Body::Saturn => "Saturn",
        },
    }
}

/// Render the generation prompt for a chart.
pub fn build_roast_prompt(mode: Mode, chart: &Chart, locale: Locale) -> String {
    let template = template(mode, locale);

    let placements = chart
        .placements()
        .iter()
        .map(|(body, sign)| format!("{} {}", body_name(*body, locale), sign.name(locale)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{role}\n{data_label}: {placements}.\n{task}",
        role = template.role,
        data_label = template.data_label,
        placements = placements,
        task = template.task,
    )
}
