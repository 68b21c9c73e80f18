// Color Normalizer
// Symbolic badge colors to hex

use std::sync::OnceLock;

use regex::Regex;

const HEX_COLOR_PATTERN: &str = r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$";

static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();

/// Named colors understood by the rendering service, matched case-sensitively
pub const NAMED_COLORS: [(&str, &str); 12] = [
    ("brightgreen", "#4c1"),
    ("green", "#4c1"),
    ("yellow", "#dfb317"),
    ("orange", "#fe7d37"),
    ("red", "#e05d44"),
    ("blue", "#007ec6"),
    ("lightgrey", "#9f9f9f"),
    ("success", "#4c1"),
    ("important", "#fe7d37"),
    ("critical", "#e05d44"),
    ("informational", "#007ec6"),
    ("inactive", "#9f9f9f"),
];

fn hex_color_regex() -> &'static Regex {
    HEX_COLOR_REGEX.get_or_init(|| Regex::new(HEX_COLOR_PATTERN).expect("valid hex color regex"))
}

/// Map a color to its hex form. Unknown input is returned unchanged.
pub fn normalize(input: &str) -> String {
    if let Some((_, hex)) = NAMED_COLORS.iter().find(|(name, _)| *name == input) {
        return (*hex).to_string();
    }

    match hex_color_regex().captures(input) {
        Some(caps) => format!("#{}", &caps[1]),
        None => input.to_string(),
    }
}

/// The hex value a color picker can display, if the input resolves to one
pub fn swatch(input: &str) -> Option<String> {
    let normalized = normalize(input.trim());
    if hex_color_regex().is_match(&normalized) {
        Some(normalized)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(normalize("brightgreen"), "#4c1");
        assert_eq!(normalize("success"), "#4c1");
        assert_eq!(normalize("important"), "#fe7d37");
        assert_eq!(normalize("critical"), "#e05d44");
        assert_eq!(normalize("informational"), "#007ec6");
        assert_eq!(normalize("inactive"), "#9f9f9f");
        assert_eq!(normalize("lightgrey"), "#9f9f9f");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(normalize("Red"), "Red");
    }

    #[test]
    fn test_hex_inputs() {
        assert_eq!(normalize("fff"), "#fff");
        assert_eq!(normalize("#ABCDEF"), "#ABCDEF");
        assert_eq!(normalize("a1b2c3"), "#a1b2c3");
        assert_eq!(normalize("abcd"), "abcd");
        assert_eq!(normalize("#ggg"), "#ggg");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_swatch() {
        assert_eq!(swatch("blue"), Some("#007ec6".to_string()));
        assert_eq!(swatch("555"), Some("#555".to_string()));
        assert_eq!(swatch("rgb(1,2,3)"), None);
    }
}
