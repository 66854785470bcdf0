//! Colour helpers used when rendering the public page.

/// Theme colour used when the stored one cannot be parsed.
pub const DEFAULT_THEME_COLOR: &str = "#8b5cf6";

/// Parse `#rrggbb` or `#rgb` (leading `#` optional) into its channels.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let mut channels = digits
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((channels.next()??, channels.next()??, channels.next()??))
        }
        _ => None,
    }
}

/// Space-separated channels, e.g. `"255 0 0"`, for use in CSS `rgb()` variables.
pub fn hex_to_rgb(hex: &str) -> Option<String> {
    parse_hex(hex).map(|(r, g, b)| format!("{} {} {}", r, g, b))
}

/// Card background derived from the theme colour and an opacity percentage.
pub fn card_background(theme_color: &str, opacity_percent: i64) -> String {
    let (r, g, b) = parse_hex(theme_color)
        .or_else(|| parse_hex(DEFAULT_THEME_COLOR))
        .unwrap_or((139, 92, 246));
    let alpha = opacity_percent.clamp(0, 100) as f64 / 100.0;
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_rgb_converts_six_digit_colors() {
        assert_eq!(hex_to_rgb("#ff0000").as_deref(), Some("255 0 0"));
        assert_eq!(hex_to_rgb("#8B5CF6").as_deref(), Some("139 92 246"));
        assert_eq!(hex_to_rgb("00ff7f").as_deref(), Some("0 255 127"));
    }

    #[test]
    fn hex_to_rgb_expands_short_form() {
        assert_eq!(hex_to_rgb("#f00").as_deref(), Some("255 0 0"));
        assert_eq!(hex_to_rgb("#abc").as_deref(), Some("170 187 204"));
    }

    #[test]
    fn hex_to_rgb_rejects_garbage() {
        assert_eq!(hex_to_rgb(""), None);
        assert_eq!(hex_to_rgb("#ff00"), None);
        assert_eq!(hex_to_rgb("#gggggg"), None);
        assert_eq!(hex_to_rgb("red"), None);
    }

    #[test]
    fn card_background_applies_opacity() {
        assert_eq!(card_background("#ff0000", 80), "rgba(255, 0, 0, 0.8)");
        assert_eq!(card_background("#ff0000", 100), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn card_background_clamps_and_falls_back() {
        assert_eq!(card_background("#ff0000", 250), "rgba(255, 0, 0, 1)");
        assert_eq!(card_background("#ff0000", -5), "rgba(255, 0, 0, 0)");
        assert_eq!(card_background("nope", 50), "rgba(139, 92, 246, 0.5)");
    }
}
