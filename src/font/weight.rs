//! CSS weight and style normalization.

/// Font weight names mapped to CSS `font-weight` values.
const WEIGHT_TABLE: &[(&str, &str)] = &[
    ("thin", "100"),
    ("extralight", "200"),
    ("light", "300"),
    ("book", "normal"),
    ("normal", "normal"),
    ("regular", "normal"),
    ("medium", "500"),
    ("demibold", "600"),
    ("demi", "600"),
    ("semibold", "700"),
    ("bold", "700"),
    ("extrabold", "800"),
    ("black", "900"),
    ("heavy", "900"),
];

/// Normalize a weight reported by the font into a CSS weight.
///
/// Whitespace is removed and the name lowercased before the table lookup.
/// Unknown names (including numeric weights) pass through normalized.
pub fn normalize_weight(raw: &str) -> String {
    let key: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    WEIGHT_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, css)| (*css).to_string())
        .unwrap_or(key)
}

/// Derive the CSS style from an italic angle: exactly zero is upright.
pub fn style_from_angle(angle: &str) -> &'static str {
    match angle.trim().parse::<f64>() {
        Ok(value) if value == 0.0 => "normal",
        _ => "italic",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry() {
        for (name, css) in WEIGHT_TABLE {
            assert_eq!(normalize_weight(name), *css, "weight {name}");
        }
    }

    #[test]
    fn test_case_and_spaces() {
        assert_eq!(normalize_weight("Bold"), "700");
        assert_eq!(normalize_weight("Book"), "normal");
        assert_eq!(normalize_weight("  Extra Light\n"), "200");
        assert_eq!(normalize_weight("Semi Bold"), "700");
        assert_eq!(normalize_weight("Demi"), "600");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(normalize_weight("UltraCondensed"), "ultracondensed");
        assert_eq!(normalize_weight(" 450 "), "450");
    }

    #[test]
    fn test_style_from_angle() {
        assert_eq!(style_from_angle("0"), "normal");
        assert_eq!(style_from_angle("0.0\n"), "normal");
        assert_eq!(style_from_angle("-0"), "normal");
        assert_eq!(style_from_angle("-12.5"), "italic");
        assert_eq!(style_from_angle("11"), "italic");
        assert_eq!(style_from_angle("oblique"), "italic");
    }
}
