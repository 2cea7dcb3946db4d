//! Fixed lookups from provider strings to local display assets

/// Artwork shown next to the current conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionAsset {
    Clear,
    FewClouds,
    Cloud,
}

impl ConditionAsset {
    pub fn all() -> &'static [ConditionAsset] {
        &[
            ConditionAsset::Clear,
            ConditionAsset::FewClouds,
            ConditionAsset::Cloud,
        ]
    }

    /// Map a provider condition description to an asset.
    /// Anything without its own artwork falls back to `FewClouds`.
    pub fn for_description(description: &str) -> Self {
        match description {
            "clear sky" => ConditionAsset::Clear,
            "few clouds" => ConditionAsset::FewClouds,
            "scattered clouds" | "broken clouds" => ConditionAsset::Cloud,
            _ => ConditionAsset::FewClouds,
        }
    }

    /// Asset file name, as written to the debug log
    pub fn file_name(&self) -> &'static str {
        match self {
            ConditionAsset::Clear => "clear.png",
            ConditionAsset::FewClouds => "fewclouds.png",
            ConditionAsset::Cloud => "cloud.png",
        }
    }
}

/// Terminal glyph for a forecast icon code such as `10d`
pub fn icon_glyph(code: &str) -> &'static str {
    match code.get(..2).unwrap_or("") {
        "01" => "☀",
        "02" => "⛅",
        "03" | "04" => "☁",
        "09" | "10" => "☂",
        "11" => "⚡",
        "13" => "❄",
        "50" => "≋",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_lookup() {
        assert_eq!(ConditionAsset::for_description("clear sky"), ConditionAsset::Clear);
        assert_eq!(ConditionAsset::for_description("broken clouds"), ConditionAsset::Cloud);
        assert_eq!(ConditionAsset::for_description("thunderstorm"), ConditionAsset::FewClouds);
        assert_eq!(ConditionAsset::for_description(""), ConditionAsset::FewClouds);
    }

    #[test]
    fn test_icon_glyph() {
        assert_eq!(icon_glyph("01d"), "☀");
        assert_eq!(icon_glyph("10n"), "☂");
        assert_eq!(icon_glyph(""), "?");
    }
}
