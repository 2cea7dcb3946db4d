//! Fitzpatrick skin types and sunscreen guidance

/// Fitzpatrick skin phototype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinType {
    I,
    II,
    III,
    IV,
    V,
    VI,
}

impl SkinType {
    pub fn all() -> &'static [SkinType] {
        &[
            SkinType::I,
            SkinType::II,
            SkinType::III,
            SkinType::IV,
            SkinType::V,
            SkinType::VI,
        ]
    }

    pub fn numeral(&self) -> &'static str {
        match self {
            SkinType::I => "I",
            SkinType::II => "II",
            SkinType::III => "III",
            SkinType::IV => "IV",
            SkinType::V => "V",
            SkinType::VI => "VI",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SkinType::I => "Very fair, always burns, never tans",
            SkinType::II => "Fair, usually burns, tans minimally",
            SkinType::III => "Medium, sometimes burns, tans gradually",
            SkinType::IV => "Olive, rarely burns, tans easily",
            SkinType::V => "Brown, very rarely burns, tans darkly",
            SkinType::VI => "Dark brown to black, never burns",
        }
    }

    /// Recommended minimum SPF
    pub fn recommended_spf(&self) -> u8 {
        match self {
            SkinType::I | SkinType::II => 50,
            SkinType::III | SkinType::IV => 30,
            SkinType::V | SkinType::VI => 15,
        }
    }

    /// UV index from which this skin type should always cover up
    pub fn protect_from_uv(&self) -> u8 {
        match self {
            SkinType::I => 1,
            SkinType::II => 2,
            SkinType::III => 3,
            SkinType::IV => 4,
            SkinType::V | SkinType::VI => 6,
        }
    }
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type {}", self.numeral())
    }
}

/// Selection on the My Skin tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkinSelection {
    pub cursor: usize,
    pub chosen: Option<SkinType>,
}

impl SkinSelection {
    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % SkinType::all().len();
    }

    pub fn previous(&mut self) {
        let len = SkinType::all().len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    /// Confirm the skin type under the cursor
    pub fn choose(&mut self) -> SkinType {
        let skin = SkinType::all()[self.cursor];
        self.chosen = Some(skin);
        skin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spf_recommendations() {
        assert_eq!(SkinType::I.recommended_spf(), 50);
        assert_eq!(SkinType::IV.recommended_spf(), 30);
        assert_eq!(SkinType::VI.recommended_spf(), 15);
    }

    #[test]
    fn test_selection_cycles_and_chooses() {
        let mut selection = SkinSelection::default();
        selection.previous();
        assert_eq!(selection.cursor, 5);
        selection.next();
        selection.next();
        assert_eq!(selection.choose(), SkinType::II);
        assert_eq!(selection.chosen, Some(SkinType::II));
    }

    #[test]
    fn test_display() {
        assert_eq!(SkinType::III.to_string(), "Type III");
    }
}
