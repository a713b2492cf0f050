use serde::{Deserialize, Serialize};

/// Display class for an article's political-bias label.
///
/// The set is closed: any label that is not one of the three known leanings
/// falls into [`BiasClass::Neutral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasClass {
    Left,
    Right,
    Center,
    Neutral,
}

impl BiasClass {
    /// Card style used by display layers.
    #[must_use]
    pub fn card_class(self) -> &'static str {
        match self {
            BiasClass::Left => "card left",
            BiasClass::Right => "card right",
            BiasClass::Center => "card center",
            BiasClass::Neutral => "card",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BiasClass::Left => "Left",
            BiasClass::Right => "Right",
            BiasClass::Center => "Center",
            BiasClass::Neutral => "Unknown",
        }
    }
}

impl std::fmt::Display for BiasClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a bias label. Surrounding whitespace and letter case are ignored.
#[must_use]
pub fn classify_bias(label: Option<&str>) -> BiasClass {
    let Some(label) = label.map(str::trim) else {
        return BiasClass::Neutral;
    };

    if label.eq_ignore_ascii_case("left") {
        BiasClass::Left
    } else if label.eq_ignore_ascii_case("right") {
        BiasClass::Right
    } else if label.eq_ignore_ascii_case("center") {
        BiasClass::Center
    } else {
        BiasClass::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_their_class() {
        assert_eq!(classify_bias(Some("Left")), BiasClass::Left);
        assert_eq!(classify_bias(Some("Right")), BiasClass::Right);
        assert_eq!(classify_bias(Some("Center")), BiasClass::Center);
    }

    #[test]
    fn classification_ignores_case_and_padding() {
        assert_eq!(classify_bias(Some("left")), BiasClass::Left);
        assert_eq!(classify_bias(Some(" RIGHT ")), BiasClass::Right);
        assert_eq!(classify_bias(Some("cEnTeR")), BiasClass::Center);
    }

    #[test]
    fn unknown_empty_and_absent_labels_are_neutral() {
        assert_eq!(classify_bias(Some("Libertarian")), BiasClass::Neutral);
        assert_eq!(classify_bias(Some("")), BiasClass::Neutral);
        assert_eq!(classify_bias(None), BiasClass::Neutral);
    }

    #[test]
    fn card_classes() {
        assert_eq!(BiasClass::Left.card_class(), "card left");
        assert_eq!(BiasClass::Right.card_class(), "card right");
        assert_eq!(BiasClass::Center.card_class(), "card center");
        assert_eq!(BiasClass::Neutral.card_class(), "card");
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&BiasClass::Center).expect("serialize");
        assert_eq!(json, "\"center\"");
    }
}
