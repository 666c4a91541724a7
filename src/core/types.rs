use serde::{Deserialize, Serialize};

/// Structural variant class recognised inside a fusion event string
///
/// The set is closed: event tokens are only ever classified against these
/// names, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantType {
    Deletion,
    Duplication,
    Insertion,
    Inversion,
    Translocation,
    Fusion,
    Intragenic,
}

impl VariantType {
    /// Every recognised variant type, in declaration order
    pub const ALL: [VariantType; 7] = [
        Self::Deletion,
        Self::Duplication,
        Self::Insertion,
        Self::Inversion,
        Self::Translocation,
        Self::Fusion,
        Self::Intragenic,
    ];

    /// Parse a keyword case-insensitively. Returns `None` for anything outside
    /// the closed set.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DELETION" => Some(Self::Deletion),
            "DUPLICATION" => Some(Self::Duplication),
            "INSERTION" => Some(Self::Insertion),
            "INVERSION" => Some(Self::Inversion),
            "TRANSLOCATION" => Some(Self::Translocation),
            "FUSION" => Some(Self::Fusion),
            "INTRAGENIC" => Some(Self::Intragenic),
            _ => None,
        }
    }

    /// Canonical uppercase name, as written to `variant_class`
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deletion => "DELETION",
            Self::Duplication => "DUPLICATION",
            Self::Insertion => "INSERTION",
            Self::Inversion => "INVERSION",
            Self::Translocation => "TRANSLOCATION",
            Self::Fusion => "FUSION",
            Self::Intragenic => "INTRAGENIC",
        }
    }
}

impl std::fmt::Display for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Amount of detail requested from a gene search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailLevel {
    /// Identity only (entrez id + symbol)
    #[default]
    Summary,
    /// Identity plus aliases and gene type
    Detailed,
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "SUMMARY"),
            Self::Detailed => write!(f, "DETAILED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_type_parse_is_case_insensitive() {
        assert_eq!(VariantType::parse("intragenic"), Some(VariantType::Intragenic));
        assert_eq!(VariantType::parse("Fusion"), Some(VariantType::Fusion));
        assert_eq!(VariantType::parse("DELETION"), Some(VariantType::Deletion));
        assert_eq!(VariantType::parse("TERT"), None);
        assert_eq!(VariantType::parse(""), None);
    }

    #[test]
    fn test_variant_type_names_round_trip() {
        for variant_type in VariantType::ALL {
            assert_eq!(VariantType::parse(variant_type.as_str()), Some(variant_type));
        }
    }

    #[test]
    fn test_variant_type_serializes_uppercase() {
        let json = serde_json::to_string(&VariantType::Translocation).unwrap();
        assert_eq!(json, "\"TRANSLOCATION\"");
    }
}
