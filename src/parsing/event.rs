//! Grammar for fusion event strings.
//!
//! An event is two tokens joined by a hyphen, underscore, or whitespace, with
//! an optional trailing whitespace-separated word:
//!
//! ```text
//! ^([A-Za-z0-9_.]+)(?:-|_|\s)([A-Za-z0-9_.]+)(?:\s+(\w+))?$
//! ```
//!
//! Gene symbols that themselves contain a hyphen are not supported: the hyphen
//! is always read as the token separator.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::core::types::VariantType;

/// `\s` and `\w` are spelled out as ASCII classes so that non-ASCII letters
/// and spaces never take part in a match.
static EVENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([A-Za-z0-9_.]+)(?:-|_|[ \t\n\x0B\x0C\r])([A-Za-z0-9_.]+)(?:[ \t\n\x0B\x0C\r]+([A-Za-z0-9_]+))?$",
    )
    .unwrap_or_else(|e| panic!("event grammar failed to compile: {e}"))
});

/// Event texts that only say "this is a fusion" and carry no structure
const PLACEHOLDER_EVENTS: [&str; 2] = ["Fusion", "SV"];

/// Decomposition of a fusion event string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedEvent {
    /// The event names only a variant type, e.g. `INTRAGENIC`
    PureType { variant_type: VariantType },

    /// `<gene>-<variant type>`, e.g. `TUFT1-intragenic`
    GeneAndType {
        gene: String,
        variant_type: VariantType,
    },

    /// `<gene>-<gene> [variant type]`, e.g. `ZSWIM4-SLC1A6` or `ZNF595-TERT fusion`
    GenePair {
        first: String,
        second: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        variant_type: Option<VariantType>,
    },

    /// The text does not follow the event grammar
    NoMatch,
}

impl ParsedEvent {
    /// Symbol to resolve as the second breakpoint gene, if the event names one
    #[must_use]
    pub fn second_gene_candidate(&self) -> Option<&str> {
        match self {
            Self::GeneAndType { gene, .. } => Some(gene),
            Self::GenePair { second, .. } => Some(second),
            Self::PureType { .. } | Self::NoMatch => None,
        }
    }

    /// Variant type named by the event, if any
    #[must_use]
    pub fn variant_type(&self) -> Option<VariantType> {
        match self {
            Self::PureType { variant_type } | Self::GeneAndType { variant_type, .. } => {
                Some(*variant_type)
            }
            Self::GenePair { variant_type, .. } => *variant_type,
            Self::NoMatch => None,
        }
    }
}

/// True for event texts that are only a generic label (`Fusion`, `SV`, any
/// case) and should not be parsed at all
#[must_use]
pub fn is_placeholder_event(text: &str) -> bool {
    PLACEHOLDER_EVENTS
        .iter()
        .any(|label| label.eq_ignore_ascii_case(text))
}

/// Classify an event string.
///
/// Token roles are decided in priority order: a variant type in the first
/// token makes the event a pure type; a variant type in the second token makes
/// the first token a gene; otherwise both tokens are genes and a trailing
/// variant type is picked up if present.
#[must_use]
pub fn parse_event(text: &str) -> ParsedEvent {
    let Some(caps) = EVENT_PATTERN.captures(text) else {
        // A lone variant type keyword is a pure classification
        return match VariantType::parse(text) {
            Some(variant_type) if is_single_token(text) => ParsedEvent::PureType { variant_type },
            _ => ParsedEvent::NoMatch,
        };
    };

    let token1 = &caps[1];
    let token2 = &caps[2];

    if let Some(variant_type) = VariantType::parse(token1) {
        return ParsedEvent::PureType { variant_type };
    }

    if let Some(variant_type) = VariantType::parse(token2) {
        return ParsedEvent::GeneAndType {
            gene: token1.to_string(),
            variant_type,
        };
    }

    ParsedEvent::GenePair {
        first: token1.to_string(),
        second: token2.to_string(),
        variant_type: caps.get(3).and_then(|m| VariantType::parse(m.as_str())),
    }
}

fn is_single_token(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_pair() {
        let event = parse_event("ZSWIM4-SLC1A6");
        assert_eq!(
            event,
            ParsedEvent::GenePair {
                first: "ZSWIM4".to_string(),
                second: "SLC1A6".to_string(),
                variant_type: None,
            }
        );
        assert_eq!(event.second_gene_candidate(), Some("SLC1A6"));
        assert_eq!(event.variant_type(), None);
    }

    #[test]
    fn test_gene_pair_with_trailing_type() {
        let event = parse_event("ZNF595-TERT FUSION");
        assert_eq!(event.second_gene_candidate(), Some("TERT"));
        assert_eq!(event.variant_type(), Some(VariantType::Fusion));

        let event = parse_event("ZNF595-TERT fusion");
        assert_eq!(event.variant_type(), Some(VariantType::Fusion));
    }

    #[test]
    fn test_gene_pair_with_unknown_trailing_word() {
        let event = parse_event("EML4-ALK event");
        assert_eq!(event.second_gene_candidate(), Some("ALK"));
        assert_eq!(event.variant_type(), None);
    }

    #[test]
    fn test_gene_and_type() {
        let event = parse_event("TUFT1-intragenic");
        assert_eq!(
            event,
            ParsedEvent::GeneAndType {
                gene: "TUFT1".to_string(),
                variant_type: VariantType::Intragenic,
            }
        );
        assert_eq!(event.second_gene_candidate(), Some("TUFT1"));
    }

    #[test]
    fn test_pure_type() {
        assert_eq!(
            parse_event("INTRAGENIC"),
            ParsedEvent::PureType {
                variant_type: VariantType::Intragenic
            }
        );
        assert_eq!(
            parse_event("Deletion-Fusion").variant_type(),
            Some(VariantType::Deletion)
        );
        assert_eq!(parse_event("intragenic deletion").second_gene_candidate(), None);
    }

    #[test]
    fn test_separators() {
        assert_eq!(parse_event("BCR_ABL1").second_gene_candidate(), Some("ABL1"));
        assert_eq!(parse_event("BCR ABL1").second_gene_candidate(), Some("ABL1"));
        assert_eq!(parse_event("BCR\tABL1").second_gene_candidate(), Some("ABL1"));
    }

    #[test]
    fn test_underscore_backtracks_to_last_separator() {
        let event = parse_event("A_B_C");
        assert_eq!(
            event,
            ParsedEvent::GenePair {
                first: "A_B".to_string(),
                second: "C".to_string(),
                variant_type: None,
            }
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(parse_event("TERT"), ParsedEvent::NoMatch);
        assert_eq!(parse_event("A-B-C"), ParsedEvent::NoMatch);
        assert_eq!(parse_event("p.V600E"), ParsedEvent::NoMatch);
        assert_eq!(parse_event(""), ParsedEvent::NoMatch);
        assert_eq!(parse_event("EML4-ALK fusion extra"), ParsedEvent::NoMatch);
        assert_eq!(parse_event("GENE1-GENE2 "), ParsedEvent::NoMatch);
    }

    #[test]
    fn test_non_ascii_is_rejected() {
        assert_eq!(parse_event("BCR\u{00a0}ABL1"), ParsedEvent::NoMatch);
        assert_eq!(parse_event("GÈNE-ABL1"), ParsedEvent::NoMatch);
    }

    #[test]
    fn test_placeholder_events() {
        assert!(is_placeholder_event("Fusion"));
        assert!(is_placeholder_event("FUSION"));
        assert!(is_placeholder_event("sv"));
        assert!(!is_placeholder_event("Fusion-SV"));
        assert!(!is_placeholder_event("TERT-TERT"));
    }
}
