use thiserror::Error;

use crate::core::gene::GeneIdentity;
use crate::core::types::DetailLevel;

/// Failure of a gene resolver call itself, as opposed to a symbol that is
/// simply not known
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("Gene catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid gene query '{query}': {reason}")]
    InvalidQuery { query: String, reason: String },
}

/// Outcome of a primary, exact-symbol gene lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(GeneIdentity),
    NotFound,
    Error(ResolverError),
}

impl LookupOutcome {
    /// The resolved gene, if the lookup succeeded
    #[must_use]
    pub fn found(self) -> Option<GeneIdentity> {
        match self {
            Self::Found(gene) => Some(gene),
            Self::NotFound | Self::Error(_) => None,
        }
    }
}

/// Source of canonical gene identities.
///
/// Implementations may block (database, network); timeouts and retries are
/// their concern. Nothing is cached between calls by the mapper.
pub trait GeneResolver {
    /// Exact lookup of a HUGO symbol
    fn lookup_by_symbol(&self, symbol: &str) -> LookupOutcome;

    /// Search genes by alias or symbol fragment. Results are ordered with the
    /// best candidate first; an empty vector means nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `ResolverError` when the search itself could not be performed.
    fn search_by_alias(
        &self,
        alias: &str,
        detail: DetailLevel,
    ) -> Result<Vec<GeneIdentity>, ResolverError>;
}

impl<R: GeneResolver + ?Sized> GeneResolver for &R {
    fn lookup_by_symbol(&self, symbol: &str) -> LookupOutcome {
        (**self).lookup_by_symbol(symbol)
    }

    fn search_by_alias(
        &self,
        alias: &str,
        detail: DetailLevel,
    ) -> Result<Vec<GeneIdentity>, ResolverError> {
        (**self).search_by_alias(alias, detail)
    }
}

/// How the second breakpoint gene of an event was (or was not) resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Site2Resolution {
    /// Candidate is the mutation's own gene; no lookup was made
    SelfFusion(GeneIdentity),
    /// Exact symbol lookup succeeded
    Primary(GeneIdentity),
    /// Exact lookup missed; first alias search hit was taken
    Alias(GeneIdentity),
    /// Neither lookup found the candidate
    Unresolved,
    /// Alias search failed outright
    Failed(ResolverError),
}

impl Site2Resolution {
    #[must_use]
    pub fn gene(&self) -> Option<&GeneIdentity> {
        match self {
            Self::SelfFusion(gene) | Self::Primary(gene) | Self::Alias(gene) => Some(gene),
            Self::Unresolved | Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn into_gene(self) -> Option<GeneIdentity> {
        match self {
            Self::SelfFusion(gene) | Self::Primary(gene) | Self::Alias(gene) => Some(gene),
            Self::Unresolved | Self::Failed(_) => None,
        }
    }

    /// Short label for reporting
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SelfFusion(_) => "self",
            Self::Primary(_) => "primary",
            Self::Alias(_) => "alias",
            Self::Unresolved => "unresolved",
            Self::Failed(_) => "failed",
        }
    }
}

/// Resolve a second-gene candidate against `resolver`.
///
/// A candidate naming the record's own gene short-circuits to a self-fusion.
/// Otherwise the exact lookup is tried first; a miss or a lookup error falls
/// back to the first alias-search hit.
pub fn resolve_site2<R: GeneResolver + ?Sized>(
    resolver: &R,
    candidate: &str,
    own_gene: &GeneIdentity,
) -> Site2Resolution {
    if own_gene.has_symbol(candidate) {
        return Site2Resolution::SelfFusion(own_gene.clone());
    }

    match resolver.lookup_by_symbol(candidate) {
        LookupOutcome::Found(gene) => return Site2Resolution::Primary(gene),
        LookupOutcome::NotFound => {
            tracing::debug!(symbol = %candidate, "Gene symbol not found, trying alias search");
        }
        LookupOutcome::Error(e) => {
            tracing::debug!(symbol = %candidate, error = %e, "Gene lookup failed, trying alias search");
        }
    }

    match resolver.search_by_alias(candidate, DetailLevel::Summary) {
        Ok(genes) => genes
            .into_iter()
            .next()
            .map_or(Site2Resolution::Unresolved, Site2Resolution::Alias),
        Err(e) => Site2Resolution::Failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Resolver with canned answers that records every call
    struct ScriptedResolver {
        primary: Option<GeneIdentity>,
        primary_error: bool,
        aliases: Result<Vec<GeneIdentity>, ResolverError>,
        calls: RefCell<Vec<String>>,
    }

    impl Default for ScriptedResolver {
        fn default() -> Self {
            Self {
                primary: None,
                primary_error: false,
                aliases: Ok(Vec::new()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl GeneResolver for ScriptedResolver {
        fn lookup_by_symbol(&self, symbol: &str) -> LookupOutcome {
            self.calls.borrow_mut().push(format!("lookup:{symbol}"));
            if self.primary_error {
                return LookupOutcome::Error(ResolverError::Unavailable("down".to_string()));
            }
            self.primary
                .clone()
                .map_or(LookupOutcome::NotFound, LookupOutcome::Found)
        }

        fn search_by_alias(
            &self,
            alias: &str,
            detail: DetailLevel,
        ) -> Result<Vec<GeneIdentity>, ResolverError> {
            self.calls
                .borrow_mut()
                .push(format!("alias:{alias}:{detail}"));
            self.aliases.clone()
        }
    }

    fn tert() -> GeneIdentity {
        GeneIdentity::new(7015, "TERT")
    }

    #[test]
    fn test_self_fusion_skips_lookups() {
        let resolver = ScriptedResolver::default();
        let resolution = resolve_site2(&resolver, "tert", &tert());
        assert_eq!(resolution, Site2Resolution::SelfFusion(tert()));
        assert!(resolver.calls.borrow().is_empty());
    }

    #[test]
    fn test_primary_hit() {
        let resolver = ScriptedResolver {
            primary: Some(GeneIdentity::new(6511, "SLC1A6")),
            ..Default::default()
        };
        let resolution = resolve_site2(&resolver, "SLC1A6", &tert());
        assert_eq!(resolution, Site2Resolution::Primary(GeneIdentity::new(6511, "SLC1A6")));
        assert_eq!(*resolver.calls.borrow(), vec!["lookup:SLC1A6"]);
    }

    #[test]
    fn test_alias_fallback_takes_first_hit() {
        let resolver = ScriptedResolver {
            aliases: Ok(vec![
                GeneIdentity::new(6511, "SLC1A6"),
                GeneIdentity::new(6512, "SLC1A7"),
            ]),
            ..Default::default()
        };
        let resolution = resolve_site2(&resolver, "EAAT4", &tert());
        assert_eq!(resolution, Site2Resolution::Alias(GeneIdentity::new(6511, "SLC1A6")));
        assert_eq!(
            *resolver.calls.borrow(),
            vec!["lookup:EAAT4", "alias:EAAT4:SUMMARY"]
        );
    }

    #[test]
    fn test_lookup_error_also_falls_back() {
        let resolver = ScriptedResolver {
            primary_error: true,
            aliases: Ok(vec![GeneIdentity::new(6511, "SLC1A6")]),
            ..Default::default()
        };
        let resolution = resolve_site2(&resolver, "SLC1A6", &tert());
        assert_eq!(resolution.label(), "alias");
    }

    #[test]
    fn test_alias_empty_is_unresolved() {
        let resolver = ScriptedResolver::default();
        let resolution = resolve_site2(&resolver, "NOPE1", &tert());
        assert_eq!(resolution, Site2Resolution::Unresolved);
        assert!(resolution.gene().is_none());
    }

    #[test]
    fn test_alias_error_is_failed() {
        let resolver = ScriptedResolver {
            aliases: Err(ResolverError::Unavailable("timeout".to_string())),
            ..Default::default()
        };
        let resolution = resolve_site2(&resolver, "NOPE1", &tert());
        assert!(matches!(resolution, Site2Resolution::Failed(_)));
        assert!(resolution.into_gene().is_none());
    }
}
