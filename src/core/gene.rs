use serde::{Deserialize, Serialize};

/// Canonical identity of a gene: NCBI Entrez id plus HUGO symbol.
///
/// Both halves travel together; a partially-resolved gene is represented by
/// the absence of a `GeneIdentity`, never by a half-filled one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneIdentity {
    /// NCBI Entrez gene id
    pub entrez_gene_id: i32,

    /// HUGO gene symbol (e.g. "TERT")
    pub hugo_gene_symbol: String,
}

impl GeneIdentity {
    pub fn new(entrez_gene_id: i32, hugo_gene_symbol: impl Into<String>) -> Self {
        Self {
            entrez_gene_id,
            hugo_gene_symbol: hugo_gene_symbol.into(),
        }
    }

    /// Case-insensitive comparison of this gene's symbol against `symbol`
    #[must_use]
    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.hugo_gene_symbol.eq_ignore_ascii_case(symbol)
    }
}

impl std::fmt::Display for GeneIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.hugo_gene_symbol, self.entrez_gene_id)
    }
}
