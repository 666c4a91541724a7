use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::catalog::index::GeneSearch;
use crate::core::gene::GeneIdentity;
use crate::core::types::DetailLevel;
use crate::mapping::resolver::{GeneResolver, LookupOutcome, ResolverError};
use crate::parsing::ParseError;
use crate::utils::validation::MAX_SYMBOL_LENGTH;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid gene table: {0}")]
    InvalidTable(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// A gene as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogGene {
    pub entrez_gene_id: i32,

    pub hugo_gene_symbol: String,

    /// Alias and previous symbols
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Locus type (e.g. "protein-coding")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_type: Option<String>,
}

impl CatalogGene {
    pub fn new(entrez_gene_id: i32, hugo_gene_symbol: impl Into<String>) -> Self {
        Self {
            entrez_gene_id,
            hugo_gene_symbol: hugo_gene_symbol.into(),
            aliases: Vec::new(),
            gene_type: None,
        }
    }

    #[must_use]
    pub fn with_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn identity(&self) -> GeneIdentity {
        GeneIdentity::new(self.entrez_gene_id, self.hugo_gene_symbol.clone())
    }

    /// Copy trimmed to the requested detail level
    #[must_use]
    pub fn at_detail(&self, detail: DetailLevel) -> Self {
        match detail {
            DetailLevel::Detailed => self.clone(),
            DetailLevel::Summary => Self::new(self.entrez_gene_id, self.hugo_gene_symbol.clone()),
        }
    }
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub genes: Vec<CatalogGene>,
}

/// In-memory gene catalog with symbol and alias indexes
#[derive(Debug)]
pub struct GeneCatalog {
    /// All known genes
    genes: Vec<CatalogGene>,

    /// Index: upper-cased HUGO symbol -> index in genes vec
    symbol_to_index: HashMap<String, usize>,

    /// Index: upper-cased alias -> indices of genes carrying it
    alias_to_indices: HashMap<String, Vec<usize>>,
}

impl GeneCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            genes: Vec::new(),
            symbol_to_index: HashMap::new(),
            alias_to_indices: HashMap::new(),
        }
    }

    /// Load a catalog file: JSON (`.json`) or an HGNC-style table (anything else)
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = crate::parsing::read_text(path).map_err(|e| match e {
            ParseError::Io(e) => CatalogError::ReadError(e),
            other => CatalogError::InvalidTable(other.to_string()),
        })?;

        let name = path.to_string_lossy().to_lowercase();
        if name.ends_with(".json") || name.ends_with(".json.gz") {
            Self::from_json(&content)
        } else {
            Self::from_hgnc_tsv(&content)
        }
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                expected = CATALOG_VERSION,
                found = %data.version,
                "Gene catalog version mismatch"
            );
        }

        let mut catalog = Self::new();
        for gene in data.genes {
            catalog.add_gene(gene);
        }

        Ok(catalog)
    }

    /// Parse an HGNC complete-set style table.
    ///
    /// Columns are located by header name: `symbol` and `entrez_id` are
    /// required; `alias_symbol`, `prev_symbol` (both `|`-separated) and
    /// `locus_type` are optional. Rows without an Entrez id are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidTable` if required columns are missing or
    /// an Entrez id is not a number.
    pub fn from_hgnc_tsv(text: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(text.as_bytes());

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| CatalogError::InvalidTable(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        if header.iter().all(String::is_empty) {
            return Err(CatalogError::InvalidTable("No header line found".to_string()));
        }
        let column = |names: &[&str]| header.iter().position(|h| names.contains(&h.as_str()));

        let symbol_col = column(&["symbol", "hugo_gene_symbol"])
            .ok_or_else(|| CatalogError::InvalidTable("Missing 'symbol' column".to_string()))?;
        let entrez_col = column(&["entrez_id", "entrez_gene_id"])
            .ok_or_else(|| CatalogError::InvalidTable("Missing 'entrez_id' column".to_string()))?;
        let alias_col = column(&["alias_symbol", "aliases"]);
        let prev_col = column(&["prev_symbol"]);
        let type_col = column(&["locus_type", "gene_type"]);

        let mut catalog = Self::new();
        let mut skipped = 0usize;

        for row in reader.records() {
            let row = row.map_err(|e| CatalogError::InvalidTable(e.to_string()))?;
            let get = |col: Option<usize>| {
                col.and_then(|c| row.get(c))
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
            };

            let (Some(symbol), Some(entrez)) = (get(Some(symbol_col)), get(Some(entrez_col)))
            else {
                skipped += 1;
                continue;
            };

            let entrez_gene_id: i32 = entrez.parse().map_err(|_| {
                CatalogError::InvalidTable(format!(
                    "Invalid entrez id on line {}: '{entrez}'",
                    row.position().map_or(0, csv::Position::line)
                ))
            })?;

            let aliases = [alias_col, prev_col]
                .into_iter()
                .filter_map(|col| get(col))
                .flat_map(|v| v.split('|'))
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string);

            let mut gene = CatalogGene::new(entrez_gene_id, symbol).with_aliases(aliases);
            gene.gene_type = get(type_col).map(str::to_string);
            catalog.add_gene(gene);
        }

        tracing::debug!(
            genes = catalog.len(),
            skipped,
            "Loaded gene table"
        );

        Ok(catalog)
    }

    /// Add a gene to the catalog. The first gene registered under a symbol
    /// keeps it.
    pub fn add_gene(&mut self, gene: CatalogGene) {
        let index = self.genes.len();

        self.symbol_to_index
            .entry(gene.hugo_gene_symbol.to_uppercase())
            .or_insert(index);

        for alias in &gene.aliases {
            let indices = self.alias_to_indices.entry(alias.to_uppercase()).or_default();
            if !indices.contains(&index) {
                indices.push(index);
            }
        }

        self.genes.push(gene);
    }

    /// All genes, in the order they were added
    pub fn genes(&self) -> &[CatalogGene] {
        &self.genes
    }

    /// Indices of genes carrying `alias` (case-insensitive)
    pub fn alias_indices(&self, alias: &str) -> &[usize] {
        self.alias_to_indices
            .get(&alias.trim().to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get a gene by HUGO symbol (case-insensitive)
    pub fn get(&self, symbol: &str) -> Option<&CatalogGene> {
        self.symbol_to_index
            .get(&symbol.to_uppercase())
            .map(|&idx| &self.genes[idx])
    }

    /// Genes matching `query` as an alias or symbol fragment, at the requested
    /// detail level
    pub fn search_genes(&self, query: &str, detail: DetailLevel) -> Vec<CatalogGene> {
        GeneSearch::new(self)
            .search(query)
            .into_iter()
            .map(|idx| self.genes[idx].at_detail(detail))
            .collect()
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            genes: self.genes.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of genes in catalog
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl Default for GeneCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn check_query(query: &str) -> Result<(), ResolverError> {
    let reason = if query.trim().is_empty() {
        "empty query"
    } else if query.len() > MAX_SYMBOL_LENGTH {
        "query too long"
    } else {
        return Ok(());
    };
    Err(ResolverError::InvalidQuery {
        query: query.to_string(),
        reason: reason.to_string(),
    })
}

impl GeneResolver for GeneCatalog {
    fn lookup_by_symbol(&self, symbol: &str) -> LookupOutcome {
        if let Err(e) = check_query(symbol) {
            return LookupOutcome::Error(e);
        }
        self.get(symbol)
            .map_or(LookupOutcome::NotFound, |gene| LookupOutcome::Found(gene.identity()))
    }

    fn search_by_alias(
        &self,
        alias: &str,
        detail: DetailLevel,
    ) -> Result<Vec<GeneIdentity>, ResolverError> {
        check_query(alias)?;
        Ok(self
            .search_genes(alias, detail)
            .iter()
            .map(CatalogGene::identity)
            .collect())
    }
}
