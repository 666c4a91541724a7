//! Command-line interface for fusion-mapper.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **map**: Map fusion mutation records to structural variants
//! - **parse**: Show how event strings are decomposed
//! - **lookup**: Resolve a gene symbol against a gene catalog
//! - **counts**: Convert per-gene mutation counts to structural variant counts
//!
//! ## Usage
//!
//! ```text
//! # Map fusions, collapsing duplicate reports
//! fusion-mapper map fusions.tsv --genes hgnc_complete_set.txt --filter-by-protein-change
//!
//! # Rename the molecular profile on the way through
//! fusion-mapper map fusions.tsv --genes genes.json \
//!     --profile-map acc_tcga_mutations=acc_tcga_structural_variants
//!
//! # JSON output for scripting
//! fusion-mapper --format json map fusions.maf.gz --genes genes.json
//!
//! # Inspect event parsing
//! fusion-mapper parse "ZNF595-TERT fusion" "TUFT1-intragenic"
//! ```

use clap::{Parser, Subcommand};

pub mod counts;
pub mod lookup;
pub mod map;
pub mod parse;

#[derive(Parser)]
#[command(name = "fusion-mapper")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Map fusion mutation records to structural variants")]
#[command(
    long_about = "fusion-mapper turns fusion mutation records, whose protein change holds a free-text event such as 'ZSWIM4-SLC1A6' or 'TUFT1-intragenic', into structural variant records.\n\nIt provides:\n- Deduplication of fusions reported once per partner gene\n- Parsing of event strings into partner genes and variant types\n- Resolution of partner genes against a gene catalog, with alias fallback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map fusion mutation records to structural variants
    Map(map::MapArgs),

    /// Parse event strings and show their decomposition
    Parse(parse::ParseArgs),

    /// Resolve a gene symbol against a gene catalog
    Lookup(lookup::LookupArgs),

    /// Convert per-gene mutation counts to structural variant counts
    Counts(counts::CountsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Render an optional value for TSV output
pub(crate) fn tsv_field<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| tsv_text(&v.to_string())).unwrap_or_default()
}

/// Escape tabs and line breaks so free text stays within one TSV cell
pub(crate) fn tsv_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_text_escapes_separators() {
        assert_eq!(tsv_text("TERT fusion"), "TERT fusion");
        assert_eq!(tsv_text("a\tb\nc\r"), "a\\tb\\nc\\r");
        assert_eq!(tsv_text("a\\t"), "a\\\\t");
    }

    #[test]
    fn test_tsv_field() {
        assert_eq!(tsv_field(Some("x\ty")), "x\\ty");
        assert_eq!(tsv_field(Some(42)), "42");
        assert_eq!(tsv_field(None::<&str>), "");
    }
}
