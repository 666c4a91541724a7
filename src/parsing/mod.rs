//! Parsers for fusion event strings and mutation input files.
//!
//! This module provides:
//!
//! - **Event strings**: Decompose `ZSWIM4-SLC1A6`-style protein changes ([`event`])
//! - **TSV/CSV tables**: Header-driven mutation, count, and profile-map tables ([`tsv`])
//! - **JSON arrays**: Serialized mutation and count records ([`json`])
//!
//! Files ending in `.gz` are decompressed transparently.
//!
//! ## Example
//!
//! ```rust
//! use fusion_mapper::parsing::event::{parse_event, ParsedEvent};
//!
//! let event = parse_event("TUFT1-intragenic");
//! assert_eq!(event.second_gene_candidate(), Some("TUFT1"));
//! ```
//!
//! ## Mutation Table Columns
//!
//! | Column | Accepted headers | Required |
//! |--------|------------------|----------|
//! | Study  | `study_id` | Yes |
//! | Sample | `sample_id`, `tumor_sample_barcode` | Yes |
//! | Gene symbol | `hugo_gene_symbol`, `hugo_symbol` | Yes |
//! | Entrez id | `entrez_gene_id` | Yes |
//! | Protein change | `protein_change`, `hgvsp_short` | No |
//! | Mutation type | `mutation_type`, `variant_classification` | No |

pub mod event;
pub mod json;
pub mod tsv;

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::utils::validation::{validate_file_content, MAX_RECORDS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Invalid delimited table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Too many records: {0} exceeds maximum allowed ({MAX_RECORDS})")]
    TooManyRecords(usize),
}

/// Tabular/serialized layouts accepted for record files
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Tsv,
    Csv,
    Json,
}

impl InputFormat {
    /// Detect the layout from the file extension, looking through a `.gz` suffix
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnsupportedFormat` for unknown extensions.
    pub fn detect(path: &Path) -> Result<Self, ParseError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        match name.rsplit_once('.').map(|(_, ext)| ext) {
            Some("tsv" | "txt" | "maf") => Ok(Self::Tsv),
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(ParseError::UnsupportedFormat(ext.to_string())),
            None => Err(ParseError::UnsupportedFormat(name.to_string())),
        }
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}

/// Read a text input file, decompressing `.gz` files on the fly
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or decompressed, or
/// `ParseError::InvalidFormat` if the content is not text.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    let mut bytes = Vec::new();
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        GzDecoder::new(file).read_to_end(&mut bytes)?;
    } else {
        std::io::BufReader::new(file).read_to_end(&mut bytes)?;
    }

    validate_file_content(&bytes, true).map_err(|e| {
        ParseError::InvalidFormat(format!("{}: {e}", path.display()))
    })?;

    String::from_utf8(bytes).map_err(|e| ParseError::InvalidFormat(e.to_string()))
}

/// Parse a mutation file in any supported layout
///
/// # Errors
///
/// Returns a `ParseError` if the file cannot be read or its content is invalid.
pub fn parse_mutation_file(
    path: &Path,
    format: Option<InputFormat>,
) -> Result<Vec<crate::core::mutation::MutationRecord>, ParseError> {
    let format = match format {
        Some(f) => f,
        None => InputFormat::detect(path)?,
    };
    let text = read_text(path)?;

    match format {
        InputFormat::Tsv => tsv::parse_mutations_text(&text, b'\t'),
        InputFormat::Csv => tsv::parse_mutations_text(&text, b','),
        InputFormat::Json => json::parse_mutations_json(&text),
    }
}

/// Parse a per-gene mutation count file in any supported layout
///
/// # Errors
///
/// Returns a `ParseError` if the file cannot be read or its content is invalid.
pub fn parse_count_file(
    path: &Path,
    format: Option<InputFormat>,
) -> Result<Vec<crate::core::mutation::MutationCountByGene>, ParseError> {
    let format = match format {
        Some(f) => f,
        None => InputFormat::detect(path)?,
    };
    let text = read_text(path)?;

    match format {
        InputFormat::Tsv => tsv::parse_counts_text(&text, b'\t'),
        InputFormat::Csv => tsv::parse_counts_text(&text, b','),
        InputFormat::Json => json::parse_counts_json(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_format() {
        assert_eq!(InputFormat::detect(Path::new("a.tsv")).unwrap(), InputFormat::Tsv);
        assert_eq!(InputFormat::detect(Path::new("a.maf.gz")).unwrap(), InputFormat::Tsv);
        assert_eq!(InputFormat::detect(Path::new("a.CSV")).unwrap(), InputFormat::Csv);
        assert_eq!(InputFormat::detect(Path::new("a.json.gz")).unwrap(), InputFormat::Json);
        assert!(InputFormat::detect(Path::new("a.bam")).is_err());
        assert!(InputFormat::detect(Path::new("noext")).is_err());
    }

    #[test]
    fn test_read_gzipped_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.tsv.gz");
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b"study_id\tsample_id\n").unwrap();
        encoder.finish().unwrap();

        let text = read_text(&path).unwrap();
        assert_eq!(text, "study_id\tsample_id\n");
    }
}
