use crate::core::mutation::{MutationCountByGene, MutationRecord};
use crate::parsing::ParseError;
use crate::utils::validation::check_record_limit;

/// Parse a JSON array of mutation records
///
/// # Errors
///
/// Returns `ParseError::Json` if the text is not a valid array of records, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_mutations_json(text: &str) -> Result<Vec<MutationRecord>, ParseError> {
    let records: Vec<MutationRecord> = serde_json::from_str(text)?;
    if check_record_limit(records.len().saturating_sub(1)).is_some() {
        return Err(ParseError::TooManyRecords(records.len()));
    }
    Ok(records)
}

/// Parse a JSON array of per-gene mutation counts
///
/// # Errors
///
/// Returns `ParseError::Json` if the text is not a valid array of counts, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_counts_json(text: &str) -> Result<Vec<MutationCountByGene>, ParseError> {
    let counts: Vec<MutationCountByGene> = serde_json::from_str(text)?;
    if check_record_limit(counts.len().saturating_sub(1)).is_some() {
        return Err(ParseError::TooManyRecords(counts.len()));
    }
    Ok(counts)
}
