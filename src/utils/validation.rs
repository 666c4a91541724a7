//! Centralized validation and helper functions.

/// Maximum number of records allowed in a single input file (DOS protection)
pub const MAX_RECORDS: usize = 1_000_000;

/// Maximum accepted length of a gene symbol or alias query
pub const MAX_SYMBOL_LENGTH: usize = 64;

/// Minimum size of an input file
pub const MIN_FILE_CONTENT_SIZE: usize = 1;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_record_limit(records.len()).is_some() {
///     return Err(...);
/// }
/// records.push(new_record); // Safe to add
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Input validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File content appears malformed or invalid")]
    InvalidFileContent,
    #[error("Invalid profile mapping '{0}': expected OLD=NEW")]
    InvalidProfileMapping(String),
    #[error("Invalid gene symbol '{0}'")]
    InvalidGeneSymbol(String),
}

/// Validate that file content is not malformed
///
/// Basic checks for file content integrity:
/// - Minimum size requirements
/// - Binary content detection for text formats
/// - UTF-8 validation
///
/// # Errors
///
/// Returns `ValidationError::InvalidFileContent` if the content is too small,
/// contains unexpected binary data for text formats, or fails UTF-8 validation.
pub fn validate_file_content(content: &[u8], expected_text: bool) -> Result<(), ValidationError> {
    if content.len() < MIN_FILE_CONTENT_SIZE {
        return Err(ValidationError::InvalidFileContent);
    }

    if expected_text {
        // Multi-byte UTF-8 is legal in free-text columns, so only control
        // bytes count against the content
        let control_count = content
            .iter()
            .filter(|&&b| b < 9 || (b > 13 && b < 32) || b == 127)
            .count();

        // Allow up to 5% control characters for text files
        if content.len() > 100 && control_count > content.len() / 20 {
            return Err(ValidationError::InvalidFileContent);
        }

        if std::str::from_utf8(content).is_err() {
            return Err(ValidationError::InvalidFileContent);
        }
    }

    Ok(())
}

/// Parse a command-line `OLD=NEW` molecular profile id substitution
///
/// # Errors
///
/// Returns `ValidationError::InvalidProfileMapping` if either side is empty or
/// the `=` separator is missing.
pub fn parse_profile_mapping(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once('=') {
        Some((old, new)) if !old.trim().is_empty() && !new.trim().is_empty() => {
            Ok((old.trim().to_string(), new.trim().to_string()))
        }
        _ => Err(ValidationError::InvalidProfileMapping(s.to_string())),
    }
}

/// Validate a gene symbol given on the command line
///
/// # Errors
///
/// Returns `ValidationError::InvalidGeneSymbol` for empty, overlong, or
/// non-printable symbols.
pub fn validate_gene_symbol(symbol: &str) -> Result<&str, ValidationError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty()
        || trimmed.len() > MAX_SYMBOL_LENGTH
        || trimmed.chars().any(char::is_control)
    {
        return Err(ValidationError::InvalidGeneSymbol(symbol.to_string()));
    }
    Ok(trimmed)
}
