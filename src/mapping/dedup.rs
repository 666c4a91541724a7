use std::collections::HashMap;

use crate::core::mutation::MutationRecord;
use crate::mapping::MappingError;

/// Grouping key: (study id, sample id, protein change), compared exactly
type FusionKey<'a> = (&'a str, &'a str, &'a str);

/// Keep one mutation per (study, sample, protein change).
///
/// Fusions are commonly reported once under each partner gene with the same
/// protein change. Within a group the retained record is replaced by any later
/// record whose protein change, upper-cased, starts with its own gene symbol;
/// otherwise the first record seen is kept. Groups come out in the order their
/// first record appeared.
///
/// With `filter_by_protein_change` unset the input is returned unchanged.
///
/// # Errors
///
/// Returns `MappingError::InvalidArgument` if filtering is requested and any
/// record lacks a protein change.
pub fn deduplicate(
    records: &[MutationRecord],
    filter_by_protein_change: bool,
) -> Result<Vec<MutationRecord>, MappingError> {
    if !filter_by_protein_change {
        return Ok(records.to_vec());
    }

    let mut slot_by_key: HashMap<FusionKey<'_>, usize> = HashMap::new();
    let mut retained: Vec<&MutationRecord> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let protein_change = record.protein_change.as_deref().ok_or_else(|| {
            MappingError::InvalidArgument(format!(
                "record {index} (study '{}', sample '{}') has no protein change to group by",
                record.study_id, record.sample_id
            ))
        })?;

        let key = (
            record.study_id.as_str(),
            record.sample_id.as_str(),
            protein_change,
        );

        match slot_by_key.get(&key) {
            None => {
                slot_by_key.insert(key, retained.len());
                retained.push(record);
            }
            Some(&slot) if record.protein_change_leads_with_own_gene() => {
                retained[slot] = record;
            }
            Some(_) => {}
        }
    }

    tracing::debug!(
        input = records.len(),
        retained = retained.len(),
        "Deduplicated fusion records by protein change"
    );

    Ok(retained.into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gene::GeneIdentity;

    fn fusion(sample: &str, symbol: &str, entrez: i32, protein_change: &str) -> MutationRecord {
        MutationRecord::new("study", sample, "patient", "study_mutations", GeneIdentity::new(entrez, symbol))
            .with_protein_change(protein_change)
            .with_mutation_type("Fusion")
    }

    #[test]
    fn test_no_filter_is_identity() {
        let records = vec![
            fusion("S1", "X", 1, "X-Y"),
            fusion("S1", "X", 1, "X-Y"),
            fusion("S1", "Z", 3, "X-Y"),
        ];
        assert_eq!(deduplicate(&records, false).unwrap(), records);
    }

    #[test]
    fn test_prefers_record_filed_under_leading_gene() {
        let records = vec![fusion("P", "Z", 3, "X-Y"), fusion("P", "X", 1, "X-Y")];
        let kept = deduplicate(&records, true).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].gene.hugo_gene_symbol, "X");

        // Same result regardless of input order
        let reversed: Vec<_> = records.into_iter().rev().collect();
        let kept = deduplicate(&reversed, true).unwrap();
        assert_eq!(kept[0].gene.hugo_gene_symbol, "X");
    }

    #[test]
    fn test_first_seen_kept_when_none_qualify() {
        let records = vec![fusion("P", "A", 1, "X-Y"), fusion("P", "B", 2, "X-Y")];
        let kept = deduplicate(&records, true).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].gene.hugo_gene_symbol, "A");
    }

    #[test]
    fn test_last_qualifying_record_wins() {
        let mut first = fusion("P", "X", 1, "X-X");
        first.center = Some("first".to_string());
        let mut second = fusion("P", "X", 1, "X-X");
        second.center = Some("second".to_string());

        let kept = deduplicate(&[first, second], true).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].center.as_deref(), Some("second"));
    }

    #[test]
    fn test_protein_change_key_is_case_sensitive() {
        let records = vec![fusion("P", "X", 1, "X-Y"), fusion("P", "X", 1, "x-y")];
        assert_eq!(deduplicate(&records, true).unwrap().len(), 2);
    }

    #[test]
    fn test_groups_by_study_and_sample() {
        let mut other_study = fusion("P", "X", 1, "X-Y");
        other_study.study_id = "other".to_string();
        let records = vec![
            fusion("P", "X", 1, "X-Y"),
            fusion("Q", "X", 1, "X-Y"),
            other_study,
        ];
        let kept = deduplicate(&records, true).unwrap();
        assert_eq!(kept.len(), 3);
        assert_eq!(kept, records);
    }

    #[test]
    fn test_output_order_is_first_seen_group_order() {
        let records = vec![
            fusion("S2", "A", 1, "A-B"),
            fusion("S1", "C", 3, "C-D"),
            fusion("S2", "B", 2, "A-B"),
        ];
        let kept = deduplicate(&records, true).unwrap();
        let samples: Vec<_> = kept.iter().map(|r| r.sample_id.as_str()).collect();
        assert_eq!(samples, vec!["S2", "S1"]);
        assert_eq!(deduplicate(&records, true).unwrap(), kept);
    }

    #[test]
    fn test_missing_protein_change_is_invalid_argument() {
        let mut record = fusion("P", "X", 1, "X-Y");
        record.protein_change = None;
        let err = deduplicate(&[record.clone()], true).unwrap_err();
        assert!(matches!(err, MappingError::InvalidArgument(_)));

        // Not grouping means no precondition
        assert_eq!(deduplicate(&[record], false).unwrap().len(), 1);
    }
}
