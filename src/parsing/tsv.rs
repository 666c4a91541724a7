use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::core::gene::GeneIdentity;
use crate::core::mutation::{MutationCountByGene, MutationRecord};
use crate::parsing::ParseError;
use crate::utils::validation::check_record_limit;

/// Cell values treated as missing
const MISSING_VALUES: [&str; 3] = ["NA", "N/A", "null"];

/// Reader over a delimited table. Lines starting with `#` (MAF `#version`
/// lines) and blank lines are skipped. Quoting is honored for CSV only; MAF
/// and cBioPortal tab-separated files carry literal quote characters.
fn table_reader(text: &str, delimiter: u8, has_headers: bool) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .flexible(true)
        .quoting(delimiter != b'\t')
        .comment(Some(b'#'))
        .from_reader(text.as_bytes())
}

/// Header lookup for a delimited table. Names are matched case-insensitively.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_reader(reader: &mut csv::Reader<&[u8]>) -> Result<Self, ParseError> {
        let header = reader.headers()?;
        if header.iter().all(|name| name.trim().is_empty()) {
            return Err(ParseError::InvalidFormat(
                "No header line found".to_string(),
            ));
        }

        let index = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();
        Ok(Self { index })
    }

    /// First column present among `names`
    fn find(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.index.get(*name).copied())
    }

    fn require(&self, names: &[&'static str]) -> Result<usize, ParseError> {
        self.find(names).ok_or(ParseError::MissingColumn(names[0]))
    }
}

/// 1-based line number of a record, for error messages
fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

/// Trimmed cell content, `None` when empty, missing, or a missing-value marker
fn cell(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    let value = record.get(column?)?.trim();
    if value.is_empty() || MISSING_VALUES.iter().any(|m| m.eq_ignore_ascii_case(value)) {
        None
    } else {
        Some(value)
    }
}

/// Cell content exactly as written, `None` only when the cell is empty or
/// absent
fn verbatim_cell(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    record.get(column?).filter(|value| !value.is_empty())
}

fn required_cell<'a>(
    record: &'a StringRecord,
    column: usize,
    name: &str,
) -> Result<&'a str, ParseError> {
    cell(record, Some(column)).ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "Line {} is missing a value for '{name}'",
            line_of(record)
        ))
    })
}

fn parse_number<T: std::str::FromStr>(
    value: &str,
    name: &str,
    record: &StringRecord,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| {
        ParseError::InvalidFormat(format!(
            "Invalid {name} on line {}: '{value}'",
            line_of(record)
        ))
    })
}

/// Parse a mutation table with a header row.
///
/// Both cBioPortal-style (`hugo_gene_symbol`, `protein_change`) and MAF-style
/// (`Hugo_Symbol`, `HGVSp_Short`, `Variant_Classification`) column names are
/// accepted. The protein change is kept verbatim; every other cell is trimmed
/// and `NA`/`N/A`/`null` read as missing.
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if a required column is absent,
/// `ParseError::Csv` for unreadable rows, `ParseError::InvalidFormat` for
/// malformed values or an empty table, or `ParseError::TooManyRecords` if the
/// limit is exceeded.
pub fn parse_mutations_text(text: &str, delimiter: u8) -> Result<Vec<MutationRecord>, ParseError> {
    let mut reader = table_reader(text, delimiter, true);
    let columns = Columns::from_reader(&mut reader)?;

    let study = columns.require(&["study_id", "cancer_study_identifier"])?;
    let sample = columns.require(&["sample_id", "tumor_sample_barcode"])?;
    let symbol = columns.require(&["hugo_gene_symbol", "hugo_symbol"])?;
    let entrez = columns.require(&["entrez_gene_id"])?;
    let patient = columns.find(&["patient_id"]);
    let profile = columns.find(&["molecular_profile_id"]);
    let chr = columns.find(&["chr", "chromosome"]);
    let build = columns.find(&["ncbi_build"]);
    let center = columns.find(&["center"]);
    let start = columns.find(&["start_position"]);
    let protein_change = columns.find(&["protein_change", "hgvsp_short"]);
    let mutation_type = columns.find(&["mutation_type", "variant_classification"]);
    let keyword = columns.find(&["keyword"]);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;

        let entrez_gene_id = parse_number(
            required_cell(&row, entrez, "entrez_gene_id")?,
            "entrez_gene_id",
            &row,
        )?;
        let gene = GeneIdentity::new(
            entrez_gene_id,
            required_cell(&row, symbol, "hugo_gene_symbol")?,
        );
        let sample_id = required_cell(&row, sample, "sample_id")?;

        let mut record = MutationRecord::new(
            required_cell(&row, study, "study_id")?,
            sample_id,
            cell(&row, patient).unwrap_or(sample_id),
            cell(&row, profile).unwrap_or_default(),
            gene,
        );
        record.chr = cell(&row, chr).map(str::to_string);
        record.ncbi_build = cell(&row, build).map(str::to_string);
        record.center = cell(&row, center).map(str::to_string);
        record.start_position = cell(&row, start)
            .map(|v| parse_number(v, "start_position", &row))
            .transpose()?;
        record.protein_change = verbatim_cell(&row, protein_change).map(str::to_string);
        record.mutation_type = cell(&row, mutation_type).unwrap_or_default().to_string();
        record.keyword = cell(&row, keyword).map(str::to_string);

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No mutation records found".to_string(),
        ));
    }

    Ok(records)
}

/// Parse a per-gene mutation count table with a header row.
///
/// `matching_gene_panel_ids` may hold several ids separated by `,`, `;`, or `|`.
/// In CSV input a multi-panel cell must be quoted.
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if a required column is absent,
/// `ParseError::Csv` for unreadable rows, `ParseError::InvalidFormat` for
/// malformed values, or `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_counts_text(
    text: &str,
    delimiter: u8,
) -> Result<Vec<MutationCountByGene>, ParseError> {
    let mut reader = table_reader(text, delimiter, true);
    let columns = Columns::from_reader(&mut reader)?;

    let entrez = columns.require(&["entrez_gene_id"])?;
    let symbol = columns.require(&["hugo_gene_symbol", "hugo_symbol"])?;
    let altered = columns.require(&["number_of_altered_cases"])?;
    let profiled = columns.require(&["number_of_profiled_cases"])?;
    let total = columns.require(&["total_count"])?;
    let panels = columns.find(&["matching_gene_panel_ids"]);

    let mut counts = Vec::new();
    for row in reader.records() {
        let row = row?;
        let number = |column: usize, name: &str| -> Result<i32, ParseError> {
            parse_number(required_cell(&row, column, name)?, name, &row)
        };

        let matching_gene_panel_ids: BTreeSet<String> = cell(&row, panels)
            .map(|v| {
                v.split([',', ';', '|'])
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if check_record_limit(counts.len()).is_some() {
            return Err(ParseError::TooManyRecords(counts.len()));
        }
        counts.push(MutationCountByGene {
            entrez_gene_id: number(entrez, "entrez_gene_id")?,
            hugo_gene_symbol: required_cell(&row, symbol, "hugo_gene_symbol")?.to_string(),
            number_of_altered_cases: number(altered, "number_of_altered_cases")?,
            number_of_profiled_cases: number(profiled, "number_of_profiled_cases")?,
            total_count: number(total, "total_count")?,
            matching_gene_panel_ids,
        });
    }

    Ok(counts)
}

/// Parse a two-column old/new molecular profile id mapping file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` for lines without two fields.
pub fn parse_profile_map_file(path: &Path) -> Result<HashMap<String, String>, ParseError> {
    let content = crate::parsing::read_text(path)?;
    parse_profile_map_text(&content)
}

/// Parse tab-separated `old<TAB>new` molecular profile id pairs. An optional
/// header whose first column is `old` or `from` is skipped.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for lines without two fields.
pub fn parse_profile_map_text(text: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut map = HashMap::new();
    let mut reader = table_reader(text, b'\t', false);

    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let old = cell(&row, Some(0));
        let new = cell(&row, Some(1));

        if i == 0 && old.is_some_and(|o| o.eq_ignore_ascii_case("old") || o.eq_ignore_ascii_case("from")) {
            continue;
        }

        match (old, new) {
            (Some(old), Some(new)) => {
                map.insert(old.to_string(), new.to_string());
            }
            _ => {
                return Err(ParseError::InvalidFormat(format!(
                    "Line {} must have old and new profile ids",
                    line_of(&row)
                )))
            }
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mutations_tsv() {
        let tsv = "study_id\tsample_id\tpatient_id\tmolecular_profile_id\tentrez_gene_id\thugo_gene_symbol\tchr\tstart_position\tprotein_change\tmutation_type\tkeyword
acc_tcga\tS1\tP1\tacc_tcga_mutations\t7015\tTERT\t5\t1295228\tZNF595-TERT fusion\tFusion\tTERT fusion
acc_tcga\tS2\tP2\tacc_tcga_mutations\t7015\tTERT\t5\tNA\tFusion\tFusion\t
";
        let records = parse_mutations_text(tsv, b'\t').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].gene, GeneIdentity::new(7015, "TERT"));
        assert_eq!(records[0].start_position, Some(1_295_228));
        assert_eq!(records[0].protein_change.as_deref(), Some("ZNF595-TERT fusion"));
        assert_eq!(records[0].keyword.as_deref(), Some("TERT fusion"));
        assert_eq!(records[1].start_position, None);
        assert_eq!(records[1].keyword, None);
    }

    #[test]
    fn test_parse_maf_style_columns() {
        let maf = "#version 2.4
Hugo_Symbol\tEntrez_Gene_Id\tCenter\tNCBI_Build\tChromosome\tStart_Position\tTumor_Sample_Barcode\tHGVSp_Short\tVariant_Classification\tstudy_id
ALK\t238\tMSKCC\tGRCh37\t2\t29446394\tS-01\tEML4-ALK\tFusion\tlung_msk
";
        let records = parse_mutations_text(maf, b'\t').unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.sample_id, "S-01");
        assert_eq!(rec.patient_id, "S-01");
        assert_eq!(rec.center.as_deref(), Some("MSKCC"));
        assert_eq!(rec.ncbi_build.as_deref(), Some("GRCh37"));
        assert_eq!(rec.mutation_type, "Fusion");
        assert_eq!(rec.molecular_profile_id, "");
    }

    #[test]
    fn test_parse_mutations_csv() {
        let csv = "study_id,sample_id,entrez_gene_id,hugo_gene_symbol,protein_change
s1,p1,7015,TERT,TERT-TERT
";
        let records = parse_mutations_text(csv, b',').unwrap();
        assert_eq!(records[0].protein_change.as_deref(), Some("TERT-TERT"));
    }

    #[test]
    fn test_missing_required_column() {
        let tsv = "study_id\tsample_id\thugo_gene_symbol\ns1\tp1\tTERT\n";
        let err = parse_mutations_text(tsv, b'\t').unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn("entrez_gene_id")));
    }

    #[test]
    fn test_invalid_entrez_id() {
        let tsv = "study_id\tsample_id\tentrez_gene_id\thugo_gene_symbol\ns1\tp1\tabc\tTERT\n";
        let err = parse_mutations_text(tsv, b'\t').unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_empty_table() {
        let tsv = "study_id\tsample_id\tentrez_gene_id\thugo_gene_symbol\n";
        assert!(parse_mutations_text(tsv, b'\t').is_err());
        assert!(parse_mutations_text("", b'\t').is_err());
    }

    #[test]
    fn test_parse_counts() {
        let tsv = "entrez_gene_id\thugo_gene_symbol\tnumber_of_altered_cases\tnumber_of_profiled_cases\ttotal_count\tmatching_gene_panel_ids
238\tALK\t3\t100\t4\tIMPACT341,IMPACT468
7015\tTERT\t1\t100\t1\t
";
        let counts = parse_counts_text(tsv, b'\t').unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].total_count, 4);
        assert_eq!(counts[0].matching_gene_panel_ids.len(), 2);
        assert!(counts[1].matching_gene_panel_ids.is_empty());
    }

    #[test]
    fn test_parse_profile_map() {
        let text = "old\tnew\nstudy_mutations\tstudy_structural_variants\n";
        let map = parse_profile_map_text(text).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["study_mutations"], "study_structural_variants");

        assert!(parse_profile_map_text("only_one_column\n").is_err());
    }

    #[test]
    fn test_csv_quoted_cells() {
        let csv = "study_id,sample_id,entrez_gene_id,hugo_gene_symbol,protein_change,keyword
s1,p1,152687,ZNF595,ZNF595-TERT fusion,\"TERT fusion, in frame\"
";
        let records = parse_mutations_text(csv, b',').unwrap();
        assert_eq!(records[0].protein_change.as_deref(), Some("ZNF595-TERT fusion"));
        assert_eq!(records[0].keyword.as_deref(), Some("TERT fusion, in frame"));
    }

    #[test]
    fn test_csv_counts_with_quoted_panels() {
        let csv = "entrez_gene_id,hugo_gene_symbol,number_of_altered_cases,number_of_profiled_cases,total_count,matching_gene_panel_ids
7015,TERT,3,120,4,\"IMPACT341,IMPACT468\"
";
        let counts = parse_counts_text(csv, b',').unwrap();
        let panels: Vec<&str> = counts[0]
            .matching_gene_panel_ids
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(panels, vec!["IMPACT341", "IMPACT468"]);
    }

    #[test]
    fn test_protein_change_kept_verbatim() {
        let tsv = "study_id\tsample_id\tentrez_gene_id\thugo_gene_symbol\tprotein_change\n\
                   s1\tp1\t238\tALK\t EML4-ALK \n\
                   s1\tp2\t238\tALK\tNA\n\
                   s1\tp3\t238\tALK\t\n";
        let records = parse_mutations_text(tsv, b'\t').unwrap();
        assert_eq!(records[0].protein_change.as_deref(), Some(" EML4-ALK "));
        assert_eq!(records[1].protein_change.as_deref(), Some("NA"));
        assert_eq!(records[2].protein_change, None);
    }

    #[test]
    fn test_tsv_literal_quotes() {
        let tsv = "study_id\tsample_id\tentrez_gene_id\thugo_gene_symbol\tkeyword
s1\tp1\t7015\tTERT\t\"TERT fusion
";
        let records = parse_mutations_text(tsv, b'\t').unwrap();
        assert_eq!(records[0].keyword.as_deref(), Some("\"TERT fusion"));
    }
}
