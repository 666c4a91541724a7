use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::gene::GeneIdentity;

/// A mutation record as reported by a study, possibly describing a fusion
/// event in its protein-change text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRecord {
    pub study_id: String,

    pub sample_id: String,

    pub patient_id: String,

    pub molecular_profile_id: String,

    /// The gene the record is filed under
    pub gene: GeneIdentity,

    /// Chromosome of the reported position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chr: Option<String>,

    /// Genome build (e.g. "GRCh37")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncbi_build: Option<String>,

    /// Sequencing center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<i64>,

    /// Free-text protein change; for fusions this is the event string
    /// (e.g. "ZSWIM4-SLC1A6", "TUFT1-intragenic")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_change: Option<String>,

    /// Mutation type as reported (e.g. "Fusion")
    #[serde(default)]
    pub mutation_type: String,

    /// Keyword / comment string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl MutationRecord {
    pub fn new(
        study_id: impl Into<String>,
        sample_id: impl Into<String>,
        patient_id: impl Into<String>,
        molecular_profile_id: impl Into<String>,
        gene: GeneIdentity,
    ) -> Self {
        Self {
            study_id: study_id.into(),
            sample_id: sample_id.into(),
            patient_id: patient_id.into(),
            molecular_profile_id: molecular_profile_id.into(),
            gene,
            chr: None,
            ncbi_build: None,
            center: None,
            start_position: None,
            protein_change: None,
            mutation_type: String::new(),
            keyword: None,
        }
    }

    #[must_use]
    pub fn with_protein_change(mut self, protein_change: impl Into<String>) -> Self {
        self.protein_change = Some(protein_change.into());
        self
    }

    #[must_use]
    pub fn with_mutation_type(mut self, mutation_type: impl Into<String>) -> Self {
        self.mutation_type = mutation_type.into();
        self
    }

    #[must_use]
    pub fn with_position(mut self, chr: impl Into<String>, start_position: i64) -> Self {
        self.chr = Some(chr.into());
        self.start_position = Some(start_position);
        self
    }

    /// True when the upper-cased protein change begins with this record's own
    /// gene symbol, i.e. the record is filed under the event's leading gene
    #[must_use]
    pub fn protein_change_leads_with_own_gene(&self) -> bool {
        self.protein_change
            .as_deref()
            .is_some_and(|pc| pc.to_uppercase().starts_with(&self.gene.hugo_gene_symbol))
    }
}

/// Per-gene mutation counts aggregated over a set of samples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationCountByGene {
    pub entrez_gene_id: i32,
    pub hugo_gene_symbol: String,
    pub number_of_altered_cases: i32,
    pub number_of_profiled_cases: i32,
    pub total_count: i32,
    #[serde(default)]
    pub matching_gene_panel_ids: BTreeSet<String>,
}
