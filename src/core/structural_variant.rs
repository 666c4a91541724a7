use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::gene::GeneIdentity;
use crate::core::mutation::MutationCountByGene;

/// A structural variant derived from a fusion mutation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralVariantRecord {
    pub study_id: String,

    pub sample_id: String,

    pub patient_id: String,

    /// Molecular profile id after old-to-new substitution
    pub molecular_profile_id: String,

    /// First breakpoint gene; always the originating mutation's own gene
    pub site1_gene: GeneIdentity,

    /// Second breakpoint gene, when one could be parsed and resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site2_gene: Option<GeneIdentity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site1_chromosome: Option<String>,

    /// Start position truncated to 32 bits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site1_position: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncbi_build: Option<String>,

    /// Copied from the mutation keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// Mutation type, or the parsed variant type when the event names one
    pub variant_class: String,

    /// Raw protein-change text, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_info: Option<String>,
}

impl StructuralVariantRecord {
    /// True when both breakpoints fall in the same gene
    #[must_use]
    pub fn is_self_fusion(&self) -> bool {
        self.site2_gene.as_ref() == Some(&self.site1_gene)
    }
}

/// Per-gene structural variant counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralVariantCountByGene {
    pub entrez_gene_id: i32,
    pub hugo_gene_symbol: String,
    pub number_of_altered_cases: i32,
    pub number_of_profiled_cases: i32,
    pub total_count: i32,
    #[serde(default)]
    pub matching_gene_panel_ids: BTreeSet<String>,
}

impl From<&MutationCountByGene> for StructuralVariantCountByGene {
    fn from(count: &MutationCountByGene) -> Self {
        Self {
            entrez_gene_id: count.entrez_gene_id,
            hugo_gene_symbol: count.hugo_gene_symbol.clone(),
            number_of_altered_cases: count.number_of_altered_cases,
            number_of_profiled_cases: count.number_of_profiled_cases,
            total_count: count.total_count,
            matching_gene_panel_ids: count.matching_gene_panel_ids.clone(),
        }
    }
}
