use std::collections::HashMap;

use serde::Serialize;

use crate::core::mutation::MutationRecord;
use crate::core::structural_variant::StructuralVariantRecord;
use crate::mapping::dedup::deduplicate;
use crate::mapping::resolver::{resolve_site2, GeneResolver, ResolverError, Site2Resolution};
use crate::mapping::MappingError;
use crate::parsing::event::{is_placeholder_event, parse_event, ParsedEvent};

/// Configuration for a mapping run
#[derive(Debug, Clone, Default)]
pub struct MappingConfig {
    /// Collapse records sharing (study, sample, protein change) before mapping
    pub filter_by_protein_change: bool,
    /// Old-to-new molecular profile id substitutions
    pub molecular_profile_id_map: HashMap<String, String>,
}

impl MappingConfig {
    #[must_use]
    pub fn with_filter_by_protein_change(mut self, filter: bool) -> Self {
        self.filter_by_protein_change = filter;
        self
    }

    #[must_use]
    pub fn with_profile_mapping(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.molecular_profile_id_map.insert(old.into(), new.into());
        self
    }

    /// Substituted profile id, or `profile_id` itself when no mapping exists
    #[must_use]
    pub fn map_profile_id<'a>(&'a self, profile_id: &'a str) -> &'a str {
        self.molecular_profile_id_map
            .get(profile_id)
            .map_or(profile_id, String::as_str)
    }
}

/// A single mapped record together with how its event was interpreted
#[derive(Debug, Clone)]
pub struct MappedFusion {
    pub variant: StructuralVariantRecord,

    /// Parsed event; `None` when the protein change was absent or a placeholder
    pub event: Option<ParsedEvent>,

    /// Second-gene resolution; `None` when the event named no second gene
    pub resolution: Option<Site2Resolution>,
}

/// An alias search that failed for one record of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionFailure {
    /// Position of the record in the (deduplicated) batch
    pub index: usize,
    pub study_id: String,
    pub sample_id: String,
    /// Second-gene symbol that could not be resolved
    pub symbol: String,
    pub error: String,
}

/// Result of mapping a batch: one variant per input record, plus any
/// per-record resolution failures
#[derive(Debug, Clone, Default)]
pub struct MappingOutcome {
    pub variants: Vec<StructuralVariantRecord>,
    pub failures: Vec<ResolutionFailure>,
}

impl MappingOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Maps fusion mutation records to structural variants
pub struct FusionMapper<'a, R: GeneResolver + ?Sized> {
    resolver: &'a R,
}

impl<'a, R: GeneResolver + ?Sized> FusionMapper<'a, R> {
    /// Create a mapper that resolves second genes through `resolver`
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// Map a batch of mutation records.
    ///
    /// Output order follows input order (after optional deduplication). Gene
    /// resolution problems never abort the batch: a failed alias search leaves
    /// that record without a second gene and is reported in
    /// [`MappingOutcome::failures`].
    ///
    /// # Errors
    ///
    /// Returns `MappingError::InvalidArgument` if deduplication is requested
    /// and a record has no protein change.
    pub fn map_fusions(
        &self,
        records: &[MutationRecord],
        config: &MappingConfig,
    ) -> Result<MappingOutcome, MappingError> {
        let records = deduplicate(records, config.filter_by_protein_change)?;

        let mut outcome = MappingOutcome {
            variants: Vec::with_capacity(records.len()),
            failures: Vec::new(),
        };

        for (index, record) in records.iter().enumerate() {
            let mapped = self.map_record(record, config);

            if let Some(Site2Resolution::Failed(error)) = &mapped.resolution {
                let symbol = mapped
                    .event
                    .as_ref()
                    .and_then(ParsedEvent::second_gene_candidate)
                    .unwrap_or_default()
                    .to_string();
                tracing::warn!(
                    study = %record.study_id,
                    sample = %record.sample_id,
                    symbol = %symbol,
                    error = %error,
                    "Could not resolve second fusion gene"
                );
                outcome.failures.push(failure(index, record, symbol, error));
            }

            outcome.variants.push(mapped.variant);
        }

        tracing::debug!(
            variants = outcome.variants.len(),
            failures = outcome.failures.len(),
            "Mapped fusion records"
        );

        Ok(outcome)
    }

    /// Map one record, keeping the parse and resolution details
    pub fn map_record(&self, record: &MutationRecord, config: &MappingConfig) -> MappedFusion {
        let mut variant = structural_variant_shell(record, config);

        let Some(protein_change) = record
            .protein_change
            .as_deref()
            .filter(|pc| !is_placeholder_event(pc))
        else {
            return MappedFusion {
                variant,
                event: None,
                resolution: None,
            };
        };

        let event = parse_event(protein_change);

        let resolution = event
            .second_gene_candidate()
            .map(|symbol| resolve_site2(self.resolver, symbol, &record.gene));

        if let Some(resolution) = &resolution {
            variant.site2_gene = resolution.gene().cloned();
        }

        if let Some(variant_type) = event.variant_type() {
            variant.variant_class = variant_type.as_str().to_string();
        }

        MappedFusion {
            variant,
            event: Some(event),
            resolution,
        }
    }
}

/// Structural variant populated only by direct field copies from `record`
#[must_use]
pub fn structural_variant_shell(
    record: &MutationRecord,
    config: &MappingConfig,
) -> StructuralVariantRecord {
    #[allow(clippy::cast_possible_truncation)] // Positions are stored as 32-bit
    let site1_position = record.start_position.map(|p| p as i32);

    StructuralVariantRecord {
        study_id: record.study_id.clone(),
        sample_id: record.sample_id.clone(),
        patient_id: record.patient_id.clone(),
        molecular_profile_id: config.map_profile_id(&record.molecular_profile_id).to_string(),
        site1_gene: record.gene.clone(),
        site2_gene: None,
        site1_chromosome: record.chr.clone(),
        site1_position,
        center: record.center.clone(),
        ncbi_build: record.ncbi_build.clone(),
        comments: record.keyword.clone(),
        variant_class: record.mutation_type.clone(),
        event_info: record.protein_change.clone(),
    }
}

fn failure(
    index: usize,
    record: &MutationRecord,
    symbol: String,
    error: &ResolverError,
) -> ResolutionFailure {
    ResolutionFailure {
        index,
        study_id: record.study_id.clone(),
        sample_id: record.sample_id.clone(),
        symbol,
        error: error.to_string(),
    }
}
