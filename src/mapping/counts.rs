use crate::core::mutation::MutationCountByGene;
use crate::core::structural_variant::StructuralVariantCountByGene;

/// Convert per-gene fusion mutation counts to structural variant counts.
/// One output per input, in input order.
#[must_use]
pub fn map_counts(counts: &[MutationCountByGene]) -> Vec<StructuralVariantCountByGene> {
    counts.iter().map(StructuralVariantCountByGene::from).collect()
}
