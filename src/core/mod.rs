//! Core data types for fusion-to-structural-variant mapping.
//!
//! - [`GeneIdentity`]: Entrez id + HUGO symbol pair
//! - [`MutationRecord`]: A reported mutation, possibly a fusion event
//! - [`StructuralVariantRecord`]: The structured variant produced from a mutation
//! - [`MutationCountByGene`], [`StructuralVariantCountByGene`]: Per-gene aggregates
//! - [`VariantType`], [`DetailLevel`]: Classification and lookup enums
//!
//! ## Event Strings
//!
//! Fusion events arrive as loosely structured protein-change text:
//!
//! | Event               | Second gene | Variant class |
//! |---------------------|-------------|---------------|
//! | `ZSWIM4-SLC1A6`     | SLC1A6      | (mutation type) |
//! | `ZNF595-TERT fusion`| TERT        | FUSION        |
//! | `TUFT1-intragenic`  | TUFT1       | INTRAGENIC    |
//! | `INTRAGENIC`        | -           | INTRAGENIC    |
//!
//! The first breakpoint is never taken from the event text; it is always the
//! gene the mutation is filed under.
//!
//! [`GeneIdentity`]: gene::GeneIdentity
//! [`MutationRecord`]: mutation::MutationRecord
//! [`MutationCountByGene`]: mutation::MutationCountByGene
//! [`StructuralVariantRecord`]: structural_variant::StructuralVariantRecord
//! [`StructuralVariantCountByGene`]: structural_variant::StructuralVariantCountByGene
//! [`VariantType`]: types::VariantType
//! [`DetailLevel`]: types::DetailLevel

pub mod gene;
pub mod mutation;
pub mod structural_variant;
pub mod types;
