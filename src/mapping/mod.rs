//! Fusion-to-structural-variant mapping.
//!
//! This module provides the mapping pipeline:
//!
//! - [`FusionMapper`]: Main entry point, maps a batch of mutation records
//! - [`deduplicate`]: Collapses duplicate reports of the same fusion
//! - [`GeneResolver`]: Trait for the external gene catalog
//! - [`map_counts`]: Per-gene count passthrough
//!
//! ## Mapping Steps
//!
//! 1. **Deduplication** (optional): one record per (study, sample, protein change)
//! 2. **Shell**: direct field copies; site 1 is always the record's own gene
//! 3. **Event parsing**: protein change decomposed into genes and variant type
//! 4. **Second-gene resolution**: self-fusion shortcut, exact lookup, then alias search
//!
//! ## Example
//!
//! ```rust
//! use fusion_mapper::{FusionMapper, GeneCatalog, GeneIdentity, MappingConfig, MutationRecord};
//!
//! let mut catalog = GeneCatalog::new();
//! catalog.add_gene(fusion_mapper::catalog::store::CatalogGene::new(6511, "SLC1A6"));
//!
//! let record = MutationRecord::new("study", "S1", "P1", "study_mutations",
//!     GeneIdentity::new(65249, "ZSWIM4"))
//!     .with_protein_change("ZSWIM4-SLC1A6")
//!     .with_mutation_type("Fusion");
//!
//! let mapper = FusionMapper::new(&catalog);
//! let outcome = mapper.map_fusions(&[record], &MappingConfig::default()).unwrap();
//! assert_eq!(outcome.variants[0].site2_gene, Some(GeneIdentity::new(6511, "SLC1A6")));
//! ```
//!
//! [`FusionMapper`]: engine::FusionMapper
//! [`deduplicate`]: dedup::deduplicate
//! [`GeneResolver`]: resolver::GeneResolver
//! [`map_counts`]: counts::map_counts

pub mod counts;
pub mod dedup;
pub mod engine;
pub mod resolver;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
