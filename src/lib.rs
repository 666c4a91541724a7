//! # fusion-mapper
//!
//! A library for turning fusion mutation records into structural variant records.
//!
//! Fusion calls often arrive as ordinary mutation records whose protein change
//! carries a free-text event such as `ZSWIM4-SLC1A6`, `ZNF595-TERT fusion`, or
//! `TUFT1-intragenic`. The same fusion is frequently filed once per partner
//! gene. `fusion-mapper` collapses those duplicates, decomposes each event into
//! its second breakpoint gene and variant type, and resolves that gene against
//! a gene catalog.
//!
//! ## Features
//!
//! - **Deduplication**: One record per study, sample, and protein change
//! - **Event parsing**: Pure types, gene plus type, and gene pairs
//! - **Gene resolution**: Exact symbol lookup with alias fallback
//! - **Failure isolation**: An unresolvable gene never aborts a batch
//! - **Count conversion**: Per-gene mutation counts to structural variant counts
//!
//! ## Example
//!
//! ```rust
//! use fusion_mapper::parsing::event::is_placeholder_event;
//! use fusion_mapper::{parse_event, ParsedEvent, VariantType};
//!
//! let event = parse_event("ZNF595-TERT fusion");
//! assert_eq!(event.second_gene_candidate(), Some("TERT"));
//! assert_eq!(event.variant_type(), Some(VariantType::Fusion));
//!
//! // Generic labels are never parsed
//! assert!(is_placeholder_event("Fusion"));
//! assert_eq!(parse_event("A-B-C"), ParsedEvent::NoMatch);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Gene catalog storage and alias search
//! - [`core`]: Core data types for genes, mutations, and structural variants
//! - [`mapping`]: Deduplication, gene resolution, and the mapping engine
//! - [`parsing`]: Event grammar and TSV/CSV/JSON record readers
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod mapping;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::GeneCatalog;
pub use core::gene::GeneIdentity;
pub use core::mutation::{MutationCountByGene, MutationRecord};
pub use core::structural_variant::{StructuralVariantCountByGene, StructuralVariantRecord};
pub use core::types::*;
pub use mapping::engine::{FusionMapper, MappingConfig, MappingOutcome};
pub use mapping::resolver::{GeneResolver, LookupOutcome, ResolverError, Site2Resolution};
pub use parsing::event::{parse_event, ParsedEvent};
