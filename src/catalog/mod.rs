//! Gene catalog storage and indexing.
//!
//! The catalog holds genes with their Entrez ids, HUGO symbols, and aliases,
//! and is the reference [`GeneResolver`] used by the command-line tool.
//! Catalogs can be loaded from JSON files or from HGNC "complete set" style
//! tables.
//!
//! ## Lookups
//!
//! - **Exact**: case-insensitive HUGO symbol lookup
//! - **Alias search**: genes carrying the query as an alias, then genes whose
//!   symbol contains the query
//!
//! ## Example
//!
//! ```rust,no_run
//! use fusion_mapper::GeneCatalog;
//! use std::path::Path;
//!
//! let catalog = GeneCatalog::load_from_file(Path::new("hgnc_complete_set.txt")).unwrap();
//! let tert = catalog.get("TERT");
//!
//! // Export to JSON
//! let json = catalog.to_json().unwrap();
//! ```
//!
//! [`GeneResolver`]: crate::mapping::resolver::GeneResolver

pub mod index;
pub mod store;
