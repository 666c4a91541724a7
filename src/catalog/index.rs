use std::collections::HashSet;

use super::store::GeneCatalog;

/// Finds catalog genes matching a free-text alias query
pub struct GeneSearch<'a> {
    catalog: &'a GeneCatalog,
}

impl<'a> GeneSearch<'a> {
    pub fn new(catalog: &'a GeneCatalog) -> Self {
        Self { catalog }
    }

    /// Genes listing `query` as an alias (case-insensitive exact match), in
    /// catalog order
    pub fn find_by_alias(&self, query: &str) -> Vec<usize> {
        self.catalog.alias_indices(query).to_vec()
    }

    /// Genes whose HUGO symbol contains `query` (case-insensitive), in catalog
    /// order
    pub fn find_by_symbol_fragment(&self, query: &str) -> Vec<usize> {
        let needle = query.trim().to_uppercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.catalog
            .genes()
            .iter()
            .enumerate()
            .filter(|(_, gene)| gene.hugo_gene_symbol.to_uppercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Alias matches first, then symbol-fragment matches, without duplicates
    pub fn search(&self, query: &str) -> Vec<usize> {
        let mut seen: HashSet<usize> = HashSet::new();
        let mut result = Vec::new();

        for idx in self
            .find_by_alias(query)
            .into_iter()
            .chain(self.find_by_symbol_fragment(query))
        {
            if seen.insert(idx) {
                result.push(idx);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::CatalogGene;

    fn make_test_catalog() -> GeneCatalog {
        let mut catalog = GeneCatalog::new();
        catalog.add_gene(CatalogGene::new(4893, "NRAS"));
        catalog.add_gene(CatalogGene::new(3845, "KRAS").with_aliases(["RASK2"]));
        catalog.add_gene(CatalogGene::new(22808, "MRAS").with_aliases(["KRAS"]));
        catalog
    }

    #[test]
    fn test_alias_hits_come_first() {
        let catalog = make_test_catalog();
        let search = GeneSearch::new(&catalog);

        // MRAS lists KRAS as an alias; KRAS matches by symbol
        assert_eq!(search.search("kras"), vec![2, 1]);
    }

    #[test]
    fn test_symbol_fragment() {
        let catalog = make_test_catalog();
        let search = GeneSearch::new(&catalog);
        assert_eq!(search.find_by_symbol_fragment("RAS"), vec![0, 1, 2]);
        assert!(search.find_by_symbol_fragment("").is_empty());
    }

    #[test]
    fn test_no_duplicates() {
        let mut catalog = make_test_catalog();
        catalog.add_gene(CatalogGene::new(1, "RASK2").with_aliases(["RASK2"]));
        let search = GeneSearch::new(&catalog);
        assert_eq!(search.search("RASK2"), vec![1, 3]);
    }
}
