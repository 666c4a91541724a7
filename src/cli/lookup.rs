use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::{CatalogGene, GeneCatalog};
use crate::cli::OutputFormat;
use crate::core::types::DetailLevel;
use crate::mapping::resolver::{GeneResolver, LookupOutcome};
use crate::utils::validation::validate_gene_symbol;

#[derive(Args)]
pub struct LookupArgs {
    /// Gene symbol or alias to resolve
    #[arg(required = true)]
    pub symbol: String,

    /// Gene catalog (JSON catalog or HGNC-style TSV)
    #[arg(long, required = true)]
    pub genes: PathBuf,

    /// Include aliases and gene type in alias search results
    #[arg(long)]
    pub detailed: bool,
}

/// Execute lookup subcommand
///
/// # Errors
///
/// Returns an error if the symbol is invalid, the catalog cannot be loaded,
/// or the alias search fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LookupArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let symbol = validate_gene_symbol(&args.symbol)?;
    let catalog = GeneCatalog::load_from_file(&args.genes)?;
    if verbose {
        eprintln!("Loaded gene catalog with {} genes", catalog.len());
    }

    let detail = if args.detailed {
        DetailLevel::Detailed
    } else {
        DetailLevel::Summary
    };

    let primary = match catalog.lookup_by_symbol(symbol) {
        LookupOutcome::Found(gene) => Some(gene),
        LookupOutcome::NotFound => None,
        LookupOutcome::Error(e) => return Err(e.into()),
    };
    let alias_hits = catalog.search_genes(symbol, detail);

    match format {
        OutputFormat::Text => print_text_results(symbol, primary.as_ref(), &alias_hits),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "symbol": symbol,
                "primary": primary,
                "alias_hits": alias_hits,
                "resolved": primary.clone().or_else(|| alias_hits.first().map(CatalogGene::identity)),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("source\tentrez_gene_id\thugo_gene_symbol");
            if let Some(gene) = &primary {
                println!("primary\t{}\t{}", gene.entrez_gene_id, gene.hugo_gene_symbol);
            }
            for gene in &alias_hits {
                println!("alias\t{}\t{}", gene.entrez_gene_id, gene.hugo_gene_symbol);
            }
        }
    }

    Ok(())
}

fn print_text_results(
    symbol: &str,
    primary: Option<&crate::core::gene::GeneIdentity>,
    alias_hits: &[CatalogGene],
) {
    println!("Lookup: {symbol}");
    match primary {
        Some(gene) => println!("  Exact symbol match: {gene}"),
        None => println!("  Exact symbol match: none"),
    }

    if alias_hits.is_empty() {
        println!("  Alias search: no matches");
    } else {
        println!("  Alias search ({} match(es)):", alias_hits.len());
        for gene in alias_hits {
            print!("    {} ({})", gene.hugo_gene_symbol, gene.entrez_gene_id);
            if !gene.aliases.is_empty() {
                print!("  aliases: {}", gene.aliases.join(", "));
            }
            if let Some(gene_type) = &gene.gene_type {
                print!("  type: {gene_type}");
            }
            println!();
        }
    }

    let resolved = primary
        .cloned()
        .or_else(|| alias_hits.first().map(CatalogGene::identity));
    match resolved {
        Some(gene) => println!("  Resolves to: {gene}"),
        None => println!("  Resolves to: nothing"),
    }
}
