use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::structural_variant::StructuralVariantCountByGene;
use crate::mapping::counts::map_counts;
use crate::parsing::{self, InputFormat};

#[derive(Args)]
pub struct CountsArgs {
    /// Per-gene mutation count file (TSV, CSV, or JSON; optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input format (detected from the extension by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,
}

/// Execute counts subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CountsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let counts = parsing::parse_count_file(&args.input, args.input_format)?;
    if verbose {
        eprintln!("Parsed {} gene counts", counts.len());
    }

    let sv_counts = map_counts(&counts);

    match format {
        OutputFormat::Text => print_text_results(&sv_counts),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sv_counts)?),
        OutputFormat::Tsv => print_tsv_results(&sv_counts),
    }

    Ok(())
}

fn print_text_results(counts: &[StructuralVariantCountByGene]) {
    println!("Structural Variant Counts");
    println!("{}", "=".repeat(60));
    for count in counts {
        println!(
            "{:<12} {:>8}  altered {}/{} profiled, total {}",
            count.hugo_gene_symbol,
            count.entrez_gene_id,
            count.number_of_altered_cases,
            count.number_of_profiled_cases,
            count.total_count,
        );
    }
}

fn print_tsv_results(counts: &[StructuralVariantCountByGene]) {
    println!(
        "entrez_gene_id\thugo_gene_symbol\tnumber_of_altered_cases\tnumber_of_profiled_cases\ttotal_count\tmatching_gene_panel_ids"
    );
    for count in counts {
        let panels: Vec<&str> = count
            .matching_gene_panel_ids
            .iter()
            .map(String::as_str)
            .collect();
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            count.entrez_gene_id,
            count.hugo_gene_symbol,
            count.number_of_altered_cases,
            count.number_of_profiled_cases,
            count.total_count,
            panels.join(","),
        );
    }
}
