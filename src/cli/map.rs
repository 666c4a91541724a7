use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::GeneCatalog;
use crate::cli::{tsv_field, tsv_text, OutputFormat};
use crate::mapping::engine::{FusionMapper, MappingConfig, MappingOutcome};
use crate::parsing::{self, InputFormat};
use crate::utils::validation::parse_profile_mapping;

#[derive(Args)]
pub struct MapArgs {
    /// Mutation file (TSV, MAF, CSV, or JSON; optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input format (detected from the extension by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,

    /// Gene catalog (JSON catalog or HGNC-style TSV)
    #[arg(long, required = true)]
    pub genes: PathBuf,

    /// Keep one record per study, sample, and protein change
    #[arg(long)]
    pub filter_by_protein_change: bool,

    /// Molecular profile id substitution (repeatable)
    #[arg(long = "profile-map", value_name = "OLD=NEW", value_parser = parse_profile_mapping)]
    pub profile_map: Vec<(String, String)>,

    /// Two-column TSV of old and new molecular profile ids
    #[arg(long)]
    pub profile_map_file: Option<PathBuf>,

    /// Exit with an error if any second gene could not be resolved
    #[arg(long)]
    pub strict: bool,
}

/// Execute map subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be parsed, deduplication preconditions
/// fail, or `--strict` is set and some gene resolution failed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MapArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = build_config(&args)?;

    let records = parsing::parse_mutation_file(&args.input, args.input_format)?;
    if verbose {
        eprintln!("Parsed {} mutation records", records.len());
    }

    let catalog = GeneCatalog::load_from_file(&args.genes)?;
    if verbose {
        eprintln!("Loaded gene catalog with {} genes", catalog.len());
    }
    if catalog.is_empty() {
        eprintln!("Warning: Gene catalog is empty, second genes will not be resolved.");
    }

    let mapper = FusionMapper::new(&catalog);
    let outcome = mapper.map_fusions(&records, &config)?;

    match format {
        OutputFormat::Text => print_text_results(&outcome, verbose),
        OutputFormat::Json => print_json_results(&outcome)?,
        OutputFormat::Tsv => print_tsv_results(&outcome),
    }

    if args.strict && !outcome.is_complete() {
        anyhow::bail!(
            "{} record(s) had unresolvable second genes",
            outcome.failures.len()
        );
    }

    Ok(())
}

fn build_config(args: &MapArgs) -> anyhow::Result<MappingConfig> {
    let mut config =
        MappingConfig::default().with_filter_by_protein_change(args.filter_by_protein_change);

    if let Some(path) = &args.profile_map_file {
        config.molecular_profile_id_map = parsing::tsv::parse_profile_map_file(path)?;
    }
    // Command-line pairs override the file
    for (old, new) in &args.profile_map {
        config = config.with_profile_mapping(old, new);
    }

    Ok(config)
}

fn print_text_results(outcome: &MappingOutcome, verbose: bool) {
    println!("Structural Variants");
    println!("{}", "=".repeat(60));

    for sv in &outcome.variants {
        let site2 = sv
            .site2_gene
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        println!(
            "\n{} / {}: {} -> {} [{}]",
            sv.study_id, sv.sample_id, sv.site1_gene, site2, sv.variant_class
        );
        if verbose {
            println!("  Profile: {}", sv.molecular_profile_id);
            if let Some(event) = &sv.event_info {
                println!("  Event: {event}");
            }
            if let (Some(chr), Some(pos)) = (&sv.site1_chromosome, sv.site1_position) {
                println!("  Site 1: {chr}:{pos}");
            }
        }
    }

    println!(
        "\n{} structural variant(s), {} with a second gene",
        outcome.variants.len(),
        outcome
            .variants
            .iter()
            .filter(|sv| sv.site2_gene.is_some())
            .count()
    );

    if !outcome.failures.is_empty() {
        println!("\nResolution failures:");
        for failure in &outcome.failures {
            println!(
                "  #{} {} / {}: '{}' ({})",
                failure.index, failure.study_id, failure.sample_id, failure.symbol, failure.error
            );
        }
    }
}

fn print_json_results(outcome: &MappingOutcome) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "variants": outcome.variants,
        "failures": outcome.failures,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(outcome: &MappingOutcome) {
    println!(
        "study_id\tsample_id\tpatient_id\tmolecular_profile_id\tsite1_entrez_gene_id\tsite1_hugo_symbol\tsite2_entrez_gene_id\tsite2_hugo_symbol\tsite1_chromosome\tsite1_position\tcenter\tncbi_build\tvariant_class\tevent_info\tcomments"
    );
    for sv in &outcome.variants {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            tsv_text(&sv.study_id),
            tsv_text(&sv.sample_id),
            tsv_text(&sv.patient_id),
            tsv_text(&sv.molecular_profile_id),
            sv.site1_gene.entrez_gene_id,
            tsv_text(&sv.site1_gene.hugo_gene_symbol),
            tsv_field(sv.site2_gene.as_ref().map(|g| g.entrez_gene_id)),
            tsv_field(sv.site2_gene.as_ref().map(|g| &g.hugo_gene_symbol)),
            tsv_field(sv.site1_chromosome.as_ref()),
            tsv_field(sv.site1_position),
            tsv_field(sv.center.as_ref()),
            tsv_field(sv.ncbi_build.as_ref()),
            tsv_text(&sv.variant_class),
            tsv_field(sv.event_info.as_ref()),
            tsv_field(sv.comments.as_ref()),
        );
    }
}
