use clap::Args;

use crate::cli::{tsv_field, tsv_text, OutputFormat};
use crate::parsing::event::{is_placeholder_event, parse_event, ParsedEvent};

#[derive(Args)]
pub struct ParseArgs {
    /// Event strings to parse (e.g. "ZNF595-TERT fusion")
    #[arg(required = true, num_args = 1..)]
    pub events: Vec<String>,

    /// Gene the mutation is filed under; flags self-fusions
    #[arg(long)]
    pub gene: Option<String>,
}

/// An event string with its interpretation
struct ParsedInput<'a> {
    text: &'a str,
    /// `None` for placeholder labels, which are never parsed
    event: Option<ParsedEvent>,
    self_fusion: bool,
}

/// Execute parse subcommand
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ParseArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let parsed: Vec<ParsedInput<'_>> = args
        .events
        .iter()
        .map(|text| {
            let event = (!is_placeholder_event(text)).then(|| parse_event(text));
            let self_fusion = match (&args.gene, event.as_ref().and_then(ParsedEvent::second_gene_candidate)) {
                (Some(gene), Some(candidate)) => gene.eq_ignore_ascii_case(candidate),
                _ => false,
            };
            ParsedInput {
                text,
                event,
                self_fusion,
            }
        })
        .collect();

    match format {
        OutputFormat::Text => print_text_results(&parsed),
        OutputFormat::Json => print_json_results(&parsed)?,
        OutputFormat::Tsv => print_tsv_results(&parsed),
    }

    Ok(())
}

fn kind(event: Option<&ParsedEvent>) -> &'static str {
    match event {
        None => "placeholder",
        Some(ParsedEvent::PureType { .. }) => "pure_type",
        Some(ParsedEvent::GeneAndType { .. }) => "gene_and_type",
        Some(ParsedEvent::GenePair { .. }) => "gene_pair",
        Some(ParsedEvent::NoMatch) => "no_match",
    }
}

fn print_text_results(parsed: &[ParsedInput<'_>]) {
    for input in parsed {
        println!("{}", input.text);
        println!("  Kind: {}", kind(input.event.as_ref()));
        if let Some(ParsedEvent::GenePair { first, .. }) = &input.event {
            println!("  First gene (ignored): {first}");
        }
        if let Some(candidate) = input.event.as_ref().and_then(ParsedEvent::second_gene_candidate) {
            let note = if input.self_fusion { " (self-fusion)" } else { "" };
            println!("  Second gene: {candidate}{note}");
        }
        if let Some(variant_type) = input.event.as_ref().and_then(ParsedEvent::variant_type) {
            println!("  Variant type: {variant_type}");
        }
    }
}

fn print_json_results(parsed: &[ParsedInput<'_>]) -> anyhow::Result<()> {
    let output: Vec<_> = parsed
        .iter()
        .map(|input| {
            serde_json::json!({
                "event": input.text,
                "kind": kind(input.event.as_ref()),
                "parsed": input.event,
                "second_gene": input.event.as_ref().and_then(ParsedEvent::second_gene_candidate),
                "variant_type": input.event.as_ref().and_then(ParsedEvent::variant_type),
                "self_fusion": input.self_fusion,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(parsed: &[ParsedInput<'_>]) {
    println!("event\tkind\tsecond_gene\tvariant_type\tself_fusion");
    for input in parsed {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            tsv_text(input.text),
            kind(input.event.as_ref()),
            tsv_field(input.event.as_ref().and_then(ParsedEvent::second_gene_candidate)),
            tsv_field(input.event.as_ref().and_then(ParsedEvent::variant_type)),
            input.self_fusion,
        );
    }
}
