//! Default command - aggregate every source root into the output directory

use chrono::{DateTime, Utc};

use crate::cli::{Cli, OutputFormat};
use memepack_core::error::Result;
use memepack_core::pipeline::{aggregate, AggregateOptions, Aggregation};

/// Execute the aggregation and print the run summary
pub fn execute(cli: &Cli, options: &AggregateOptions, generated_at: DateTime<Utc>) -> Result<()> {
    let result = aggregate(options, generated_at)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary_json(&result))?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                print_human(cli, &result);
            }
        }
    }

    Ok(())
}

fn summary_json(result: &Aggregation) -> serde_json::Value {
    let catalog = &result.corpus.catalog;
    serde_json::json!({
        "status": "ok",
        "sources": result.scanned.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "skipped": result.skipped.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "total_packs": catalog.total_packs,
        "total_items": catalog.total_items,
        "keywords": result.corpus.keywords.len(),
        "copied": result.stats.copied,
        "existing": result.stats.existing,
        "infos": result.outputs.infos.display().to_string(),
        "key_map": result.outputs.key_map.display().to_string(),
    })
}

fn print_human(cli: &Cli, result: &Aggregation) {
    let catalog = &result.corpus.catalog;
    println!(
        "Aggregated {} packs ({} items) from {} sources",
        catalog.total_packs,
        catalog.total_items,
        result.scanned.len()
    );

    if cli.verbose {
        for source in &result.scanned {
            println!("  scanned {}", source.display());
        }
        for source in &result.skipped {
            println!("  skipped {}", source.display());
        }
        println!(
            "  {} assets copied, {} already present",
            result.stats.copied, result.stats.existing
        );
        println!("  {} keywords", result.corpus.keywords.len());
        println!("  wrote {}", result.outputs.infos.display());
        println!("  wrote {}", result.outputs.key_map.display());
    }
}
