//! Example: Check an OIFITS dataset and optionally filter it.
//!
//! Usage:
//!   cargo run --example check_report -- <dataset.json> [filter.json] [output.json]
//!
//! Example:
//!   cargo run --example check_report -- night1.json snr_cut.json night1_filtered.json

use std::env;
use std::path::Path;

use oifits::{ConformanceChecker, FilterSpec, Severity, filter, read_dataset, write_dataset};

fn main() -> oifits::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: cargo run --example check_report -- <dataset.json> [filter.json] [output.json]"
        );
        eprintln!("\nExample:");
        eprintln!(
            "  cargo run --example check_report -- night1.json snr_cut.json night1_filtered.json"
        );
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("OIFITS Check: {}", file_path);
    println!("{}", separator);
    println!();

    let mut dataset = read_dataset(path)?;

    if let Some(filter_path) = args.get(2) {
        let spec = FilterSpec::from_json_file(filter_path)?;
        dataset = filter(&dataset, &spec);
        println!("## Filtered with {}", filter_path);
        println!();
    }

    println!("## Summary");
    print!("{}", dataset.summary());
    println!();

    let missing = dataset.missing_references();
    if !missing.is_empty() {
        println!("## Missing References ({}):", missing.len());
        for reference in &missing {
            println!("  {}", reference);
        }
        println!();
    }

    let report = ConformanceChecker::new().run(&dataset);
    println!("## Checks");
    for named in &report.results {
        println!("  {:24} {}", named.check, named.result);
    }
    println!();

    let worst = report.worst_level();
    println!("## Result");
    match worst {
        Severity::None => println!("  Conformant"),
        level => println!("  Worst level: {}", level),
    }
    println!();

    if let Some(output) = args.get(3) {
        write_dataset(&dataset, output)?;
        println!("Wrote {}", output);
    }

    println!("{}", separator);

    Ok(())
}
