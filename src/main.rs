use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;

use receipt_processor::{normalize, scoring, RawReceipt};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("score") => match args.get(2) {
            Some(path) => run_score(Path::new(path)),
            None => bail!("usage: receipt-processor score <receipt.json>"),
        },
        _ => {
            print_usage();
            Ok(())
        }
    }
}

/// Score a receipt file offline and print the per-rule breakdown
fn run_score(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    let raw: RawReceipt =
        serde_json::from_str(&content).context("Failed to parse receipt JSON")?;

    let receipt = normalize(&raw).context("Failed to normalize receipt")?;
    let breakdown = scoring::breakdown(&receipt);

    println!("🧾 {} ({} items)", receipt.retailer, receipt.items.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (rule, points) in breakdown.rules() {
        println!("  {:<24} {:>5}", rule, points);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {:<24} {:>5}", "total", breakdown.total());

    Ok(())
}

fn print_usage() {
    println!("receipt-processor {}", receipt_processor::VERSION);
    println!();
    println!("Usage:");
    println!("  receipt-processor score <receipt.json>   Score a receipt file");
    println!();
    println!("Run the HTTP API with: cargo run --bin receipt-server");
}
