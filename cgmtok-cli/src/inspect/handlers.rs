use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use cgmtok_io::EncodedDataset;

pub fn run_inspect(matches: &ArgMatches) -> Result<()> {
    let dataset = matches
        .get_one::<String>("dataset")
        .expect("A dataset directory is required.");
    let rows = *matches
        .get_one::<usize>("rows")
        .expect("A preview row count is required.");

    let dir = Path::new(dataset);
    let dataset = EncodedDataset::load_from_disk(dir)
        .with_context(|| format!("Failed to load dataset from {}", dir.display()))?;

    println!("Dataset:     {}", dir.display());
    println!("Task:        {}", dataset.task());
    println!("Rows:        {}", dataset.len());
    println!("Fingerprint: {}", dataset.fingerprint());

    for (field, counts) in dataset.label_counts() {
        let counts: Vec<String> = counts
            .iter()
            .map(|(value, count)| format!("{value}: {count}"))
            .collect();
        println!("Label {:?}: {}", field, counts.join(", "));
    }

    if !dataset.is_empty() {
        println!("{}", dataset.preview(rows)?);
    }

    Ok(())
}
