use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;

use cgmtok_sim::write_simulated_table;
use cgmtok_tokenizers::TaskKind;

pub fn run_simulate(matches: &ArgMatches) -> Result<()> {
    let output = matches
        .get_one::<String>("output")
        .expect("An output path is required.");
    let task = matches
        .get_one::<String>("task")
        .expect("A task kind is required.");
    let samples = *matches
        .get_one::<usize>("samples")
        .expect("A sample count is required.");
    let seed = matches.get_one::<u64>("seed").copied();

    let task = TaskKind::from_str(task)?;
    let output = Path::new(output);

    let rows = write_simulated_table(output, task, samples, seed)
        .with_context(|| format!("Failed to write simulated table to {}", output.display()))?;

    println!(
        "Simulated {} {}-label rows ({} readings each) -> {}",
        rows.len(),
        task,
        rows.first().map(|r| r.len()).unwrap_or(0),
        output.display()
    );

    Ok(())
}
