use clap::{Arg, Command, value_parser};

pub const SIMULATE_CMD: &str = "simulate";
pub const DEFAULT_SAMPLES: &str = "5";

pub fn create_simulate_cli() -> Command {
    Command::new(SIMULATE_CMD)
        .about("Write a synthetic CGM table (one 288-reading day per row) for trying out the pipeline.")
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(true)
                .help("Path of the CSV to write"),
        )
        .arg(
            Arg::new("task")
                .long("task")
                .short('t')
                .value_parser(["single", "multi"])
                .default_value("single")
                .help("Label layout: a single `label` column, or the three complication columns"),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .short('n')
                .value_parser(value_parser!(usize))
                .default_value(DEFAULT_SAMPLES)
                .help("Number of rows to generate"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .help("Random seed for reproducible output"),
        )
}
