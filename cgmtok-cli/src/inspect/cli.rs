use clap::{Arg, Command, value_parser};

pub const INSPECT_CMD: &str = "inspect";
pub const DEFAULT_ROWS: &str = "5";

pub fn create_inspect_cli() -> Command {
    Command::new(INSPECT_CMD)
        .about("Summarize a dataset directory written by `prepare`.")
        .arg(Arg::new("dataset").required(true).help("Dataset directory"))
        .arg(
            Arg::new("rows")
                .long("rows")
                .short('n')
                .value_parser(value_parser!(usize))
                .default_value(DEFAULT_ROWS)
                .help("Number of rows to preview"),
        )
}
