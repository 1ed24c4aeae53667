use clap::{Arg, ArgAction, Command};

pub const PREPARE_CMD: &str = "prepare";

pub fn create_prepare_cli() -> Command {
    Command::new(PREPARE_CMD)
        .about("Tokenize a raw CGM table and save it as a dataset directory.")
        .arg(
            Arg::new("vocab")
                .long("vocab")
                .short('v')
                .required(true)
                .help("Vocabulary (.json / .json.gz) or tokenizer config (.toml)"),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .required(true)
                .help("Raw CSV table: id column, reading columns, label column(s)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(true)
                .help("Dataset directory to write; overwritten when it exists"),
        )
        .arg(
            Arg::new("task")
                .long("task")
                .short('t')
                .value_parser(["single", "multi"])
                .help("Label layout. Overrides the config's `task`; defaults to single"),
        )
        .arg(
            Arg::new("label-column")
                .long("label-column")
                .help("Source column of single-label targets. Overrides the config's `label_column`"),
        )
        .arg(
            Arg::new("allow-missing-special-tokens")
                .long("allow-missing-special-tokens")
                .action(ArgAction::SetTrue)
                .help("Fall back to id 0 when the unknown or class-start token is missing from the vocabulary"),
        )
}
