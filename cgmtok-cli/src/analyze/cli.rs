use clap::{Arg, Command};

pub const ANALYZE_CMD: &str = "analyze";

pub fn create_analyze_cli() -> Command {
    Command::new(ANALYZE_CMD)
        .about("Turn the newest predictions.json under a results directory into a probability report.")
        .arg(
            Arg::new("root")
                .long("root")
                .short('r')
                .required(true)
                .help("Results directory, searched recursively"),
        )
        .arg(
            Arg::new("task")
                .long("task")
                .short('t')
                .value_parser(["single", "multi"])
                .default_value("single")
                .help("single: softmax over classes; multi: sigmoid per complication axis"),
        )
}
