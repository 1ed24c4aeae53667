mod analyze;
mod inspect;
mod prepare;
mod simulate;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "cgmtok";
    pub const DEFAULT_LOG_FILTER: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Tokenize continuous glucose monitoring tables into model-ready datasets, and analyze the predictions that come back.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(simulate::cli::create_simulate_cli())
        .subcommand(prepare::cli::create_prepare_cli())
        .subcommand(inspect::cli::create_inspect_cli())
        .subcommand(analyze::cli::create_analyze_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(consts::DEFAULT_LOG_FILTER),
    )
    .init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SYNTHETIC DATA
        //
        Some((simulate::cli::SIMULATE_CMD, matches)) => {
            simulate::handlers::run_simulate(matches)?;
        }

        //
        // TOKENIZE + PERSIST
        //
        Some((prepare::cli::PREPARE_CMD, matches)) => {
            prepare::handlers::run_prepare(matches)?;
        }

        //
        // INSPECT A SAVED DATASET
        //
        Some((inspect::cli::INSPECT_CMD, matches)) => {
            inspect::handlers::run_inspect(matches)?;
        }

        //
        // PREDICTION REPORTS
        //
        Some((analyze::cli::ANALYZE_CMD, matches)) => {
            analyze::handlers::run_analyze(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
