use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use cgmtok_core::table::read_raw_table;
use cgmtok_io::DatasetAssembler;
use cgmtok_tokenizers::config::{TokenizerConfig, TokenizerInputFileType};
use cgmtok_tokenizers::utils::special_tokens::SpecialTokenAliases;
use cgmtok_tokenizers::{LabelBuilder, TaskKind, Tokenizer};

///
/// Build the tokenizer from either a bare vocabulary or a TOML config. The config, when
/// there is one, is returned too so its task settings can be used.
///
fn load_tokenizer(
    path: &Path,
    allow_missing: bool,
) -> Result<(Tokenizer, Option<TokenizerConfig>)> {
    match TokenizerInputFileType::from_path(path)? {
        TokenizerInputFileType::Toml => {
            let mut config = TokenizerConfig::try_from(path)
                .with_context(|| format!("Failed to read tokenizer config {}", path.display()))?;
            if allow_missing {
                config.strict_special_tokens = Some(false);
            }
            let config_dir = path.parent().unwrap_or(Path::new("."));
            let tokenizer = Tokenizer::from_tokenizer_config(&config, config_dir)?;
            Ok((tokenizer, Some(config)))
        }
        TokenizerInputFileType::Json | TokenizerInputFileType::JsonGz => {
            let tokenizer =
                Tokenizer::from_vocab_with(path, &SpecialTokenAliases::default(), !allow_missing)?;
            Ok((tokenizer, None))
        }
    }
}

pub fn run_prepare(matches: &ArgMatches) -> Result<()> {
    let vocab = matches
        .get_one::<String>("vocab")
        .expect("A path to a vocabulary or tokenizer config is required.");
    let input = matches
        .get_one::<String>("input")
        .expect("A path to the raw table is required.");
    let output = matches
        .get_one::<String>("output")
        .expect("An output directory is required.");
    let task = matches
        .get_one::<String>("task")
        .map(|t| TaskKind::from_str(t))
        .transpose()?;
    let label_column = matches.get_one::<String>("label-column").cloned();
    let allow_missing = matches.get_flag("allow-missing-special-tokens");

    let vocab = Path::new(vocab);
    let input = Path::new(input);
    let output = Path::new(output);

    let (tokenizer, config) = load_tokenizer(vocab, allow_missing)?;

    // flags win over the config
    let (config_task, config_label_column) = match config {
        Some(config) => (config.task, config.label_column),
        None => (None, None),
    };
    let task = task.or(config_task).unwrap_or_default();
    let label_column = label_column.or(config_label_column);
    let labels = LabelBuilder::for_task(task, label_column.as_deref());

    info!(
        "Tokenizer ready: {} entries, unk={}, cls={}, clamp=[{}, {}]",
        tokenizer.get_vocab_size(),
        tokenizer.get_unk_token_id(),
        tokenizer.get_cls_token_id(),
        tokenizer.get_clamp_range().min(),
        tokenizer.get_clamp_range().max()
    );

    let rows = read_raw_table(input, &labels.columns())
        .with_context(|| format!("Failed to read raw table {}", input.display()))?;
    info!("Read {} rows from {}", rows.len(), input.display());

    let bar = ProgressBar::new(rows.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );

    let mut assembler = DatasetAssembler::new(&tokenizer, &labels);
    for sample in &rows {
        assembler.push(sample)?;
        bar.inc(1);
    }
    bar.finish_with_message("encoded");

    let dataset = assembler.finish();
    dataset
        .save_to_disk(output)
        .with_context(|| format!("Failed to save dataset to {}", output.display()))?;

    println!(
        "Saved {} {}-label rows to {}",
        dataset.len(),
        dataset.task(),
        output.display()
    );

    Ok(())
}
