use anyhow::Result;
use comfy_table::Table;

use faers_cli::config::{FileConfig, IngestConfig, Overrides, load_config};
use faers_cli::pipeline::{WriteMode, run_ingest};
use faers_cli::types::RunResult;
use faers_model::{Dataset, ReactionPolicy};

use crate::cli::{DatasetArg, IngestArgs, ReactionArg, WriteModeArg};
use crate::summary::apply_table_style;

pub fn run_datasets() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Dataset", "File", "Description", "Columns"]);
    apply_table_style(&mut table);
    for dataset in Dataset::ALL {
        table.add_row(vec![
            format!("{dataset:?}"),
            format!("{}_<label>.csv", dataset.file_stem()),
            dataset.description().to_string(),
            dataset.header().join("\n"),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_ingest_command(args: &IngestArgs) -> Result<RunResult> {
    let file = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    let config = IngestConfig::resolve(overrides_from_args(args), file)?;
    run_ingest(&config)
}

fn overrides_from_args(args: &IngestArgs) -> Overrides {
    Overrides {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        label: args.label.clone(),
        pattern: args.pattern.clone(),
        datasets: args.dataset.map(|dataset| match dataset {
            DatasetArg::Drugs => vec![Dataset::Drugs],
            DatasetArg::Other => vec![Dataset::Demographics],
            DatasetArg::Both => Dataset::ALL.to_vec(),
        }),
        reactions: args.reactions.map(|reactions| match reactions {
            ReactionArg::First => ReactionPolicy::First,
            ReactionArg::PerReaction => ReactionPolicy::PerReaction,
        }),
        write_mode: args.write_mode.map(|mode| match mode {
            WriteModeArg::Accumulate => WriteMode::Accumulate,
            WriteModeArg::PerFile => WriteMode::PerFile,
        }),
        skip_malformed: args.skip_malformed,
        dry_run: args.dry_run,
    }
}
