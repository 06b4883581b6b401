mod init;
pub use init::cmd_init;

use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::model::{PickerConfig, Selection, resolve_values};
use crate::ops::filter::FilterView;
use crate::tui::{self, RunOptions};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        None => cmd_run(cli.config.as_deref(), cli.save, !cli.no_watch, json),
        Some(Commands::Filter(args)) => cmd_filter(cli.config.as_deref(), args, json),
        Some(Commands::Options) => cmd_options(cli.config.as_deref(), json),
        Some(Commands::Init(args)) => cmd_init(args),
    }
}

/// Load the picker config from `path`, or the built-in demo when no path is given.
pub fn load_config(
    path: Option<&Path>,
) -> Result<(PickerConfig, Option<toml_edit::DocumentMut>), ConfigError> {
    match path {
        Some(p) => {
            let (config, doc) = config_io::read_config(p)?;
            Ok((config, Some(doc)))
        }
        None => Ok((PickerConfig::demo(), None)),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_run(
    config_path: Option<&Path>,
    save: bool,
    watch: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if save && config_path.is_none() {
        return Err("--save needs a config file (-c <FILE>)".into());
    }
    let (config, _) = load_config(config_path)?;

    let opts = RunOptions {
        config_path: config_path.map(Path::to_path_buf),
        watch,
    };
    let selection = tui::run(&config, &opts)?;

    if let (true, Some(path)) = (save, config_path) {
        // Re-read so edits made while the picker was open are kept
        let (_, mut doc) = config_io::read_config(path)?;
        config_io::set_selected(&mut doc, &selection);
        config_io::write_config(path, &doc)?;
        tracing::info!(path = %path.display(), count = selection.len(), "selection saved");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&selection)?);
    } else {
        print!("{}", format_selection_text(&selection));
    }
    Ok(())
}

fn cmd_filter(
    config_path: Option<&Path>,
    args: FilterArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, _) = load_config(config_path)?;
    let initial = match args.selected {
        Some(values) => {
            let values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
            resolve_values(&config.options, &values)
        }
        None => config.initial_value(),
    };
    let selection = Selection::from_options(&initial);
    let view = FilterView::compute(&config.options, &selection, &args.query);

    if json {
        println!("{}", serde_json::to_string_pretty(&filter_json(&view))?);
    } else {
        print!("{}", format_filter_text(&view));
    }
    Ok(())
}

fn cmd_options(config_path: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (config, _) = load_config(config_path)?;
    let selection = Selection::from_options(&config.initial_value());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&options_json(&config.options, &selection))?
        );
    } else {
        print!("{}", format_options_text(&config.options, &selection));
    }
    Ok(())
}
