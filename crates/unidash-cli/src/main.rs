// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;

use anyhow::{Context, Result, anyhow};
use config::Config;
use std::env;
use std::path::PathBuf;
use unidash_app::{AppCommand, Dataset, Locale, ProvinceFilter, SelectionState, build_view};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `unidash --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let log_path = config.log_path()?;
    logging::init(config.log_level(), &log_path).with_context(|| {
        format!(
            "start logging to {}; set [log].path or {}",
            log_path.display(),
            logging::LOG_ENV
        )
    })?;
    tracing::info!(config = %options.config_path.display(), "unidash starting");

    let dataset = load_dataset(&options, &config)?;
    let locale = options.locale.unwrap_or_else(|| config.locale());
    let province = options
        .province
        .clone()
        .unwrap_or_else(|| config.province());
    let mut state = initial_state(&dataset, locale, province, options.select);

    if options.check_only {
        tracing::info!(records = dataset.len(), "check passed");
        return Ok(());
    }

    if options.print_views {
        println!("{}", views_json(&dataset, &state)?);
        return Ok(());
    }

    unidash_tui::run_app(&mut state, &dataset)
}

fn load_dataset(options: &CliOptions, config: &Config) -> Result<Dataset> {
    match options.dataset_path.clone().or_else(|| config.dataset_path()) {
        Some(path) => Dataset::load(&path).with_context(|| {
            format!(
                "load dataset {}; fix [data].path or pass --dataset",
                path.display()
            )
        }),
        None => Ok(Dataset::embedded()),
    }
}

/// Applies startup selections through the controller so they obey the same
/// rules as interactive ones. Startup leaves no status message behind.
fn initial_state(
    dataset: &Dataset,
    locale: Locale,
    province: ProvinceFilter,
    select: Option<usize>,
) -> SelectionState {
    let mut state = SelectionState::new(locale);
    if province != ProvinceFilter::All {
        state.dispatch(dataset, AppCommand::SetProvince(province));
    }
    if let Some(index) = select
        && state
            .dispatch(dataset, AppCommand::SelectByIndex(index))
            .is_empty()
    {
        tracing::warn!(
            index,
            province = %state.province.as_str(),
            "--select index is out of range; starting without details"
        );
    }
    state.dispatch(dataset, AppCommand::ClearStatus);
    state
}

fn views_json(dataset: &Dataset, state: &SelectionState) -> Result<String> {
    serde_json::to_string_pretty(&build_view(dataset, state)).context("encode dashboard view")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    locale: Option<Locale>,
    province: Option<ProvinceFilter>,
    dataset_path: Option<PathBuf>,
    select: Option<usize>,
    print_views: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        locale: None,
        province: None,
        dataset_path: None,
        select: None,
        print_views: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--locale" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--locale requires a value (en or fr)"))?;
                let locale = Locale::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!("--locale must be en or fr, got {:?}", value.as_ref())
                })?;
                options.locale = Some(locale);
            }
            "--province" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--province requires a province name or All"))?;
                let value = value.as_ref().trim();
                if value.is_empty() {
                    return Err(anyhow!("--province requires a province name or All"));
                }
                options.province = Some(ProvinceFilter::parse(value));
            }
            "--dataset" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--dataset requires a JSON file path"))?;
                options.dataset_path = Some(PathBuf::from(value.as_ref()));
            }
            "--select" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--select requires a bar index"))?;
                let index = value.as_ref().parse::<usize>().with_context(|| {
                    format!(
                        "--select takes a zero-based bar index, got {:?}",
                        value.as_ref()
                    )
                })?;
                options.select = Some(index);
            }
            "--print-views" => {
                options.print_views = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("unidash: university enrolment dashboard");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --locale <en|fr>         Start in English or French");
    println!("  --province <name|All>    Start with a province filter");
    println!("  --dataset <path>         Load universities from a JSON file");
    println!("  --select <index>         Start with details for bar <index>");
    println!("  --print-views            Print the dashboard as JSON and exit");
    println!("  --check                  Validate config and dataset, then exit");
    println!("  --help                   Show this help");
}
