// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use dealerdesk_api::Client;
use dealerdesk_app::{ColumnSelectCommand, ColumnSelectState, ReportService, UserId};
use dealerdesk_testkit::DealerFaker;
use logging::LogTarget;
use runtime::{ApiRuntime, DemoRuntime};
use std::env;
use std::path::PathBuf;
use tracing::info;

const DEMO_SEED: u64 = 2026;

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
            "load config {}; run `dealerdesk --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let log_target = if options.check_only {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_path()?)
    };
    logging::init_logging(config.log_level(), &log_target)?;

    let mut state = ColumnSelectState::default();
    if options.demo {
        let mut faker = DealerFaker::new(DEMO_SEED);
        let report = faker.report(ReportService::Inventory);
        if options.check_only {
            return Ok(());
        }
        info!(report = %report.id, "starting demo session");
        state.dispatch(ColumnSelectCommand::LoadReport(report));
        let mut runtime = DemoRuntime::new(faker);
        return dealerdesk_tui::run_app(&mut state, &mut runtime, &UserId::new("demo"));
    }

    let user = config.user_id()?;
    let report_id = config.report_id(options.report.as_deref())?;
    let client = Client::new(config.base_url(), config.timeout()?).with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/timeout values",
            options.config_path.display()
        )
    })?;
    let report = client
        .report(&report_id)
        .with_context(|| format!("load report {report_id}"))?;
    if options.check_only {
        info!(report = %report.id, columns = report.columns.len(), "startup check passed");
        return Ok(());
    }

    let mut runtime = ApiRuntime::new(client, report.id.clone(), config.autosave_delay()?)?;
    state.dispatch(ColumnSelectCommand::LoadReport(report));
    dealerdesk_tui::run_app(&mut state, &mut runtime, &user)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    report: Option<String>,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
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
        report: None,
        print_config_path: false,
        demo: false,
        print_example: false,
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
            "--report" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--report requires a report id"))?;
                options.report = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
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
    println!("dealerdesk: edit report columns");
    println!("  --config <path>          Use a specific config path");
    println!("  --report <id>            Edit this report instead of [report].id");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch against generated demo data (offline)");
    println!("  --check                  Validate config and reach the report service");
    println!("  --help                   Show this help");
}
