//! FILENAME: app/src/main.rs
// PURPOSE: `roster` CLI - fetch the roster window, apply filters, print the grid.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use app_lib::config::parse_window_days;
use app_lib::{
    create_app_state_with, get_filter_options, get_grid_view, init_log_file, install_log_bridge,
    load_schedule, log_info, log_warn, logging, render, retry_load, set_filter, LoadFailure,
    RosterConfig,
};
use chrono::Utc;
use clap::Parser;
use roster_engine::{DateFormatter, FilterAxis};
use roster_source::{save_records, FetchWindow, FileSource, RemoteSource, ScheduleSource};

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Employee work-shift roster (employees x dates)")]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Remote endpoint returning the record array (overrides config/env)
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Read records from a local JSON file instead of the endpoint
    #[arg(long)]
    file: Option<PathBuf>,

    /// Days before and after today to request
    #[arg(long, allow_hyphen_values = true, value_parser = parse_days_arg)]
    days: Option<u32>,

    /// Employee filter ("all" for no constraint)
    #[arg(long, default_value = "all")]
    employee: String,

    /// Shift filter ("all" for no constraint)
    #[arg(long, default_value = "all")]
    shift: String,

    /// Date filter, raw date key ("all" for no constraint)
    #[arg(long, default_value = "all")]
    date: String,

    /// Print the grid as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Also print the filter drop-down options
    #[arg(long)]
    options: bool,

    /// Retry a failed load up to N more times with the same window
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Write the fetched records to a JSON file
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Log file path (overrides config)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Mirror log lines to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RosterConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(url) = &cli.url {
        config.source_url = Some(url.clone());
    }
    if let Some(days) = cli.days {
        config.window_days = days;
    }
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }

    logging::set_console_echo(cli.verbose);
    let log_path = match &config.log_file {
        Some(path) => Some(init_log_file(path).map_err(|e| anyhow!(e))?),
        None => None,
    };
    install_log_bridge(if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
    if let Some(path) = &log_path {
        log_info!("SYS", "logging to {}", path.display());
    }
    log_info!("CFG", "config {:?}", config);

    let state = create_app_state_with(DateFormatter::with_offset_minutes(config.utc_offset_minutes));
    let window = FetchWindow::around(Utc::now(), config.window_days);

    if let Some(path) = &cli.file {
        run(&cli, &state, &FileSource::new(path), window).await
    } else {
        let url = config
            .source_url
            .as_deref()
            .ok_or_else(|| anyhow!("no source configured: pass --url, --file or set ROSTER_SOURCE_URL"))?;
        let source = RemoteSource::new(url, config.timeout())?;
        run(&cli, &state, &source, window).await
    }
}

async fn run<S: ScheduleSource>(
    cli: &Cli,
    state: &app_lib::AppState,
    source: &S,
    window: FetchWindow,
) -> Result<()> {
    let mut loaded = load_schedule(state, source, window).await;
    let mut attempt = 0;
    while loaded.is_err() && attempt < cli.retries {
        if !state.last_error().is_some_and(|f| f.retryable) {
            log_warn!("CMD", "not retrying: failure is not transient");
            break;
        }
        attempt += 1;
        log_info!("CMD", "retry {}/{}", attempt, cli.retries);
        loaded = retry_load(state, source).await;
    }

    if let Err(message) = loaded {
        let failure = state.last_error().unwrap_or(LoadFailure {
            message: message.clone(),
            retryable: false,
        });
        eprint!("{}", render::render_error(&failure));
        return Err(anyhow!(message));
    }

    if let Some(path) = &cli.dump {
        let store = state.store.lock().map_err(|e| anyhow!(e.to_string()))?;
        save_records(path, store.all()).with_context(|| format!("writing {}", path.display()))?;
    }

    for (axis, value) in [
        (FilterAxis::Employee, &cli.employee),
        (FilterAxis::Shift, &cli.shift),
        (FilterAxis::Date, &cli.date),
    ] {
        if value != "all" {
            set_filter(state, axis, value).map_err(|e| anyhow!(e))?;
        }
    }

    let view = get_grid_view(state).map_err(|e| anyhow!(e))?;
    let options = if cli.options {
        Some(get_filter_options(state).map_err(|e| anyhow!(e))?)
    } else {
        None
    };

    if cli.json {
        let payload = serde_json::json!({ "grid": view, "options": options });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        if let Some(options) = &options {
            print!("{}", render::render_options(options));
            println!();
        }
        print!("{}", render::render_text(&view));
    }
    Ok(())
}

fn parse_days_arg(raw: &str) -> Result<u32, String> {
    parse_window_days("--days", raw).map_err(|e| e.to_string())
}
