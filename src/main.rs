//! Terminal front-end.
//!
//! Reads one command per line from stdin, feeds the resulting events to the
//! controller and redraws the screen whenever the state asks for it. Fetch
//! completions and debounced search text arrive concurrently with typing.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use yamiyume::app::input::{parse_command, HELP};
use yamiyume::runtime::CatalogController;
use yamiyume::source::anilist::AniListClient;
use yamiyume::source::MediaSource;
use yamiyume::ui::helpers::CLEAR_SCREEN;
use yamiyume::{infrastructure, initialize, observability, parse_args, ui, Config, Event, Result};

const USAGE: &str = "\
Usage: yamiyume [config=<path>] [key=value ...]

Keys: endpoint, per_page, sort (popularity|score|trending), debounce_ms,
      max_attempts, backoff_ms, timeout_secs, theme (dark|light),
      theme_file, trace_level";

/// Width used when `COLUMNS` is unset or unparsable.
const DEFAULT_COLUMNS: usize = 100;

fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let (config, warnings) = match parse_args(raw).and_then(|args| Config::load(&args, &infrastructure::config_file())) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("yamiyume: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if let Some(path) = observability::init_tracing(&config) {
        tracing::info!(trace_file = %path.display(), "tracing initialized");
    }
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("yamiyume: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting on error");
            eprintln!("yamiyume: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<()> {
    let client = AniListClient::new(&config.endpoint, config.timeout())?.with_sort(config.sort);
    let source: Arc<dyn MediaSource> = Arc::new(client);
    let mut ctl = CatalogController::new(initialize(config), source, config.controller_settings());
    let cols = terminal_columns();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if ctl.dispatch(&Event::Start)? {
        draw(&ctl, cols)?;
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                let line = line.trim();
                match line {
                    "" => draw(&ctl, cols)?,
                    "help" | "?" => prompt(HELP)?,
                    _ => {
                        let events = parse_command(line);
                        if events.is_empty() {
                            prompt(&format!("Unknown command: {line}\n{HELP}"))?;
                            continue;
                        }
                        let mut render = false;
                        for event in &events {
                            render |= ctl.dispatch(event)?;
                        }
                        if ctl.is_quit() {
                            break;
                        }
                        if render {
                            draw(&ctl, cols)?;
                        }
                    }
                }
            }
            Some(event) = ctl.next_event(), if ctl.has_pending_work() => {
                if ctl.dispatch(&event)? {
                    draw(&ctl, cols)?;
                }
            }
        }
    }

    tracing::info!("session ended");
    Ok(())
}

fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .filter(|c: &usize| *c >= 40)
        .unwrap_or(DEFAULT_COLUMNS)
}

fn draw(ctl: &CatalogController, cols: usize) -> Result<()> {
    let frame = ui::render(ctl.state(), cols);
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{CLEAR_SCREEN}{frame}> ")?;
    stdout.flush()?;
    Ok(())
}

fn prompt(message: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{message}\n> ")?;
    stdout.flush()?;
    Ok(())
}
