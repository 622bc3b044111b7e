// Packages
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use mausam::{Orchestrator, Outcome, Presentation, View, load_config};
use tracing_subscriber::EnvFilter;

/// Weather and Hindi advisory for a city, from Open-Meteo.
/// Without CITY, reads one city per line from stdin until EOF.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// City name; several words are joined with spaces.
    city: Vec<String>,

    /// Path to YAML config. Search order if not given:
    /// $MAUSAM_CONFIG, ./config/mausam.yaml, ./mausam.yaml, ~/.config/mausam/config.yaml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of the text panel.
    #[arg(long)]
    json: bool,

    /// Write JSON here (pretty). Implies --json.
    #[arg(long)]
    out: Option<PathBuf>,
}

/* ============================ Terminal view ============================ */

/// Status goes to stderr, results to stdout (or a file).
struct TerminalView {
    json: bool,
    out: Option<PathBuf>,
    write_error: Option<anyhow::Error>,
}

impl TerminalView {
    fn emit(&self, p: &Presentation) -> Result<()> {
        if !self.json && self.out.is_none() {
            println!("{}", panel(p));
            return Ok(());
        }

        let json = serde_json::to_string_pretty(p)?;
        if let Some(path) = &self.out {
            std::fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
        } else {
            println!("{json}");
        }
        Ok(())
    }
}

impl View for TerminalView {
    fn set_loading(&mut self, _loading: bool) {}

    fn set_status(&mut self, message: &str) {
        if !message.is_empty() {
            eprintln!("{message}");
        }
    }

    fn render(&mut self, presentation: &Presentation) {
        if let Err(e) = self.emit(presentation) {
            self.write_error = Some(e);
        }
    }
}

fn panel(p: &Presentation) -> String {
    let mut s = format!(
        "{}\n  Temperature:   {} °C\n  Humidity:      {} %\n  Rain chance:   {} %\n  Precipitation: {} mm\n",
        p.location, p.temperature, p.humidity, p.rain_chance, p.precipitation
    );
    if !p.advice.is_empty() {
        s.push_str(&format!("  {}\n", p.advice));
    }
    s.push_str(&format!("  {}", p.updated_line()));
    s
}

/* ============================ Main ============================ */

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let cfg = load_config(args.config)?;
    let mut orchestrator = Orchestrator::from_config(&cfg)?;

    let mut view = TerminalView {
        json: args.json,
        out: args.out,
        write_error: None,
    };

    // ---- one-shot
    if !args.city.is_empty() {
        let outcome = orchestrator.submit(&args.city.join(" "), &mut view).await;
        if let Some(e) = view.write_error.take() {
            return Err(e);
        }
        return Ok(match outcome {
            Outcome::Displayed(_) => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::from(1),
            Outcome::Rejected => ExitCode::from(2),
        });
    }

    // ---- interactive
    let stdin = io::stdin();
    loop {
        eprint!("City: ");
        io::stderr().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        orchestrator.submit(&line, &mut view).await;
        if let Some(e) = view.write_error.take() {
            return Err(e);
        }
    }

    Ok(ExitCode::SUCCESS)
}
