//! Headless front end for screen-splitter
//!
//! Reads UI events from stdin, one per line, and writes the resulting render
//! commands to stdout for a host-side script to apply.

use clap::Parser;
use screen_splitter::app::ChangeController;
use screen_splitter::config::AppConfig;
use screen_splitter::domain::core::Canvas;
use screen_splitter::input::parse_line;
use screen_splitter::platform::LineRenderer;
use screen_splitter::telemetry::{DEFAULT_LOG_LEVEL, init_tracing};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "screen-splitter", version, about = "Split a canvas into a grid of screens")]
struct Args {
    /// TOML file with canvas, defaults and limits
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas size as WIDTHxHEIGHT, overriding the config file
    #[arg(long, value_parser = parse_canvas)]
    canvas: Option<Canvas>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn parse_canvas(value: &str) -> Result<Canvas, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid width '{width}': {e}"))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid height '{height}': {e}"))?;
    Ok(Canvas::new(width, height))
}

fn load_config(args: &Args) -> Result<AppConfig, String> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path).map_err(|e| e.to_string())?,
        None => AppConfig::default(),
    };
    if let Some(canvas) = args.canvas {
        config.canvas.width = canvas.width;
        config.canvas.height = canvas.height;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("screen-splitter: {e}");
            return ExitCode::FAILURE;
        }
    };

    let renderer = LineRenderer::new(io::stdout().lock());
    let mut controller = match ChangeController::from_config(&config, renderer) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("screen-splitter: {e}");
            return ExitCode::FAILURE;
        }
    };

    let canvas = controller.canvas();
    info!(width = canvas.width, height = canvas.height, "session started");
    controller.refresh();

    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("screen-splitter: failed to read input: {e}");
                return ExitCode::FAILURE;
            }
        };

        let event = match parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = number + 1, error = %e, "skipping malformed event");
                continue;
            }
        };

        // Rejections are logged by the controller and leave state unchanged
        let _ = controller.dispatch(event);
    }

    info!(screens = controller.registry().len(), "session ended");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_argument_parses_dimensions() {
        assert_eq!(parse_canvas("1920x1080"), Ok(Canvas::new(1920, 1080)));
        assert_eq!(parse_canvas("800X600"), Ok(Canvas::new(800, 600)));
        assert!(parse_canvas("1920").is_err());
        assert!(parse_canvas("ax10").is_err());
    }

    #[test]
    fn canvas_argument_overrides_config() {
        let args = Args::parse_from(["screen-splitter", "--canvas", "1000x600"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.canvas(), Canvas::new(1000, 600));
        assert_eq!(args.log_level, DEFAULT_LOG_LEVEL);
    }
}
