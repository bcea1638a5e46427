#![deny(unsafe_code)]
//! CLI binary for the polymer sketch.
//!
//! Subcommands:
//! - `render [engine]`: run the frame loop headlessly and write a PNG
//! - `list`: print available engines, modes and palettes
//! - `schema <engine>`: print an engine's parameter schema

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use polymer_sketch_core::{Engine, Palette, Seed};
use polymer_sketch_engines::EngineKind;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Modes understood by the `polymer` engine.
const MODES: &[&str] = &["fade", "wrap"];

#[derive(Parser)]
#[command(name = "polymer-sketch", version, about = "Polymer particle sketch CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Logging verbosity (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the sketch for N frames and write a PNG snapshot.
    Render {
        /// Engine name.
        #[arg(default_value = "polymer")]
        engine: String,

        /// Simulation mode (fade or wrap).
        #[arg(short, long)]
        mode: Option<String>,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 400)]
        height: usize,

        /// Number of frames to draw.
        #[arg(short, long, default_value_t = 300)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Palette name (polymer, ocean, ember, moss, monochrome).
        #[arg(short, long, default_value = "polymer")]
        palette: String,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Engine parameters as a JSON object, e.g. '{"polymer": 40}'.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available engines, modes and palettes.
    List,
    /// Print the parameter schema of an engine.
    Schema {
        /// Engine name.
        engine: String,
    },
}

fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    // A subscriber can only be installed once per process; later calls keep the first.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Parses `--params` and folds `--mode` and `--palette` into it.
fn build_params(raw: &str, mode: Option<&str>, palette: &str) -> Result<Value, CliError> {
    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let mut map: Map<String, Value> = match parsed {
        Value::Object(map) => map,
        other => {
            return Err(CliError::Input(format!(
                "--params must be a JSON object, got {other}"
            )))
        }
    };

    Palette::from_name(palette).map_err(|e| CliError::Input(e.to_string()))?;
    map.insert("palette".into(), Value::from(palette));

    if let Some(mode) = mode {
        if !MODES.contains(&mode) {
            return Err(CliError::Input(format!(
                "unknown mode '{mode}' (expected one of: {})",
                MODES.join(", ")
            )));
        }
        map.insert("mode".into(), Value::from(mode));
    }
    Ok(Value::Object(map))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "engines": engines,
                    "modes": MODES,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
                println!("Modes:");
                println!("  {}", MODES.join(", "));
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Schema { engine } => {
            let eng = EngineKind::from_name(&engine, 1, 1, 0, &Value::Object(Map::new()))?;
            println!("{}", serde_json::to_string_pretty(&eng.param_schema())?);
        }
        Command::Render {
            engine,
            mode,
            width,
            height,
            frames,
            seed,
            palette,
            output,
            params,
        } => {
            let mut run_seed = Seed::new(&engine, width, height, seed);
            run_seed.params = build_params(&params, mode.as_deref(), &palette)?;
            run_seed.frames = frames;
            debug!(params = %run_seed.params, "resolved parameters");
            info!(%engine, width, height, frames, seed, "rendering");

            let (canvas, sketch) = polymer_sketch_engines::render(&run_seed)?;
            polymer_sketch_engines::snapshot::write_png(&canvas, &output)?;

            let population = sketch.engine().population();
            // Echo the fully resolved parameters so the run can be replayed.
            run_seed.params = sketch.engine().params();
            info!(output = %output.display(), population, "snapshot written");

            if cli.json {
                let info = serde_json::json!({
                    "seed": run_seed,
                    "particles": population,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {engine} ({width}x{height}, {frames} frames, seed {seed}, {population} particles) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_defaults_match_sketch_canvas() {
        let cli = Cli::try_parse_from(["polymer-sketch", "render"]).unwrap();
        match cli.command {
            Command::Render {
                engine,
                mode,
                width,
                height,
                frames,
                ..
            } => {
                assert_eq!(engine, "polymer");
                assert!(mode.is_none());
                assert_eq!((width, height, frames), (800, 400, 300));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli =
            Cli::try_parse_from(["polymer-sketch", "list", "--json", "--log-level", "debug"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn build_params_folds_mode_and_palette() {
        let params = build_params(r#"{"polymer": 40}"#, Some("wrap"), "ember").unwrap();
        assert_eq!(
            params,
            json!({"polymer": 40, "mode": "wrap", "palette": "ember"})
        );
    }

    #[test]
    fn build_params_without_mode_leaves_it_unset() {
        let params = build_params("{}", None, "polymer").unwrap();
        assert!(params.get("mode").is_none());
    }

    #[test]
    fn build_params_rejects_bad_input() {
        assert_eq!(build_params("{oops", None, "polymer").unwrap_err().exit_code(), 12);
        assert_eq!(build_params("[1]", None, "polymer").unwrap_err().exit_code(), 12);
        assert_eq!(build_params("{}", Some("spin"), "polymer").unwrap_err().exit_code(), 12);
        assert_eq!(build_params("{}", None, "plaid").unwrap_err().exit_code(), 12);
    }

    #[test]
    fn params_rejected_by_the_engine_exit_12() {
        let params = build_params(r#"{"mode": "spin"}"#, None, "polymer").unwrap();
        let err = EngineKind::from_name("polymer", 8, 8, 1, &params)
            .err()
            .map(CliError::from)
            .unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn oversized_concentration_renders_a_bounded_population() {
        let mut seed = Seed::new("polymer", 40, 20, 1);
        seed.params = build_params(r#"{"concentration": 1e20}"#, Some("wrap"), "polymer").unwrap();
        seed.frames = 1;
        let (_, sketch) = polymer_sketch_engines::render(&seed).unwrap();
        assert_eq!(sketch.engine().population(), 300);
    }
}
