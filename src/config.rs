use std::fmt;
use std::str::FromStr;

use clap::Parser;

use crate::simulation::{Rule, Shape};

// ============================================
// Simulation defaults
// ============================================

/// Fraction of cells alive in a random fill (startup and reseed)
pub const DEFAULT_START_DENSITY: f64 = 0.1;

/// Per-cell, per-step probability of a random birth (0 = off)
pub const DEFAULT_NOISE_DENSITY: f64 = 0.0;

/// Steps before exiting
pub const DEFAULT_STEPS: u64 = 1_000_000_000;

// ============================================
// Display and pacing defaults
// ============================================

/// Screen pixels per cell edge
pub const DEFAULT_PX_SIZE: u32 = 2;

/// Steps between renders
pub const DEFAULT_SKIP: u32 = 1;

/// Upper bound on steps per second
pub const DEFAULT_FPS: f64 = 100.0;

/// Window size relative to the primary monitor
pub const DEFAULT_WINDOW_FRACTION: f64 = 0.75;

/// Window size used when the monitor size is unknown
pub const FALLBACK_WINDOW_SIZE: (u32, u32) = (1024, 768);

/// Grid size in terminal mode
pub const DEFAULT_TEXT_SIZE: (usize, usize) = (24, 80);

/// Target fps is multiplied or divided by this on PageUp/PageDown
pub const FPS_STEP_FACTOR: f64 = 1.25;

/// Target fps is kept within these bounds
pub const MIN_FPS: f64 = 0.1;
pub const MAX_FPS: f64 = 1_000_000.0;

const KEYS_HELP: &str = "\
Keys:
  PageUp/PageDown       Raise/lower max fps
  Ctrl+PageUp/PageDown  Raise/lower skip
  R                     Reseed
  Escape/F4             Quit";

/// Settings owned by the simulation core.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub rule: Rule,
    /// `None` seeds with a random fill
    pub shape: Option<&'static Shape>,
    pub start_density: f64,
    pub noise_density: f64,
    pub periodic: bool,
    pub reset_on_stabilize: bool,
    /// `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rule: Rule::conway(),
            shape: None,
            start_density: DEFAULT_START_DENSITY,
            noise_density: DEFAULT_NOISE_DENSITY,
            periodic: true,
            reset_on_stabilize: true,
            seed: None,
        }
    }
}

/// How the simulation is driven and displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frontend {
    Window,
    Text,
}

/// Settings for the driver loop around the core.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub frontend: Frontend,
    pub px_size: u32,
    pub steps: u64,
    pub skip: u32,
    pub fps: f64,
    pub window_fraction: f64,
    pub text_size: (usize, usize),
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frontend: Frontend::Window,
            px_size: DEFAULT_PX_SIZE,
            steps: DEFAULT_STEPS,
            skip: DEFAULT_SKIP,
            fps: DEFAULT_FPS,
            window_fraction: DEFAULT_WINDOW_FRACTION,
            text_size: DEFAULT_TEXT_SIZE,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub sim: SimConfig,
    pub run: RunConfig,
}

/// Game of life!
#[derive(Debug, Parser)]
#[command(name = "game-of-life", version, after_help = KEYS_HELP)]
pub struct Args {
    /// Initial pattern instead of a random fill
    #[arg(long, value_name = "NAME", value_parser = Shape::find)]
    shape: Option<&'static Shape>,

    /// Rules in b3/s23 format
    #[arg(long, value_name = "RULES", default_value = "b3/s23", value_parser = Rule::parse)]
    rules: Rule,

    /// Pixel size
    #[arg(
        long,
        alias = "px_size",
        value_name = "N",
        default_value_t = DEFAULT_PX_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    px_size: u32,

    /// Steps before exiting
    #[arg(long, value_name = "N", default_value_t = DEFAULT_STEPS)]
    steps: u64,

    /// Steps between rendering
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_SKIP,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    skip: u32,

    /// Max fps
    #[arg(long, value_name = "F", default_value_t = DEFAULT_FPS, value_parser = parse_fps)]
    fps: f64,

    /// Density of random fills
    #[arg(
        long,
        alias = "start_rand",
        value_name = "F",
        default_value_t = DEFAULT_START_DENSITY,
        value_parser = parse_probability
    )]
    start_rand: f64,

    /// Noise per step
    #[arg(long, value_name = "F", default_value_t = DEFAULT_NOISE_DENSITY, value_parser = parse_probability)]
    noise: f64,

    /// Continue even if it's stabilized
    #[arg(long, alias = "no_reset")]
    no_reset: bool,

    /// Disable periodic boundaries
    #[arg(long, alias = "no_periodic")]
    no_periodic: bool,

    /// Window size relative to the screen
    #[arg(
        long,
        alias = "window_fraction",
        value_name = "F",
        default_value_t = DEFAULT_WINDOW_FRACTION,
        value_parser = parse_window_fraction
    )]
    window_fraction: f64,

    /// Seed for the random number generator
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Draw in the terminal instead of a window
    #[arg(long)]
    text: bool,

    /// Grid size in terminal mode
    #[arg(
        long,
        value_name = "ROWSxCOLS",
        default_value_t = TextSize(DEFAULT_TEXT_SIZE.0, DEFAULT_TEXT_SIZE.1)
    )]
    size: TextSize,

    /// Print the available shapes and exit
    #[arg(long, alias = "list_shapes")]
    pub list_shapes: bool,
}

/// Terminal grid dimensions parsed from a ROWSxCOLS argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TextSize(usize, usize);

impl FromStr for TextSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (rows, cols) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| "expected format ROWSxCOLS".to_string())?;

        let rows = rows
            .trim()
            .parse::<usize>()
            .map_err(|error| format!("invalid rows: {error}"))?;
        let cols = cols
            .trim()
            .parse::<usize>()
            .map_err(|error| format!("invalid columns: {error}"))?;

        if rows == 0 || cols == 0 {
            return Err("grid dimensions must be positive".to_string());
        }

        Ok(Self(rows, cols))
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.1)
    }
}

fn parse_float(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|error| format!("invalid number: {error}"))
}

fn parse_probability(value: &str) -> Result<f64, String> {
    let p = parse_float(value)?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err("expected a probability in [0, 1]".to_string())
    }
}

fn parse_fps(value: &str) -> Result<f64, String> {
    let fps = parse_float(value)?;
    if (MIN_FPS..=MAX_FPS).contains(&fps) {
        Ok(fps)
    } else {
        Err(format!("expected a rate in [{MIN_FPS}, {MAX_FPS}]"))
    }
}

fn parse_window_fraction(value: &str) -> Result<f64, String> {
    let fraction = parse_float(value)?;
    if fraction > 0.0 && fraction <= 1.0 {
        Ok(fraction)
    } else {
        Err("expected a value in (0, 1]".to_string())
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            sim: SimConfig {
                rule: args.rules,
                shape: args.shape,
                start_density: args.start_rand,
                noise_density: args.noise,
                periodic: !args.no_periodic,
                reset_on_stabilize: !args.no_reset,
                seed: args.seed,
            },
            run: RunConfig {
                frontend: if args.text {
                    Frontend::Text
                } else {
                    Frontend::Window
                },
                px_size: args.px_size,
                steps: args.steps,
                skip: args.skip,
                fps: args.fps,
                window_fraction: args.window_fraction,
                text_size: (args.size.0, args.size.1),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("game-of-life").chain(args.iter().copied()))
    }

    fn run(args: &[&str]) -> Config {
        match parse(args) {
            Ok(args) => Config::from(args),
            Err(e) => panic!("expected a run config, got {e}"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let config = run(&[]);
        assert!(config.sim.rule.is_conway());
        assert_eq!(config.sim.rule, Rule::parse("b3/s23").unwrap());
        assert!(config.sim.shape.is_none());
        assert_eq!(config.sim.start_density, 0.1);
        assert_eq!(config.sim.noise_density, 0.0);
        assert!(config.sim.periodic);
        assert!(config.sim.reset_on_stabilize);
        assert_eq!(config.sim.seed, None);
        assert_eq!(config.run, RunConfig::default());
        assert_eq!(config.run.frontend, Frontend::Window);
    }

    #[test]
    fn test_all_flags() {
        let config = run(&[
            "--rules", "B36/S23", "--shape", "acorn", "--px-size", "4", "--steps", "500",
            "--skip", "3", "--fps", "30", "--start-rand", "0.25", "--noise", "0.001",
            "--no-reset", "--no-periodic", "--window-fraction", "0.5", "--seed", "7",
            "--text", "--size", "30x100",
        ]);
        assert_eq!(config.sim.rule.to_string(), "B36/S23");
        assert_eq!(config.sim.shape.map(|s| s.name), Some("acorn"));
        assert_eq!(config.sim.start_density, 0.25);
        assert_eq!(config.sim.noise_density, 0.001);
        assert!(!config.sim.periodic);
        assert!(!config.sim.reset_on_stabilize);
        assert_eq!(config.sim.seed, Some(7));
        assert_eq!(config.run.px_size, 4);
        assert_eq!(config.run.steps, 500);
        assert_eq!(config.run.skip, 3);
        assert_eq!(config.run.fps, 30.0);
        assert_eq!(config.run.window_fraction, 0.5);
        assert_eq!(config.run.frontend, Frontend::Text);
        assert_eq!(config.run.text_size, (30, 100));
    }

    #[test]
    fn test_underscore_aliases() {
        let config = run(&["--start_rand", "0.3", "--px_size", "3", "--no_reset"]);
        assert_eq!(config.sim.start_density, 0.3);
        assert_eq!(config.run.px_size, 3);
        assert!(!config.sim.reset_on_stabilize);
    }

    #[test]
    fn test_help_and_list() {
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse(&["-h"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert!(parse(&["--list-shapes"]).unwrap().list_shapes);
    }

    #[test]
    fn test_bad_rule_is_fatal() {
        let err = parse(&["--rules", "b3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("bad rules string"), "{err}");
    }

    #[test]
    fn test_unknown_shape_is_fatal() {
        let err = parse(&["--shape", "pond"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("unknown shape"), "{err}");
    }

    #[test]
    fn test_missing_value() {
        assert!(parse(&["--fps"]).is_err());
    }

    #[test]
    fn test_unknown_flag() {
        assert_eq!(
            parse(&["--turbo"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn test_out_of_range_values() {
        for args in [
            &["--noise", "1.5"][..],
            &["--start-rand=-0.1"],
            &["--skip", "0"],
            &["--px-size", "0"],
            &["--fps", "0"],
            &["--fps", "1e9"],
            &["--fps", "fast"],
            &["--window-fraction", "1.2"],
            &["--size", "0x10"],
            &["--size", "10"],
        ] {
            assert_eq!(
                parse(args).unwrap_err().kind(),
                ErrorKind::ValueValidation,
                "{args:?} should be rejected"
            );
        }
    }
}
