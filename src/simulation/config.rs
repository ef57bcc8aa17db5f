//! Simulation configuration

use serde::{Deserialize, Serialize};

/// Which input host drives the controlled player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// No input: the player stands still and only the AI plays
    #[default]
    Idle,
    /// Seeded random stick and button combinations
    Random,
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(InputMode::Idle),
            "random" => Ok(InputMode::Random),
            other => Err(format!("Unknown input mode '{}' (expected idle or random)", other)),
        }
    }
}

/// Configuration for a headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ticks per session
    pub frames: u64,
    /// Number of sessions; session i uses seed + i
    pub sessions: u32,
    /// RNG seed for reproducibility (None = random)
    pub seed: Option<u64>,
    pub input: InputMode,
    /// Tuning JSON to use instead of config/gameplay_tuning.json
    pub tuning_file: Option<String>,
    /// Write .evlog files
    pub log_events: bool,
    pub log_dir: String,
    /// Sample a Tick event every N frames when logging (0 = never)
    pub tick_sample_frames: u64,
    /// Output file path (None = stdout)
    pub output_file: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
    /// Number of parallel threads (0 = sequential, N = N threads)
    pub parallel: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: 3600,
            sessions: 1,
            seed: None,
            input: InputMode::Idle,
            tuning_file: None,
            log_events: false,
            log_dir: "logs".to_string(),
            tick_sample_frames: 60,
            output_file: None,
            quiet: false,
            parallel: 0,
        }
    }
}

/// Template simulation settings (checked into git)
pub const SIM_SETTINGS_TEMPLATE: &str = "config/simulation_settings.template.json";
/// Local simulation settings (gitignored, user's custom settings)
pub const SIM_SETTINGS_FILE: &str = "config/simulation_settings.json";

impl SimConfig {
    /// Load configuration from a JSON settings file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
    }

    /// Load configuration from default config files
    /// Priority: local settings > template settings > built-in defaults
    pub fn from_config_files() -> Self {
        if let Ok(config) = Self::from_file(SIM_SETTINGS_FILE) {
            return config;
        }
        if let Ok(config) = Self::from_file(SIM_SETTINGS_TEMPLATE) {
            return config;
        }
        Self::default()
    }

    /// Parse configuration from the process command line
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        match Self::from_arg_list(&args) {
            Ok(Some(config)) => config,
            Ok(None) => {
                print_help();
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!("Run with --help for usage.");
                std::process::exit(2);
            }
        }
    }

    /// Apply command line arguments on top of the config files.
    /// Returns `Ok(None)` when help was requested.
    pub fn from_arg_list(args: &[String]) -> Result<Option<Self>, String> {
        let mut config = Self::from_config_files();

        // Explicit settings file replaces the file-based base config
        if let Some(pos) = args.iter().position(|a| a == "--settings") {
            let path = args
                .get(pos + 1)
                .ok_or_else(|| "--settings needs a file path".to_string())?;
            config = Self::from_file(path)?;
        }

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--settings" => {
                    i += 1;
                }
                "--frames" => {
                    config.frames = parse_number(arg_value(args, i)?, "--frames")?;
                    i += 1;
                }
                "--sessions" => {
                    config.sessions = parse_number(arg_value(args, i)?, "--sessions")?;
                    i += 1;
                }
                "--seed" => {
                    config.seed = Some(parse_number(arg_value(args, i)?, "--seed")?);
                    i += 1;
                }
                "--input" => {
                    config.input = arg_value(args, i)?.parse()?;
                    i += 1;
                }
                "--tuning" => {
                    config.tuning_file = Some(arg_value(args, i)?.clone());
                    i += 1;
                }
                "--log-events" => {
                    config.log_events = true;
                }
                "--log-dir" => {
                    config.log_dir = arg_value(args, i)?.clone();
                    i += 1;
                }
                "--tick-sample" => {
                    config.tick_sample_frames = parse_number(arg_value(args, i)?, "--tick-sample")?;
                    i += 1;
                }
                "--output" => {
                    config.output_file = Some(arg_value(args, i)?.clone());
                    i += 1;
                }
                "--quiet" | "-q" => {
                    config.quiet = true;
                }
                "--parallel" => {
                    config.parallel = parse_number(arg_value(args, i)?, "--parallel")?;
                    i += 1;
                }
                "--help" | "-h" => return Ok(None),
                other => return Err(format!("Unknown argument '{}'", other)),
            }
            i += 1;
        }

        Ok(Some(config))
    }
}

fn arg_value(args: &[String], i: usize) -> Result<&String, String> {
    args.get(i + 1)
        .ok_or_else(|| format!("{} needs a value", args[i]))
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("{} expects a number, got '{}'", flag, raw))
}

fn print_help() {
    println!(
        r#"kickabout - headless match runner

USAGE:
    cargo run --bin kickabout -- [OPTIONS]

OPTIONS:
    --settings <FILE>     Load settings from JSON file (CLI args override file settings)
    --frames <N>          Ticks per session (default: 3600)
    --sessions <N>        Number of sessions to run (default: 1)
    --seed <N>            RNG seed; session i uses seed + i
    --input <MODE>        idle | random (default: idle)
    --tuning <FILE>       Gameplay tuning JSON (default: config/gameplay_tuning.json)
    --log-events          Write .evlog files
    --log-dir <DIR>       Directory for .evlog files (default: logs)
    --tick-sample <N>     Log a Tick sample every N frames (default: 60, 0 = off)
    --output <FILE>       Output JSON to file (default: stdout)
    --quiet, -q           Suppress progress output
    --parallel <N>        Run sessions in parallel with N threads
    --help, -h            Show this help

EXAMPLES:
    # One minute of random input with a fixed seed
    cargo run --bin kickabout -- --input random --seed 42

    # Soak test: 64 sessions on 8 threads, results to a file
    cargo run --bin kickabout -- --input random --sessions 64 --parallel 8 --output soak.json
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cli_overrides() {
        let config = SimConfig::from_arg_list(&args(&[
            "--frames",
            "120",
            "--seed",
            "7",
            "--input",
            "random",
            "--sessions",
            "4",
            "-q",
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(config.frames, 120);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.input, InputMode::Random);
        assert_eq!(config.sessions, 4);
        assert!(config.quiet);
    }

    #[test]
    fn test_help_and_errors() {
        assert_eq!(SimConfig::from_arg_list(&args(&["--help"])), Ok(None));
        assert!(SimConfig::from_arg_list(&args(&["--frames"])).is_err());
        assert!(SimConfig::from_arg_list(&args(&["--frames", "lots"])).is_err());
        assert!(SimConfig::from_arg_list(&args(&["--input", "gamepad"])).is_err());
        assert!(SimConfig::from_arg_list(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_partial_settings_json() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "frames": 600, "input": "random" }"#).unwrap();
        assert_eq!(config.frames, 600);
        assert_eq!(config.input, InputMode::Random);
        assert_eq!(config.sessions, 1);
    }

    #[test]
    fn test_template_parses() {
        let config = SimConfig::from_file(SIM_SETTINGS_TEMPLATE).unwrap();
        assert_eq!(config.input, InputMode::Random);
        assert_eq!(config.parallel, 0);
    }
}
