//! Kickabout headless runner - plays sessions without rendering and reports results
//!
//! Usage:
//!   cargo run -- --help
//!   cargo run -- --frames 3600 --input random --seed 7
//!   cargo run -- --sessions 20 --parallel 4 --output results.json -q
//!   cargo run -- --log-events --tick-sample 30

use kickabout::simulation::{SimConfig, run_simulation};

fn main() {
    let config = SimConfig::from_args();
    run_simulation(config);
}
