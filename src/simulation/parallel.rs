//! Parallel session execution
//!
//! Uses Rayon to run sessions concurrently. Each session runs in its own Bevy
//! app with minimal threading to avoid hitting OS thread limits.

use rayon::prelude::*;

use super::config::SimConfig;
use super::metrics::SessionResult;
use super::runner::run_session;

/// Run one session per seed on a pool of `config.parallel` threads.
/// Results come back in seed order.
pub fn run_sessions_parallel(config: &SimConfig, seeds: &[u64]) -> Vec<SessionResult> {
    let run_all = || {
        seeds
            .par_iter()
            .map(|&seed| run_session(config, seed))
            .collect::<Vec<SessionResult>>()
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallel)
        .build()
    {
        Ok(pool) => pool.install(run_all),
        Err(e) => {
            eprintln!("Failed to build thread pool ({}), using the global pool", e);
            run_all()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::InputMode;

    #[test]
    fn test_parallel_matches_sequential() {
        let config = SimConfig {
            frames: 200,
            input: InputMode::Random,
            parallel: 2,
            quiet: true,
            ..Default::default()
        };
        let seeds = [4, 5, 6];

        let parallel = run_sessions_parallel(&config, &seeds);
        assert_eq!(parallel.len(), 3);
        for (result, &seed) in parallel.iter().zip(&seeds) {
            let sequential = run_session(&config, seed);
            assert_eq!(result.seed, seed);
            assert_eq!(result.score_text, sequential.score_text);
            assert_eq!(result.kicks, sequential.kicks);
            assert_eq!(result.touches, sequential.touches);
        }
    }
}
