//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios                   # Run all scenarios
//!   cargo run --bin test-scenarios -- skills/        # Run one category
//!   cargo run --bin test-scenarios -- shooting/power_cap
//!   cargo run --bin test-scenarios -- --verbose      # Expected/actual on failure

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use kickabout::testing::{SCENARIOS_DIR, TestResult, parser::parse_test_file, run_test};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let filter = args.iter().find(|a| !a.starts_with('-')).cloned();

    println!("Kickabout Scenarios");
    println!("===================\n");

    let scenarios_path = Path::new(SCENARIOS_DIR);
    if !scenarios_path.exists() {
        eprintln!("No scenarios directory found at {}", SCENARIOS_DIR);
        std::process::exit(1);
    }

    let tests = discover_tests(scenarios_path, filter.as_deref());
    if tests.is_empty() {
        eprintln!(
            "No scenario files found{}",
            filter.map(|f| format!(" matching '{}'", f)).unwrap_or_default()
        );
        std::process::exit(1);
    }

    let mut passed = 0;
    let mut failing: Vec<String> = Vec::new();
    let mut current_category = String::new();

    for test_path in &tests {
        let rel_path = test_path.strip_prefix(scenarios_path).unwrap_or(test_path);

        if let Some(parent) = rel_path.parent() {
            let category = parent.to_string_lossy().to_string();
            if category != current_category && !category.is_empty() {
                if !current_category.is_empty() {
                    println!();
                }
                println!("{}/", category);
                current_category = category;
            }
        }

        let test_name = rel_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let result = match parse_test_file(test_path) {
            Ok(def) => run_test(&def),
            Err(message) => TestResult::Error { message },
        };

        if matches!(result, TestResult::Pass { .. }) {
            passed += 1;
        } else {
            failing.push(rel_path.display().to_string());
        }
        print_result(&test_name, &result, verbose);
    }

    println!("\n===================");
    println!("Results: {} passed, {} failing", passed, failing.len());
    for name in &failing {
        println!("  - {}", name);
    }

    if !failing.is_empty() {
        std::process::exit(1);
    }
}

fn discover_tests(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut tests = Vec::new();
    discover_tests_recursive(base, base, filter, &mut tests);
    tests.sort();
    tests
}

fn discover_tests_recursive(
    base: &Path,
    current: &Path,
    filter: Option<&str>,
    tests: &mut Vec<PathBuf>,
) {
    let Ok(entries) = fs::read_dir(current) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            discover_tests_recursive(base, &path, filter, tests);
        } else if path.extension().is_some_and(|e| e == "toml") {
            let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
            if filter.is_none_or(|f| rel.contains(f)) {
                tests.push(path);
            }
        }
    }
}

fn print_result(name: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(40 - name.len().min(39));

    match result {
        TestResult::Pass { frames } => {
            println!("  {} {} PASS ({} frames)", name, dots, frames);
        }
        TestResult::Fail { error } => {
            println!("  {} {} FAIL", name, dots);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
