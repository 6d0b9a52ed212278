use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// How a failing step affects the overall task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Print the output and stop
    Abort,
    /// Print a warning and carry on
    Warn,
}

/// Run `cargo <args>` as one labelled step, reporting timing.
///
/// Returns the captured stdout when the step passed, `None` when it failed
/// with [`OnFailure::Warn`].
pub fn step(label: &str, args: &[&str], on_failure: OnFailure) -> Result<Option<String>> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output: Output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
        println!();
        return Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()));
    }

    match on_failure {
        OnFailure::Abort => {
            eprintln!("{}", format!("  ✗ {label} failed").red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stdout));
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{label} failed");
        }
        OnFailure::Warn => {
            eprintln!("{}", format!("  ⚠ {label} reported problems").yellow().bold());
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            println!();
            Ok(None)
        }
    }
}

/// Sum of `N passed` over every `test result:` line in cargo test output.
pub fn passed_count(output: &str) -> usize {
    output
        .lines()
        .filter_map(|line| line.split("test result:").nth(1))
        .filter_map(|summary| {
            summary
                .split(';')
                .find(|part| part.contains("passed"))
                .and_then(|part| part.split_whitespace().rev().nth(1))
                .and_then(|n| n.parse::<usize>().ok())
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passed_count_sums_all_binaries() {
        let out = "\
running 3 tests
test result: ok. 3 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out

running 12 tests
test result: ok. 12 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out
";
        assert_eq!(passed_count(out), 15);
        assert_eq!(passed_count("no tests here"), 0);
    }
}
