use crate::cargo::{step, OnFailure};
use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

/// Bare-metal target the driver crates must build for.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

/// Crates that ship to the target and must stay `no_std`.
const NO_STD_CRATES: [&str; 3] = ["panel-specs", "platform", "dsi-panel"];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking panel driver builds...".cyan().bold());
    println!();

    let start = Instant::now();

    for krate in NO_STD_CRATES {
        step(
            &format!("{krate} ({EMBEDDED_TARGET}, no_std)"),
            &[
                "check",
                "-p",
                krate,
                "--target",
                EMBEDDED_TARGET,
                "--no-default-features",
            ],
            OnFailure::Abort,
        )?;
    }

    step(
        &format!("dsi-panel ({EMBEDDED_TARGET}, defmt)"),
        &[
            "check",
            "-p",
            "dsi-panel",
            "--target",
            EMBEDDED_TARGET,
            "--features",
            "defmt",
        ],
        OnFailure::Abort,
    )?;

    step(
        "dsi-panel (host, std + tracing)",
        &["check", "-p", "dsi-panel", "--features", "std,tracing"],
        OnFailure::Abort,
    )?;

    step(
        "panel-specs (host, serde)",
        &["check", "-p", "panel-specs", "--features", "std,serde"],
        OnFailure::Abort,
    )?;

    step(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;

    step("rustfmt", &["fmt", "--all", "--", "--check"], OnFailure::Warn)?;

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
