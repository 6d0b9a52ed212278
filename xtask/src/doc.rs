use crate::cargo::{step, OnFailure};
use anyhow::Result;
use colored::Colorize;

/// Landing page of the driver crate's rustdoc.
const DOC_INDEX: &str = "target/doc/dsi_panel/index.html";

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let mut args = vec!["doc", "--workspace", "--no-deps", "--exclude", "xtask"];
    if open {
        args.push("--open");
    }
    step("rustdoc", &args, OnFailure::Abort)?;

    if !open {
        println!("   {}", format!("Open {DOC_INDEX} in your browser").dimmed());
        println!("   {}", "Or run 'cargo xtask doc --open'".dimmed());
        println!();
    }

    Ok(())
}
