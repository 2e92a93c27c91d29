//! SlackWeb Lua generator CLI
//!
//! Command-line interface for scraping the Slack Web API documentation and
//! generating the Lua client library.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use slackweb_luagen_common::{artifact, MethodTree};
use slackweb_luagen_generator::LuaGenerator;
use slackweb_luagen_scraper::{Collector, DocsClient};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "slackweb-luagen")]
#[command(version, about = "Generate a Lua client for the Slack Web API from its documentation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the documentation site and write the method-tree artifact
    #[command(after_help = "EXAMPLES:\n  \
        # Scrape every documented method into slackweb.json\n  \
        slackweb-luagen scrape\n\n  \
        # Write the artifact somewhere else\n  \
        slackweb-luagen scrape --output methods.json")]
    Scrape {
        /// Path for the JSON artifact
        #[arg(short, long, default_value = "slackweb.json")]
        output: PathBuf,
    },

    /// Generate the Lua client library
    #[command(after_help = "EXAMPLES:\n  \
        # Scrape live, print the Lua library to stdout\n  \
        slackweb-luagen generate\n\n  \
        # Generate from a previously scraped artifact\n  \
        slackweb-luagen generate --local slackweb.json --output slackweb.lua")]
    Generate {
        /// Path to a method-tree artifact (skips the live scrape)
        #[arg(short, long)]
        local: Option<PathBuf>,

        /// Path for the generated Lua file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape { output } => scrape_command(output.as_path(), cli.verbose),
        Commands::Generate { local, output } => {
            generate_command(local.as_deref(), output.as_deref(), cli.verbose)
        }
    }
}

fn scrape_command(output: &Path, verbose: bool) -> Result<()> {
    println!(
        "{} Scraping method documentation from {}",
        "→".cyan(),
        DocsClient::DEFAULT_BASE_URL.yellow()
    );

    let tree = scrape_tree(verbose)?;

    artifact::save(output, &tree)
        .with_context(|| format!("Failed to write artifact to {}", output.display()))?;

    println!("\n{}", "✓ Scrape complete!".green().bold());
    println!("  📄 {}", output.display());
    println!("\nNext step:");
    println!(
        "  slackweb-luagen generate --local {} --output slackweb.lua",
        output.display()
    );

    Ok(())
}

fn generate_command(local: Option<&Path>, output: Option<&Path>, verbose: bool) -> Result<()> {
    let tree = match local {
        Some(path) => {
            println!(
                "{} Loading method tree from {}",
                "→".cyan(),
                path.display()
            );
            artifact::load(path)
                .with_context(|| format!("Failed to load artifact from {}", path.display()))?
        }
        None => {
            println!(
                "{} No --local artifact given, scraping {} first",
                "→".cyan(),
                DocsClient::DEFAULT_BASE_URL.yellow()
            );
            scrape_tree(verbose)?
        }
    };

    if verbose {
        println!("  Methods: {}", tree.method_count());
    }

    println!("{} Generating Lua client...", "→".cyan());
    let generator = LuaGenerator::new().context("Failed to load Lua templates")?;
    let lua = generator
        .generate(&tree)
        .context("Failed to generate Lua client")?;

    match output {
        Some(path) => {
            fs::write(path, lua)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("\n{}", "✓ Generation complete!".green().bold());
            println!("  📄 {}", path.display());
        }
        None => print!("{}", lua),
    }

    Ok(())
}

fn scrape_tree(verbose: bool) -> Result<MethodTree> {
    let collector = Collector::new().context("Failed to build documentation client")?;
    let tree = collector
        .collect()
        .context("Failed to scrape method documentation")?;

    println!("{} Scraped {} methods", "✓".green(), tree.method_count());
    if verbose {
        for name in tree.root.keys() {
            println!("  • {}", name.cyan());
        }
    }

    Ok(tree)
}
