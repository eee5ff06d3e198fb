//! Command-line interface for managing frameworks in Xcode projects.
//!
//! Lists linked frameworks with their embedding status, finds and removes
//! duplicate links, and embeds frameworks with or without code signing.

mod table;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use table::Table;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use xcode_frameworks::{
    embed_frameworks, find_duplicates, fix_duplicates, list_frameworks, EmbedMode, Strategy, XcodeProject,
};

#[derive(Parser)]
#[command(name = "xcode-frameworks", version)]
#[command(about = "A tool for managing embedded frameworks and xcframeworks in an Xcode project")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all frameworks and their embedding status
    List(ProjectArgs),

    /// Find and display duplicated frameworks
    Duplicates(ProjectArgs),

    /// Remove duplicated frameworks, keeping one instance of each
    Fix(FixArgs),

    /// Embed the specified frameworks without signing
    Embed(EmbedArgs),

    /// Embed and sign the specified frameworks
    #[command(name = "embed-sign", visible_alias = "sign")]
    EmbedSign(EmbedArgs),
}

#[derive(Args)]
struct ProjectArgs {
    /// The path to the Xcode project
    project: PathBuf,

    /// Show detailed information for debugging
    #[arg(long)]
    verbose: bool,
}

#[derive(Args)]
struct FixArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Which duplicate to keep: 'keep-first' or 'keep-last'
    #[arg(long, default_value = "keep-first")]
    strategy: Strategy,
}

#[derive(Args)]
struct EmbedArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Frameworks to update, matched against their path without extension
    #[arg(
        long,
        alias = "sign",
        num_args = 1..,
        required = true,
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    frameworks: Vec<String>,
}

impl Command {
    fn project_args(&self) -> &ProjectArgs {
        match self {
            Command::List(args) | Command::Duplicates(args) => args,
            Command::Fix(args) => &args.project,
            Command::Embed(args) | Command::EmbedSign(args) => &args.project,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.project_args().verbose);

    match &cli.command {
        Command::List(args) => run_list(&args.project),
        Command::Duplicates(args) => run_duplicates(&args.project),
        Command::Fix(args) => run_fix(&args.project.project, args.strategy),
        Command::Embed(args) => run_embed(&args.project.project, &args.frameworks, EmbedMode::EmbedWithoutSign),
        Command::EmbedSign(args) => run_embed(&args.project.project, &args.frameworks, EmbedMode::Sign),
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings only, or debug output
/// with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open(path: &Path) -> Result<XcodeProject> {
    debug!("Project path: {}", path.display());
    let project =
        XcodeProject::open(path).with_context(|| format!("Failed to load Xcode project {}", path.display()))?;
    debug!("Successfully loaded Xcode project");
    Ok(project)
}

fn save(project: &XcodeProject) -> Result<()> {
    project
        .save()
        .with_context(|| format!("Failed to save Xcode project {}", project.path().display()))
}

fn run_list(path: &Path) -> Result<()> {
    let project = open(path)?;

    let mut table = Table::new(&["Framework Name", "Type", "Embedding Status"]);
    for info in list_frameworks(project.pbxproj()) {
        table.add_row([info.name, info.kind.to_string(), info.status.to_string()]);
    }
    println!("{}", table.render());
    Ok(())
}

fn run_duplicates(path: &Path) -> Result<()> {
    let project = open(path)?;

    let duplicates = find_duplicates(project.pbxproj());
    if duplicates.is_empty() {
        println!("No duplicated frameworks found.");
        return Ok(());
    }

    let mut table = Table::new(&["Framework", "Duplications"]);
    for duplicate in duplicates {
        table.add_row([duplicate.name, duplicate.count.to_string()]);
    }
    println!("{}", table.render());
    Ok(())
}

fn run_fix(path: &Path, strategy: Strategy) -> Result<()> {
    let mut project = open(path)?;

    let report = fix_duplicates(project.pbxproj_mut(), strategy);
    if report.is_empty() {
        println!("No duplicated frameworks found. Nothing to fix.");
        return Ok(());
    }
    debug!("Applied the '{}' strategy", strategy);

    let mut table = Table::new(&["Framework", "Duplications", "Removed"]);
    for entry in &report.entries {
        table.add_row([entry.name.clone(), entry.occurrences.to_string(), entry.removed.to_string()]);
    }
    println!("{}", table.render());
    println!("Removed {} duplicate framework links.", report.removed_total());

    save(&project)?;
    println!("Project saved with duplicates removed.");
    Ok(())
}

fn run_embed(path: &Path, frameworks: &[String], mode: EmbedMode) -> Result<()> {
    let mut project = open(path)?;

    let report = embed_frameworks(project.pbxproj_mut(), frameworks, mode)
        .with_context(|| format!("Failed to update frameworks in {}", path.display()))?;
    for name in &report.missing {
        eprintln!("Warning: Framework {} not found in project.", name);
    }

    if !report.is_changed() {
        println!("No frameworks were updated.");
        return Ok(());
    }

    save(&project)?;
    println!("Embedding status successfully updated for the specified frameworks.");
    Ok(())
}
