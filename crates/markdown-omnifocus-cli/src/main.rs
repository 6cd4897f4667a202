use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use markdown_omnifocus_config::Config;
use markdown_omnifocus_engine::{
    ExtractCommand, ExtractionMode, Outcome, RawTask, TaskExtractor, io,
};
use std::path::{Path, PathBuf};

mod host;

use host::{FileHost, LineRange, Opener};

#[derive(Debug, Parser)]
#[command(
    name = "markdown-omnifocus",
    about = "Send markdown checklist items to OmniFocus",
    version
)]
struct Cli {
    /// Enable verbose logging for debugging.
    #[arg(long, global = true)]
    verbose: bool,
    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract open checklist items and send each one to OmniFocus.
    Extract(ExtractArgs),

    /// Print the checklist items that would be extracted.
    List(ListArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Markdown file to extract tasks from.
    file: PathBuf,
    /// Vault directory (defaults to the config, then the file's directory).
    #[arg(long)]
    vault: Option<PathBuf>,
    /// Only extract from these lines, e.g. `12:20` (1-based, inclusive).
    #[arg(long)]
    lines: Option<LineRange>,
    /// Tick extracted items off in the file afterwards.
    #[arg(long)]
    mark_complete: bool,
    /// Recognition mode: `block` absorbs nested notes, `line` does not.
    #[arg(long)]
    mode: Option<ExtractionMode>,
    /// Print the URLs instead of opening them.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Markdown file to scan.
    file: PathBuf,
    /// Recognition mode: `block` absorbs nested notes, `line` does not.
    #[arg(long)]
    mode: Option<ExtractionMode>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract(args) => run_extract(args, &config),
        Commands::List(args) => run_list(args, &config),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());

    match Config::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?
    {
        Some(config) => Ok(config),
        None if path.is_some() => bail!("Config file {} not found", config_path.display()),
        None => {
            log::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn run_extract(args: ExtractArgs, config: &Config) -> Result<()> {
    let vault_root = match args.vault.clone().or_else(|| config.vault_path.clone()) {
        Some(vault) => vault,
        None => args
            .file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    io::validate_vault_dir(&vault_root)
        .with_context(|| format!("Vault path '{}' is invalid", vault_root.display()))?;

    let file = io::relative_to_vault(&args.file, &vault_root)
        .with_context(|| format!("Cannot locate '{}' in the vault", args.file.display()))?;

    let opener = if args.dry_run {
        Opener::Print
    } else {
        Opener::System
    };
    let mut host = FileHost::new(vault_root, file, args.lines, opener)?;

    let mut options = config.run_options();
    options.mark_complete |= args.mark_complete;
    if let Some(mode) = args.mode {
        options.mode = mode;
    }

    let command = if args.lines.is_some() {
        ExtractCommand::selection()
    } else {
        ExtractCommand::document()
    };

    match command.run(&mut host, &options)? {
        Outcome::NoTasks => {}
        Outcome::Sent {
            count,
            marked_complete,
        } => {
            log::info!(
                "Sent {count} task(s){}",
                if marked_complete {
                    " and marked them complete"
                } else {
                    ""
                }
            );
        }
    }
    Ok(())
}

fn run_list(args: ListArgs, config: &Config) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let extractor = TaskExtractor::new(args.mode.unwrap_or(config.extraction_mode));

    let tasks: Vec<RawTask> = extractor.extract(&text).collect();
    if tasks.is_empty() {
        eprintln!("No tasks found in {}", args.file.display());
        return Ok(());
    }

    for task in &tasks {
        println!("{}", task.name());
        for line in task.note().lines() {
            println!("    {line}");
        }
    }
    Ok(())
}
