use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use linkreap::confirm::{AutoConfirm, Confirm, Deny, Interactive};
use linkreap::reconcile::Reconciler;
#[cfg(unix)]
use linkreap::relink::rewrite_symlinks;
use linkreap::sweep::find_broken_symlinks;

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, ReconcileArgs};
use config::{Config, ConfirmMode};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linkreap")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("linkreap.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }
    if cli.has_stray_reconcile_flags() {
        bail!("--src, --dst, --dry-run and --no-confirm cannot be combined with a subcommand");
    }

    match &cli.command {
        None => handle_reconcile(&cli.reconcile, config),
        Some(Commands::Sweep { dir, force }) => handle_sweep(dir.as_deref(), *force, config),
        Some(Commands::Relink {
            directory,
            old_path,
            new_path,
            dry_run,
        }) => handle_relink(directory.as_deref(), old_path.as_deref(), new_path.as_deref(), *dry_run),
    }
}

fn handle_reconcile(args: &ReconcileArgs, config: &Config) -> Result<()> {
    let source = args.src.clone().unwrap_or_else(|| config.source.clone());
    let destination = args.dst.clone().unwrap_or_else(|| config.destination.clone());
    info!("Reconcile: src={} dst={}", source.display(), destination.display());

    let mut confirm: Box<dyn Confirm> = if args.dry_run {
        Box::new(Deny)
    } else if args.no_confirm || config.confirm == ConfirmMode::Auto {
        Box::new(AutoConfirm)
    } else {
        Box::new(Interactive::stdio())
    };

    let report = Reconciler::new(source, destination, args.dry_run)
        .run(&mut *confirm)
        .context("Reconciliation failed")?;

    println!(
        "{} {} unused, {} deleted, {} failed",
        "Done:".green(),
        report.entries.len(),
        report.deleted(),
        report.failed()
    );
    Ok(())
}

fn handle_sweep(dir: Option<&Path>, force: bool, config: &Config) -> Result<()> {
    let dir = dir.unwrap_or(config.sweep.dir.as_path());
    let dry_run = !force;

    println!("{} {}", "Scanning for broken symlinks:".cyan(), dir.display());
    if dry_run {
        println!("{}", "DRY RUN: No files will be deleted. Use --force to delete.".yellow());
    }

    let broken = find_broken_symlinks(dir, dry_run).context("Broken symlink sweep failed")?;

    if dry_run {
        println!("Found {} broken symlinks:", broken.len());
        for link in &broken {
            println!("{}", link.display());
        }
    } else {
        println!("{} {} broken symlinks.", "Removed".green(), broken.len());
    }
    Ok(())
}

#[cfg(not(unix))]
fn handle_relink(_: Option<&Path>, _: Option<&str>, _: Option<&str>, _: bool) -> Result<()> {
    bail!("relink is only supported on Unix platforms")
}

#[cfg(unix)]
fn handle_relink(directory: Option<&Path>, old_path: Option<&str>, new_path: Option<&str>, dry_run: bool) -> Result<()> {
    let (directory, old_path, new_path, dry_run) = match (directory, old_path, new_path) {
        (Some(d), Some(o), Some(n)) => (d.to_path_buf(), o.to_string(), n.to_string(), dry_run),
        _ => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let directory = ask(&mut input, "Directory to search for symlinks (e.g. /data/plex): ")?;
            let old_path = ask(&mut input, "Old mount path to be replaced: ")?;
            let new_path = ask(&mut input, "New mount path to replace with: ")?;
            let dry_run = ask(&mut input, "Dry run? (yes/no): ")?.eq_ignore_ascii_case("yes");
            (PathBuf::from(directory), old_path, new_path, dry_run)
        }
    };

    println!("{}", "Changing your symlink paths...".cyan());
    let rewrites = rewrite_symlinks(&directory, &old_path, &new_path, dry_run).context("Symlink rewrite failed")?;
    if dry_run {
        println!("{} {} symlinks would be updated.", "Done:".green(), rewrites.len());
    } else {
        println!("{} {} symlinks updated.", "Done:".green(), rewrites.len());
    }
    Ok(())
}

#[cfg(unix)]
fn ask(input: &mut impl BufRead, question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
