//! CLI frontend for the Taleforge narrative engine.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "tf",
    about = "Taleforge: play and check scene-graph stories",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./taleforge.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the scene graph and report integrity issues
    Check {
        /// Extra scene pack files, applied after the built-in story
        catalogs: Vec<PathBuf>,

        /// Do not include the built-in story
        #[arg(long)]
        no_builtin: bool,
    },

    /// List every scene in the catalog
    Scenes {
        /// Extra scene pack files, applied after the built-in story
        catalogs: Vec<PathBuf>,

        /// Do not include the built-in story
        #[arg(long)]
        no_builtin: bool,
    },

    /// Play the story in the terminal
    Play {
        /// Extra scene pack files, applied after the built-in story
        catalogs: Vec<PathBuf>,

        /// Do not include the built-in story
        #[arg(long)]
        no_builtin: bool,

        /// Directory for save files
        #[arg(short, long)]
        save_dir: Option<PathBuf>,
    },

    /// List saved games
    Slots {
        /// Directory for save files
        #[arg(short, long)]
        save_dir: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Check {
            catalogs,
            no_builtin,
        } => commands::check::run(&config, &catalogs, !no_builtin),
        Commands::Scenes {
            catalogs,
            no_builtin,
        } => commands::scenes::run(&config, &catalogs, !no_builtin),
        Commands::Play {
            catalogs,
            no_builtin,
            save_dir,
        } => commands::play::run(&config, &catalogs, !no_builtin, save_dir.as_deref()),
        Commands::Slots { save_dir } => commands::slots::run(&config, save_dir.as_deref()),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
