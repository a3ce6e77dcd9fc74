use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lantern_lua::Session;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;

use config::ProjectConfig;

/// Script runner for the lantern embedding layer.
///
/// Runs Lua sources inside a session pre-seeded from an optional
/// lantern.toml (session options and global values).
///
/// EXAMPLES:
///     lantern run main.lua         Run a script
///     lantern eval '6 * 7'         Evaluate an expression
///
/// ENVIRONMENT VARIABLES:
///     RUST_LOG     tracing filter, e.g. 'lantern_lua=trace'
#[derive(Parser)]
#[command(name = "lantern")]
#[command(version)]
struct Cli {
    /// Path to a lantern.toml project configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Lua source file
    #[command(visible_alias = "r")]
    Run {
        /// Path to the Lua source file
        file: PathBuf,
    },

    /// Evaluate an inline expression and print its result
    #[command(visible_alias = "e")]
    Eval {
        /// Lua expression
        code: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ProjectConfig::load(cli.config.as_deref())?;
    let session = Session::with_options(config.session.clone())?;
    config.apply_globals(&session)?;

    match cli.command {
        Commands::Run { file } => {
            let source = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            debug!(file = %file.display(), bytes = source.len(), "running script");
            let chunk_name = format!("@{}", file.display());
            session.load(&source, &chunk_name)?.run()?;
        }
        Commands::Eval { code } => {
            session.exec(&format!("__lantern_result = tostring({code})"))?;
            let rendered: String = session.get_global("__lantern_result")?;
            println!("{rendered}");
        }
    }

    Ok(())
}
