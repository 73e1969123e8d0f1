//! CLI for the osu! map analyzer.

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use oma_core::config::{self, OmaConfig};

use commands::{run_analyze, run_completions, run_interactive, run_manpage, run_resolve};

/// Top-level CLI for the osu! map analyzer.
#[derive(Debug, Parser)]
#[command(name = "oma")]
#[command(about = "oma: classify osu! beatmaps (streams, jumps, ...) from a pasted link", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Analyze the beatmap behind an osu! URL.
    Analyze {
        /// https://osu.ppy.sh/b/<id> or https://osu.ppy.sh/beatmapsets/<set>#<mode>/<id>
        url: String,
        /// Analysis backend origin (overrides backend_url from config.toml).
        #[arg(long, value_name = "URL")]
        backend: Option<String>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show how a URL resolves, without contacting the backend.
    Resolve {
        url: String,
        /// Print the parsed reference as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Read URLs from stdin, one per line, and analyze each as it arrives.
    Interactive {
        /// Analysis backend origin (overrides backend_url from config.toml).
        #[arg(long, value_name = "URL")]
        backend: Option<String>,
    },

    /// Print shell completions for the given shell.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Manpage,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Analyze { url, backend, json } => {
                let cfg = load_config(backend)?;
                run_analyze(&cfg, &url, json).await?;
            }
            CliCommand::Resolve { url, json } => run_resolve(&url, json)?,
            CliCommand::Interactive { backend } => {
                let cfg = load_config(backend)?;
                run_interactive(&cfg).await?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Manpage => run_manpage()?,
        }

        Ok(())
    }
}

/// Config from disk, with `--backend` taking precedence.
fn load_config(backend: Option<String>) -> Result<OmaConfig> {
    let mut cfg = config::load_or_init()?;
    if let Some(backend) = backend {
        cfg.backend_url = backend;
        cfg.validate()?;
    }
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
