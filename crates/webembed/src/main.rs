//! webembed CLI - embeds a web dashboard into a C source file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "webembed")]
#[command(about = "Embeds an HTML dashboard with inlined CSS and JS into a C source file")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to embed.toml config file
    #[arg(short, long, default_value = "embed.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the C source from the dashboard assets
    Build {
        /// HTML template (defaults to config or "web/dashboard.html")
        #[arg(long)]
        template: Option<PathBuf>,

        /// Stylesheet inlined at {{INLINE_CSS}}
        #[arg(long)]
        css: Option<PathBuf>,

        /// Script inlined at {{INLINE_JS}}
        #[arg(long)]
        js: Option<PathBuf>,

        /// Generated C file (defaults to config or "src/dashboard_embedded.c")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Longest string literal segment, in escaped characters
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Write code points above U+FFFF as \U escapes instead of truncating them
        #[arg(long)]
        wide_astral: bool,
    },

    /// Create embed.toml and starter dashboard assets
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Build {
            template,
            css,
            js,
            output,
            chunk_size,
            wide_astral,
        } => {
            let overrides = commands::build::Overrides {
                template,
                css,
                js,
                output,
                chunk_size,
                wide_astral,
            };
            commands::build::run(&cli.config, overrides)?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_overrides() {
        let cli = Cli::try_parse_from([
            "webembed",
            "-c",
            "fw/embed.toml",
            "build",
            "--css",
            "theme.css",
            "--chunk-size",
            "512",
            "--wide-astral",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("fw/embed.toml"));
        match cli.command {
            Commands::Build {
                css,
                chunk_size,
                wide_astral,
                template,
                ..
            } => {
                assert_eq!(css, Some(PathBuf::from("theme.css")));
                assert_eq!(chunk_size, Some(512));
                assert!(wide_astral);
                assert_eq!(template, None);
            }
            Commands::Init { .. } => panic!("expected build"),
        }
    }
}
