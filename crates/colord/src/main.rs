use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use colord::config::{self, Config};
use colord::Server;
use colorize::{debug_line, Colorizer};

#[derive(Parser)]
#[command(name = "colord")]
#[command(about = "Syntax highlighting server for vim")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Grammar to parse requests with (javascript, json)
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the highlighting server (default)
    Serve,

    /// Colorize a file once and print the encoded lines
    Dump {
        /// File to colorize
        file: PathBuf,

        /// Print the glyph rendering instead of JSON
        #[arg(long)]
        debug: bool,
    },
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => config::load_config_from(path)?,
            None => config::load_config()?,
        };
        if let Some(host) = &self.host {
            cfg.server.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(language) = &self.language {
            cfg.highlight.language = language.clone();
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    let cfg = cli.load_config()?;
    debug!(?cfg, "loaded configuration");

    match cli.command {
        Some(Commands::Dump { file, debug }) => cmd_dump(&cfg, &file, debug),
        Some(Commands::Serve) | None => cmd_serve(cfg),
    }
}

fn cmd_serve(cfg: Config) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    rt.block_on(async {
        let server = Server::bind(&cfg).await?;
        server.run().await
    })?;
    info!("stopped");
    Ok(())
}

fn cmd_dump(cfg: &Config, file: &Path, debug: bool) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let language = colorize::languages::by_name(&cfg.highlight.language)?;
    let mut colorizer = Colorizer::new(language)?;
    let lines = colorizer.colorize(&source)?;

    if debug {
        for line in &lines {
            println!("{}", debug_line(line));
        }
    } else {
        for line in &lines {
            println!("{}", serde_json::to_string(line)?);
        }
    }
    Ok(())
}
