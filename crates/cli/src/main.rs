use anyhow::Result;
use clap::Parser;
use docbot_cli::{build_command, load_config, run, Console, JsonDocIndex};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docbot")]
#[command(about = "Look up documentation the way a chat bot answers !doc", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON array of documented elements
    #[arg(short, long)]
    index: PathBuf,

    /// TOML file overriding command limits
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(cli.config.as_deref()).await?;
    let index = JsonDocIndex::load(&cli.index).await?;
    if index.is_empty() {
        log::warn!("Index {} has no elements", cli.index.display());
    }

    let mut console = Console::new(build_command(index, config));
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run(&mut console, stdin, tokio::io::stdout()).await
}
