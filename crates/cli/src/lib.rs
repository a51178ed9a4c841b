//! # Docbot CLI
//!
//! Console front-end for the doc command: a JSON documentation index,
//! optional TOML configuration and a line-based stand-in for a chat channel.
//!
//! ## Architecture
//!
//! ```text
//! stdin line
//!     │
//!     ├──> parse_line
//!     │      ├─ !doc [long] <query>              → typed invocation
//!     │      ├─ /doc <query> [--long] [--omit-tags] → structured invocation
//!     │      └─ click <row> <col>               → follow-up with the stored payload
//!     │
//!     ├──> DocCommand (docbot-command)
//!     │      └─ JsonDocIndex (nucleo fuzzy query + exact loader)
//!     │
//!     └──> render(Reply) → stdout
//! ```

mod console;
mod index;

pub use console::{parse_line, render, Console, ConsoleInput, LineOutcome};
pub use index::JsonDocIndex;

use anyhow::{anyhow, Context as AnyhowContext, Result};
use docbot_command::{CommandConfig, DocCommand};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Reads a TOML config, or the defaults when no path is given
pub async fn load_config(path: Option<&Path>) -> Result<CommandConfig> {
    let config = match path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("read config {}", path.display()))?;
            toml::from_str::<CommandConfig>(&raw)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => CommandConfig::default(),
    };
    config
        .validate()
        .map_err(|err| anyhow!("invalid config: {err}"))?;
    Ok(config)
}

/// Wires the index into a doc command
pub fn build_command(index: JsonDocIndex, config: CommandConfig) -> DocCommand {
    let index = Arc::new(index);
    DocCommand::new(index.clone(), index, config)
}

/// Feeds lines from `input` to the console until EOF or `quit`, writing
/// every rendered reply to `output`
pub async fn run<R, W>(console: &mut Console, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("read input")? {
        let outcome = console.handle_line(&line).await?;
        for text in console.take_output() {
            output.write_all(text.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
        output.flush().await?;

        match outcome {
            LineOutcome::Quit => break,
            outcome => log::debug!("'{}' → {outcome:?}", line.trim()),
        }
    }
    Ok(())
}
