//! Interactive shell
//!
//! Line-oriented front end over a [`Cache`] of JSON values. Each line is
//! parsed into a [`Command`], executed, and its output written back.

mod command;

pub use command::{format_value, infer_value, Command, CommandResult};

use serde_json::Value;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::cache::Cache;

const PROMPT: &str = "> ";

/// Reads commands from `reader` until `exit`/`quit` or end of input.
///
/// Parse errors are reported on `writer` and the loop continues.
pub async fn run_repl<R, W>(cache: &Cache<Value>, reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input, leaving shell");
            writer.write_all(b"\n").await?;
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writer.write_all(format!("{:#}\n", e).as_bytes()).await?;
                continue;
            }
        };

        match command.execute(cache).await {
            CommandResult::Continue(output) => {
                writer.write_all(output.as_bytes()).await?;
                writer.write_all(b"\n").await?;
            }
            CommandResult::Exit(output) => {
                writer.write_all(output.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                break;
            }
        }
    }

    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn run(script: &str) -> String {
        let cache = Cache::new(Duration::ZERO, 10).unwrap();
        let mut out = Vec::new();
        run_repl(&cache, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let out = run("set a 1 1m\nget a\nexists a\nsize\nexit\nget a\n").await;

        assert!(out.contains("Key 'a' set to 1"));
        assert!(out.contains("> 1\n"));
        assert!(out.contains("Key 'a' exists"));
        assert!(out.contains("1 live entries"));
        assert!(out.ends_with("Shutting down...\n"));
    }

    #[tokio::test]
    async fn test_errors_do_not_end_session() {
        let out = run("bogus\nget\nset k v nope\nkeys\n").await;

        assert!(out.contains("Unknown command: 'bogus'"));
        assert!(out.contains("Usage: get <key>"));
        assert!(out.contains("Invalid TTL 'nope'"));
        assert!(out.contains("Cache is empty"));
    }

    #[tokio::test]
    async fn test_eof_exits() {
        let out = run("set k v 1m").await;
        assert!(out.ends_with("> \n"));
    }

    #[tokio::test]
    async fn test_cleanup_command() {
        let cache = Cache::new(Duration::ZERO, 10).unwrap();
        cache
            .set("gone", Value::from(1), Duration::from_millis(5))
            .await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        let mut out = Vec::new();
        run_repl(&cache, "cleanup\ncleanup\n".as_bytes(), &mut out)
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Removed 1 expired entries"));
        assert!(out.contains("Removed 0 expired entries"));
    }
}
