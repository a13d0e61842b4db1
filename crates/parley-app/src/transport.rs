//! Console and script transports.
//!
//! Both map one inbound message to one `respond` call and write each reply
//! on its own line, in order.

use std::io::Write;

use parley_chat::{ChatEngine, ChatError};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, warn};

/// Command that ends an interactive session.
pub const QUIT_COMMAND: &str = "/quit";

/// Outcome counts of a script run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSummary {
    pub messages: usize,
    pub replies: usize,
    pub rejected: usize,
}

fn write_replies(out: &mut impl Write, replies: &[String]) -> std::io::Result<()> {
    for reply in replies {
        writeln!(out, "{}", reply)?;
    }
    out.flush()
}

/// Read messages line by line until EOF or [`QUIT_COMMAND`].
///
/// A failed turn is logged and the session continues.
pub async fn run_console<R, W>(
    engine: &mut ChatEngine,
    input: R,
    out: &mut W,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut turns = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == QUIT_COMMAND {
            break;
        }
        if line.is_empty() {
            continue;
        }
        turns += 1;
        match engine.respond(line).await {
            Ok(replies) => write_replies(out, &replies)?,
            Err(e) => error!(error = %e, "Turn failed"),
        }
    }
    Ok(turns)
}

/// Run a JSON-lines script: each line is a JSON string or array of strings.
///
/// Lines that are not valid JSON or not a valid input are reported and
/// skipped.
pub async fn run_script<W: Write>(
    engine: &mut ChatEngine,
    script: &str,
    out: &mut W,
) -> std::io::Result<ScriptSummary> {
    let mut summary = ScriptSummary::default();

    for (number, line) in script.lines().enumerate().map(|(i, l)| (i + 1, l.trim())) {
        if line.is_empty() {
            continue;
        }
        summary.messages += 1;

        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(line = number, error = %e, "Script line is not JSON");
                summary.rejected += 1;
                continue;
            }
        };

        match engine.respond_value(value).await {
            Ok(replies) => {
                summary.replies += replies.len();
                write_replies(out, &replies)?;
            }
            Err(e @ ChatError::InvalidInput(_)) => {
                warn!(line = number, error = %e, "Script line rejected");
                summary.rejected += 1;
            }
            Err(e) => {
                error!(line = number, error = %e, "Turn failed");
                summary.rejected += 1;
            }
        }
    }
    Ok(summary)
}
