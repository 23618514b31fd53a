pub mod help;
pub mod list;
pub mod refresh;
pub mod submit;
pub mod export;

use tokio::io::{AsyncBufRead, Lines};
use crate::api::receipt_processor::ReceiptTransport;
use crate::session::ReceiptSession;

/// Whether the shell keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn handle_line<T, R>(
    session: &ReceiptSession<T>,
    line: &str,
    input: &mut Lines<R>,
) -> Flow
where
    T: ReceiptTransport + ?Sized,
    R: AsyncBufRead + Unpin,
{
    let line = line.trim();
    if line.is_empty() {
        return Flow::Continue;
    }

    // Split off the command word; the rest stays untouched so JSON keeps its spacing
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let result = match command {
        "$refresh" | "$r" => refresh::execute(session).await,
        "$list" | "$ls" => list::execute(session).await,
        "$submit" | "$process" => {
            if rest.is_empty() {
                match read_payload(input).await {
                    Ok(payload) => submit::execute(session, &payload).await,
                    Err(e) => Err(e),
                }
            } else {
                submit::execute(session, rest).await
            }
        }
        "$retry" => submit::retry(session).await,
        "$json" => export::execute(session).await,
        "$help" => help::execute(),
        "$quit" | "$exit" => return Flow::Quit,
        _ => Err(format!("Unknown command `{}`. Type `$help` for the list.", command)),
    };

    if let Err(e) = result {
        tracing::debug!("Command {} failed: {}", command, e);
        println!("❌ {}", e);
    }

    Flow::Continue
}

/// Collect lines until an empty one
async fn read_payload<R>(input: &mut Lines<R>) -> Result<String, String>
where
    R: AsyncBufRead + Unpin,
{
    println!("Paste the receipt JSON, then an empty line:");
    let mut payload = String::new();
    loop {
        match input.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => break,
            Ok(Some(line)) => {
                payload.push_str(&line);
                payload.push('\n');
            }
            Ok(None) => break,
            Err(e) => return Err(format!("Failed to read input: {}", e)),
        }
    }
    Ok(payload)
}
