//! Newline-delimited JSON host event stream.

use questline_shared::HostEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Reads host events one line at a time.
///
/// Blank lines, lines that are not UTF-8, and lines that are not a valid
/// event are logged and skipped. Only a failing reader ends the stream with
/// an error. Bytes of a partially read line stay buffered, so
/// `next_event` may be raced in `tokio::select!`.
pub struct HostEventReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin> HostEventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// The next well-formed event, or `None` at end of stream.
    pub async fn next_event(&mut self) -> std::io::Result<Option<HostEvent>> {
        loop {
            self.reader.read_until(b'\n', &mut self.buf).await?;
            if self.buf.is_empty() {
                return Ok(None);
            }

            let line = std::mem::take(&mut self.buf);
            if let Some(event) = parse_line(&line) {
                return Ok(Some(event));
            }
        }
    }
}

fn parse_line(line: &[u8]) -> Option<HostEvent> {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text.trim(),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring host event line that is not UTF-8");
            return None;
        }
    };
    if text.is_empty() {
        return None;
    }

    match serde_json::from_str::<HostEvent>(text) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed host event");
            None
        }
    }
}
