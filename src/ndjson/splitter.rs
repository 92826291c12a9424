//! Frame splitter: raw byte chunks in, newline-delimited text records out.
//!
//! Chunks may split a record anywhere, including inside a multi-byte UTF-8
//! sequence, so splitting happens on bytes and text conversion happens per
//! complete record.

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};

const RECORD_SEPARATOR: u8 = b'\n';

/// What to do with an unterminated fragment left over at end of stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailPolicy {
    /// Drop it; half-written records are never surfaced
    #[default]
    Discard,
    /// Treat it as a final record
    Decode,
}

/// Stateful splitter owning the carry-over buffer between chunks.
#[derive(Debug, Default)]
pub struct FrameSplitter {
    buffer: Vec<u8>,
}

impl FrameSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every record it completes.
    ///
    /// Blank records are filtered out. The trailing fragment after the last
    /// separator stays buffered and is prefixed onto the next chunk.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut records = Vec::new();
        let mut rest = chunk;

        while let Some(pos) = rest.iter().position(|&b| b == RECORD_SEPARATOR) {
            let line = if self.buffer.is_empty() {
                to_record(&rest[..pos])
            } else {
                self.buffer.extend_from_slice(&rest[..pos]);
                let line = to_record(&self.buffer);
                self.buffer.clear();
                line
            };
            if let Some(line) = line {
                records.push(line);
            }
            rest = &rest[pos + 1..];
        }

        self.buffer.extend_from_slice(rest);
        records
    }

    /// Bytes currently buffered as an incomplete record
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// End of stream: consume the splitter and apply `policy` to the tail.
    pub fn finish(self, policy: TailPolicy) -> Option<String> {
        let tail = to_record(&self.buffer)?;
        match policy {
            TailPolicy::Decode => Some(tail),
            TailPolicy::Discard => {
                tracing::warn!(
                    bytes = self.buffer.len(),
                    "Discarding unterminated record at end of stream"
                );
                None
            }
        }
    }
}

/// Lossy text conversion of one record; `None` for blank records
fn to_record(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_suffix('\r').unwrap_or(&text);
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Turn a stream of byte chunks into a lazy stream of text records.
///
/// Transport errors are passed through and end the record stream. Dropping
/// the returned stream stops pulling chunks and releases the buffered
/// fragment without emitting it.
pub fn split_records<S, E>(chunks: S, policy: TailPolicy) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    struct State<S> {
        chunks: S,
        splitter: Option<FrameSplitter>,
        ready: std::collections::VecDeque<String>,
    }

    let state = State {
        chunks,
        splitter: Some(FrameSplitter::new()),
        ready: std::collections::VecDeque::new(),
    };

    stream::unfold(state, move |mut state| async move {
        loop {
            if let Some(record) = state.ready.pop_front() {
                return Some((Ok(record), state));
            }

            // Splitter is gone once the stream has ended or failed
            let splitter = state.splitter.as_mut()?;

            match state.chunks.next().await {
                Some(Ok(chunk)) => {
                    state.ready.extend(splitter.push(&chunk));
                }
                Some(Err(e)) => {
                    state.splitter = None;
                    return Some((Err(e), state));
                }
                None => {
                    let tail = state.splitter.take().and_then(|s| s.finish(policy));
                    state.ready.extend(tail);
                }
            }
        }
    })
}
