//! Streamed Response Decoder
//!
//! Turns a chat endpoint's streamed body back into plain text for callers
//! that are not a reactive UI (the CLI, a plain-fetch terminal).
//!
//! The body is a sequence of newline-terminated frames, but chunk
//! boundaries fall anywhere, including inside a frame or inside a
//! multi-byte UTF-8 sequence. Two frame conventions are understood:
//!
//! ```text
//! data: {"type":"text-delta","textDelta":"Hel"}     event form (SSE, JSON payload)
//! data: {"type":"error","errorText":"overloaded"}
//! data: [DONE]
//! 0:"lo"                                            indexed form (JSON string literal)
//! ```
//!
//! Unparsable lines are skipped; they never abort the decode.

use futures::{Stream, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::ai::AIError;

/// Returned when the stream carried no text and no error
pub const NO_RESPONSE: &str = "(No response received)";

const END_SENTINEL: &str = "[DONE]";

static INDEXED_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^0:(".*")$"#).expect("indexed frame pattern is valid")
});

/// Accumulated outcome of one decode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedStream {
    pub text: String,
    /// Last upstream error frame, if any
    pub error: Option<String>,
}

impl DecodedStream {
    /// Final text for display: the error (prefixed) wins over any text
    pub fn into_text(self) -> String {
        match self.error {
            Some(error) => format!("Error: {}", error),
            None if self.text.is_empty() => NO_RESPONSE.to_string(),
            None => self.text,
        }
    }

    /// Answer text for a conversation turn. Unlike [`into_text`](Self::into_text),
    /// an error frame or an empty stream is an error, so it never ends up
    /// in the history as something the model said.
    pub fn into_answer(self) -> Result<String, AIError> {
        match self.error {
            Some(error) => Err(AIError::Upstream(error)),
            None if self.text.is_empty() => Err(AIError::EmptyResponse),
            None => Ok(self.text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    Text(String),
    Error(String),
    Ignore,
}

/// `None` means "not this convention"; the next parser gets the line
type LineParser = fn(&str) -> Option<Frame>;

const LINE_PARSERS: &[LineParser] = &[parse_event_line, parse_indexed_line];

/// Incremental decoder state. Feed chunks with [`push`](Self::push) and
/// call [`finish`](Self::finish) once the source is exhausted.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    /// Decoded text not yet terminated by a newline
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence
    pending: Vec<u8>,
    decoded: DecodedStream,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text accumulated so far
    pub fn text(&self) -> &str {
        &self.decoded.text
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
        self.decode_pending();

        let Some(last) = self.buffer.rfind('\n') else {
            return;
        };
        let tail = self.buffer.split_off(last + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);
        for line in complete.split('\n') {
            self.process_line(line);
        }
    }

    /// Flush whatever is left (a final frame may lack its newline)
    pub fn finish(mut self) -> DecodedStream {
        if !self.pending.is_empty() {
            let rest = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            self.buffer.push_str(&rest);
        }

        let rest = std::mem::take(&mut self.buffer);
        for line in rest.split('\n') {
            self.process_line(line);
        }

        self.decoded
    }

    fn decode_pending(&mut self) {
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    self.pending.clear();
                    return;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    self.buffer
                        .push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match err.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + len);
                        }
                        // incomplete sequence at the end; wait for the next chunk
                        None => {
                            self.pending.drain(..valid);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn process_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        let frame = LINE_PARSERS.iter().find_map(|parse| parse(line));
        match frame {
            Some(Frame::Text(text)) => self.decoded.text.push_str(&text),
            Some(Frame::Error(message)) => {
                tracing::warn!("Upstream error frame: {}", message);
                self.decoded.error = Some(message);
            }
            Some(Frame::Ignore) => {}
            None => tracing::trace!("Skipping unrecognized frame: {}", line),
        }
    }
}

fn parse_event_line(line: &str) -> Option<Frame> {
    let data = line.strip_prefix("data:")?.trim_start();
    if data == END_SENTINEL {
        return Some(Frame::Ignore);
    }

    let payload: Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(e) => {
            tracing::trace!("Skipping malformed event payload ({}): {}", e, data);
            return Some(Frame::Ignore);
        }
    };

    let field = |name: &str| {
        payload
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let frame = match payload.get("type").and_then(Value::as_str) {
        Some("text-delta") => field("textDelta").or_else(|| field("delta")).map(Frame::Text),
        Some("text") => field("text").map(Frame::Text),
        Some("error") => field("errorText").map(Frame::Error),
        _ => None,
    };
    Some(frame.unwrap_or(Frame::Ignore))
}

fn parse_indexed_line(line: &str) -> Option<Frame> {
    let literal = INDEXED_TEXT.captures(line)?.get(1)?.as_str();
    match serde_json::from_str::<String>(literal) {
        Ok(text) => Some(Frame::Text(text)),
        Err(e) => {
            tracing::trace!("Skipping malformed indexed frame ({}): {}", e, line);
            Some(Frame::Ignore)
        }
    }
}

/// Decode a whole byte stream. A failing source aborts with its error.
pub async fn decode<S, B, E>(source: S) -> Result<String, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    Ok(decode_with(source, |_| {}).await?.into_text())
}

/// Like [`decode`], but hands each newly decoded piece of text to
/// `on_text` as it arrives and returns the raw accumulator.
pub async fn decode_with<S, B, E, F>(source: S, mut on_text: F) -> Result<DecodedStream, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    F: FnMut(&str),
{
    futures::pin_mut!(source);
    let mut decoder = StreamDecoder::new();

    while let Some(chunk) = source.next().await {
        let chunk = chunk?;
        let seen = decoder.text().len();
        decoder.push(chunk.as_ref());
        if decoder.text().len() > seen {
            on_text(&decoder.text()[seen..]);
        }
    }

    let seen = decoder.text().len();
    let decoded = decoder.finish();
    if decoded.text.len() > seen {
        on_text(&decoded.text[seen..]);
    }
    Ok(decoded)
}
