//! Incremental JSON frame decoding for the watch stream.
//!
//! The gateway writes one JSON object per watch response, but nothing ties
//! those objects to transport chunk boundaries. The decoder buffers bytes
//! until a complete object is available and yields each object once.
//!
//! Invariants:
//! - Incomplete trailing input stays buffered until more bytes arrive.
//! - After a syntax error the buffer is discarded; the connection's stream is
//!   no longer trustworthy.

use bytes::{Buf, BytesMut};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Splits a byte stream into JSON values.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: BytesMut,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every frame it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<Value>> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        let mut consumed = 0;
        let mut values = serde_json::Deserializer::from_slice(&self.buffer).into_iter::<Value>();
        loop {
            match values.next() {
                Some(Ok(value)) => {
                    consumed = values.byte_offset();
                    frames.push(Ok(value));
                }
                Some(Err(e)) if e.is_eof() => break,
                Some(Err(e)) => {
                    consumed = self.buffer.len();
                    frames.push(Err(ClientError::InvalidResponse(format!(
                        "watch frame is not valid JSON: {e}"
                    ))));
                    break;
                }
                None => {
                    consumed = values.byte_offset();
                    break;
                }
            }
        }

        self.buffer.advance(consumed);
        frames
    }

    /// Bytes held back waiting for the rest of a frame.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any partial frame, e.g. after reconnecting.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok_values(frames: Vec<Result<Value>>) -> Vec<Value> {
        frames.into_iter().map(|f| f.unwrap()).collect()
    }

    #[test]
    fn test_single_complete_frame() {
        let mut decoder = FrameDecoder::new();
        let frames = ok_values(decoder.push(br#"{"result":{"created":true}}"#));
        assert_eq!(frames, vec![json!({"result": {"created": true}})]);
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.push(br#"{"result":{"eve"#).is_empty());
        assert!(decoder.buffered() > 0);
        let frames = ok_values(decoder.push(br#"nts":[]}}"#));
        assert_eq!(frames, vec![json!({"result": {"events": []}})]);
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn test_multiple_frames_in_one_chunk() {
        let mut decoder = FrameDecoder::new();
        let frames = ok_values(decoder.push(b"{\"a\":1}\n{\"b\":2}\n{\"c\""));
        assert_eq!(frames, vec![json!({"a": 1}), json!({"b": 2})]);
        let frames = ok_values(decoder.push(b":3}\n"));
        assert_eq!(frames, vec![json!({"c": 3})]);
    }

    #[test]
    fn test_whitespace_chunk_yields_nothing() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.push(b"\n  \r\n").is_empty());
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn test_syntax_error_discards_buffer() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.push(b"{\"ok\":true}\nnot json");
        assert_eq!(frames.len(), 2);
        assert!(frames[0].is_ok());
        assert!(matches!(frames[1], Err(ClientError::InvalidResponse(_))));
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn test_reset_drops_partial_frame() {
        let mut decoder = FrameDecoder::new();
        decoder.push(b"{\"partial\":");
        decoder.reset();
        let frames = ok_values(decoder.push(b"{\"fresh\":1}"));
        assert_eq!(frames, vec![json!({"fresh": 1})]);
    }
}
