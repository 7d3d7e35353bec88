//! Property-based tests for watch frame decoding.
//!
//! The gateway's chunk boundaries are arbitrary, so decoding must not depend
//! on where the byte stream is split.

use proptest::prelude::*;
use wrangler_client::FrameDecoder;
use wrangler_client::testing::{created_frame, event_frame, watch_stream_body};

fn frames(values: &[String]) -> Vec<serde_json::Value> {
    let mut frames = vec![created_frame()];
    frames.extend(
        values
            .iter()
            .map(|value| event_frame(&[("cfg/service/key", value.as_str())])),
    );
    frames
}

proptest! {
    #[test]
    fn decoding_ignores_chunk_boundaries(
        values in prop::collection::vec("[a-zA-Z0-9 _./-]{0,24}", 0..6),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let expected = frames(&values);
        let body = watch_stream_body(&expected).into_bytes();

        let mut offsets: Vec<usize> = cuts.iter().map(|cut| cut.index(body.len() + 1)).collect();
        offsets.push(0);
        offsets.push(body.len());
        offsets.sort_unstable();
        offsets.dedup();

        let mut decoder = FrameDecoder::new();
        let mut decoded = Vec::new();
        for window in offsets.windows(2) {
            for frame in decoder.push(&body[window[0]..window[1]]) {
                decoded.push(frame.unwrap());
            }
        }

        prop_assert_eq!(decoded, expected);
        prop_assert_eq!(decoder.buffered(), 0);
    }
}
