//! Fuzz target for the key sequence parser.
//!
//! Arbitrary bytes must never panic the parser, and every result must make
//! progress so the reader cannot spin.

#![no_main]

use libfuzzer_sys::fuzz_target;
use termwin::input::{InputParser, MAX_SEQUENCE_LEN, ParseError};

fuzz_target!(|data: &[u8]| {
    let parser = InputParser::new();
    let mut remaining = data;

    while !remaining.is_empty() {
        match parser.parse(remaining) {
            Ok((_event, consumed)) => {
                assert!(consumed > 0 && consumed <= remaining.len());
                remaining = &remaining[consumed..];
            }
            Err(ParseError::Empty) => unreachable!("non-empty input reported empty"),
            Err(ParseError::Incomplete) => {
                assert!(remaining.len() < MAX_SEQUENCE_LEN);
                break;
            }
            Err(err) => {
                let len = err.discard_len();
                assert!(len > 0);
                remaining = &remaining[len.min(remaining.len())..];
            }
        }
    }
});
