//! Fuzz target for blocking key reads.
//!
//! Feeds arbitrary chunks through a headless backend and reads keys until
//! input runs out. The reader must end with an input-stream error, never a
//! panic or a hang.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::time::Duration;
use termwin::input::{InputReader, LineBuffer};
use termwin::{Error, HeadlessBackend};

#[derive(Arbitrary, Debug)]
struct Session {
    chunks: Vec<Vec<u8>>,
    line_capacity: u8,
}

fuzz_target!(|session: Session| {
    let mut backend = HeadlessBackend::new(80, 24);
    for chunk in &session.chunks {
        backend.push_input(chunk);
    }
    let total: usize = session.chunks.iter().map(Vec::len).sum();

    let mut reader = InputReader::new(Duration::ZERO);
    let mut line = LineBuffer::new(usize::from(session.line_capacity));
    let mut keys = 0usize;
    loop {
        match reader.read_key(&mut backend) {
            Ok(key) => {
                keys += 1;
                assert!(keys <= total, "more keys than input bytes");
                line.apply(&key);
                assert!(line.len() <= line.capacity());
            }
            Err(Error::InputStream(_)) => break,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
});
