//! Document key generation.

use chrono::Utc;

/// Generates unique document ids for one running process.
///
/// An id joins the current wall-clock second (hexadecimal) with a private
/// monotonically incrementing counter (decimal), e.g. `689c9a3e-42`, so two
/// calls within the same clock tick still differ by counter value. The
/// counter is owned state: independent stores in one process never share a
/// sequence. Uniqueness is not guaranteed across restarts.
#[derive(Debug, Default)]
pub struct KeyGenerator {
    seq: u64,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self { seq: 0 }
    }

    /// Produce the next id. Never returns the same value twice for one
    /// generator.
    pub fn next_id(&mut self) -> String {
        let ts = Utc::now().timestamp();
        let id = format!("{:x}-{}", ts, self.seq);
        self.seq += 1;
        id
    }
}
