//! Wrapping per-event sequence counter.
//!
//! Every frame carries a single sequence byte.  A receiver sniffing a
//! best-effort broadcast stream uses it to detect reordering, duplication,
//! or loss: if bytes 1, 2, and 4 arrive but not 3, frame 3 was dropped in
//! transit.  One byte is all the wire format affords, so the counter wraps
//! from 255 back to 0 and receivers must treat the sequence as modular.
//!
//! The counter advances once per framed event regardless of whether the
//! subsequent transmission succeeds; a send failure therefore also shows up
//! as a gap on the receiving side.
//!
//! # Thread safety
//!
//! The relay pipeline is single-threaded, but the counter uses an
//! `AtomicU8` so that `next()` stays atomic if a caller ever dispatches
//! events from more than one thread.  `fetch_add` on `AtomicU8` wraps
//! modulo 256 natively, which is exactly the wire contract.

use std::sync::atomic::{AtomicU8, Ordering};

/// A wrapping, per-session counter for frame sequence bytes.
///
/// Starts at 0 and increments by 1 modulo 256 with each call to [`next`].
///
/// # Examples
///
/// ```rust
/// use arpcast_core::protocol::SequenceCounter;
///
/// let counter = SequenceCounter::new();
/// assert_eq!(counter.next(), 0);
/// assert_eq!(counter.next(), 1);
/// ```
///
/// [`next`]: SequenceCounter::next
#[derive(Debug, Default)]
pub struct SequenceCounter {
    inner: AtomicU8,
}

impl SequenceCounter {
    /// Creates a new counter starting at 0.
    pub fn new() -> Self {
        Self {
            inner: AtomicU8::new(0),
        }
    }

    /// Returns the current sequence byte and advances the counter.
    ///
    /// The first call returns 0, the second 1, and the 257th returns 0
    /// again.  `Ordering::Relaxed` is sufficient: the value only numbers
    /// frames, it does not synchronise memory between threads.
    pub fn next(&self) -> u8 {
        self.inner.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the current value without advancing.  Useful for logging.
    pub fn current(&self) -> u8 {
        self.inner.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequence_counter_starts_at_zero() {
        let counter = SequenceCounter::new();
        assert_eq!(counter.next(), 0);
    }

    #[test]
    fn test_sequence_counter_counts_every_byte_then_wraps() {
        // Arrange
        let counter = SequenceCounter::new();

        // Act
        let values: Vec<u8> = (0..256).map(|_| counter.next()).collect();

        // Assert – 256 consecutive calls return exactly 0..=255 in order,
        // and the 257th call wraps back to 0.
        let expected: Vec<u8> = (0..=255).collect();
        assert_eq!(values, expected);
        assert_eq!(counter.next(), 0, "counter must wrap to 0 after 255");
    }

    #[test]
    fn test_current_does_not_advance() {
        let counter = SequenceCounter::new();
        counter.next();

        assert_eq!(counter.current(), 1);
        assert_eq!(counter.next(), 1, "next() returns the value before the increment");
    }

    #[test]
    fn test_sequence_counter_is_atomic_across_threads() {
        // Arrange – two threads each draw 128 values, together covering one
        // full wrap of the byte ring.
        let counter = Arc::new(SequenceCounter::new());

        // Act
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let c = Arc::clone(&counter);
                thread::spawn(move || (0..128).map(|_| c.next()).collect::<Vec<u8>>())
            })
            .collect();

        let mut all_values: Vec<u8> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect();

        // Assert – every byte value was handed out exactly once.
        all_values.sort_unstable();
        let expected: Vec<u8> = (0..=255).collect();
        assert_eq!(all_values, expected);
    }

    #[test]
    fn test_default_creates_counter_at_zero() {
        let counter = SequenceCounter::default();
        assert_eq!(counter.next(), 0);
    }
}
