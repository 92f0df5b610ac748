// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for [`TokenSource`](crate::flows::TokenSource) lookups.
#[derive(Debug, Default)]
pub struct TokenSourceMetrics {
	attempts: AtomicU64,
	refreshes: AtomicU64,
	failures: AtomicU64,
}
impl TokenSourceMetrics {
	/// Returns the total number of token lookups.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of lookups that refreshed and stored a new token.
	pub fn refreshes(&self) -> u64 {
		self.refreshes.load(Ordering::Relaxed)
	}

	/// Returns the number of lookups that surfaced an error.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh(&self) {
		self.refreshes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}
}
