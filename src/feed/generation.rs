use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Tags fetches so only the most recently started one may publish.
#[derive(Clone, Debug, Default)]
pub struct FetchGeneration(Arc<AtomicU64>);

/// Proof of which generation a fetch belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchGeneration {
	/// Start a fetch, superseding every outstanding ticket.
	pub fn begin(&self) -> FetchTicket {
		FetchTicket(self.0.fetch_add(1, Ordering::Relaxed) + 1)
	}

	pub fn is_current(&self, ticket: FetchTicket) -> bool {
		self.0.load(Ordering::Relaxed) == ticket.0
	}

	/// Supersede everything without starting a fetch.
	pub fn invalidate(&self) {
		self.0.fetch_add(1, Ordering::Relaxed);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn latest_ticket_wins() {
		let generation = FetchGeneration::default();
		let slow = generation.begin();
		let fast = generation.begin();
		assert!(!generation.is_current(slow));
		assert!(generation.is_current(fast));
	}

	#[test]
	fn invalidate_supersedes_all() {
		let generation = FetchGeneration::default();
		let ticket = generation.begin();
		generation.invalidate();
		assert!(!generation.is_current(ticket));
		let next = generation.begin();
		assert!(generation.is_current(next));
	}

	#[test]
	fn clones_share_the_counter() {
		let a = FetchGeneration::default();
		let b = a.clone();
		let ticket = a.begin();
		assert!(b.is_current(ticket));
		b.begin();
		assert!(!a.is_current(ticket));
	}
}
