//! Refresh-in-flight bookkeeping owned by each session client.
//!
//! The coordinator is the only place that decides whether an authorization failure starts a
//! refresh or waits for one. Its state sits behind a synchronous mutex that is never held across
//! an `.await`, so the in-flight flag is always set before the refresh call is dispatched.

// std
use std::mem;
// crates.io
use tokio::sync::oneshot;
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Outcome of a refresh, shared by the leader and every queued caller.
pub(crate) type Settlement = std::result::Result<TokenSecret, Arc<Error>>;

/// How a caller that just observed a 401 should proceed.
pub(crate) enum Admission<'a> {
	/// No refresh was running; the caller now owns it.
	Leader(InFlight<'a>),
	/// A refresh is running; wait for its settlement.
	Waiter(oneshot::Receiver<Settlement>),
	/// The credentials were rotated after the caller attached its own; replay directly.
	Rotated,
}

#[derive(Debug, Default)]
struct RefreshState {
	in_flight: bool,
	generation: u64,
	waiters: VecDeque<oneshot::Sender<Settlement>>,
}

/// Owned refresh-in-flight flag, pending-call queue, and rotation generation.
#[derive(Debug, Default)]
pub(crate) struct RefreshCoordinator {
	state: Mutex<RefreshState>,
}
impl RefreshCoordinator {
	pub(crate) fn generation(&self) -> u64 {
		self.state.lock().generation
	}

	pub(crate) fn bump_generation(&self) {
		self.state.lock().generation += 1;
	}

	pub(crate) fn is_refreshing(&self) -> bool {
		self.state.lock().in_flight
	}

	pub(crate) fn waiters(&self) -> usize {
		self.state.lock().waiters.len()
	}

	/// Classifies a caller whose request was attached at `observed_generation`.
	pub(crate) fn admit(&self, observed_generation: Option<u64>) -> Admission<'_> {
		let mut state = self.state.lock();

		if state.in_flight {
			let (tx, rx) = oneshot::channel();

			state.waiters.push_back(tx);

			return Admission::Waiter(rx);
		}
		if observed_generation.is_some_and(|generation| generation != state.generation) {
			return Admission::Rotated;
		}

		state.in_flight = true;

		Admission::Leader(InFlight { coordinator: self, settled: false })
	}
}

/// Proof of leadership over the current refresh.
///
/// Settling hands the outcome to every queued caller in enqueue order. Dropping the guard
/// without settling releases the flag and drops the queued senders, so waiters observe a closed
/// channel instead of hanging.
pub(crate) struct InFlight<'a> {
	coordinator: &'a RefreshCoordinator,
	settled: bool,
}
impl InFlight<'_> {
	/// Returns to idle, bumps the generation when `rotated`, and resolves every waiter.
	pub(crate) fn settle(mut self, outcome: &Settlement, rotated: bool) -> usize {
		let waiters = {
			let mut state = self.coordinator.state.lock();

			state.in_flight = false;

			if rotated {
				state.generation += 1;
			}

			mem::take(&mut state.waiters)
		};
		let resumed = waiters.len();

		self.settled = true;

		for waiter in waiters {
			// A receiver may already be gone if its caller was dropped.
			let _ = waiter.send(outcome.clone());
		}

		resumed
	}
}
impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		if self.settled {
			return;
		}

		let mut state = self.coordinator.state.lock();

		state.in_flight = false;
		state.waiters.clear();
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn leader(admission: Admission<'_>) -> InFlight<'_> {
		match admission {
			Admission::Leader(in_flight) => in_flight,
			_ => panic!("Expected to become the refresh leader."),
		}
	}

	fn waiter(admission: Admission<'_>) -> oneshot::Receiver<Settlement> {
		match admission {
			Admission::Waiter(rx) => rx,
			_ => panic!("Expected to be queued behind the refresh."),
		}
	}

	#[tokio::test]
	async fn second_failure_queues_and_settlement_resolves_in_order() {
		let coordinator = RefreshCoordinator::default();
		let in_flight = leader(coordinator.admit(Some(0)));

		assert!(coordinator.is_refreshing());

		let first = waiter(coordinator.admit(Some(0)));
		let second = waiter(coordinator.admit(Some(0)));

		assert_eq!(coordinator.waiters(), 2);
		assert_eq!(in_flight.settle(&Ok(TokenSecret::new("A2")), true), 2);
		assert!(!coordinator.is_refreshing());
		assert_eq!(coordinator.waiters(), 0);
		assert_eq!(coordinator.generation(), 1);

		for rx in [first, second] {
			let token = rx
				.await
				.expect("Settlement should be delivered.")
				.expect("Settlement should be successful.");

			assert_eq!(token.expose(), "A2");
		}
	}

	#[test]
	fn stale_generation_replays_instead_of_refreshing() {
		let coordinator = RefreshCoordinator::default();

		coordinator.bump_generation();

		assert!(matches!(coordinator.admit(Some(0)), Admission::Rotated));
		assert!(!coordinator.is_refreshing());

		let _in_flight = leader(coordinator.admit(Some(1)));

		assert!(coordinator.is_refreshing());
	}

	#[tokio::test]
	async fn failed_settlement_shares_one_error() {
		let coordinator = RefreshCoordinator::default();
		let in_flight = leader(coordinator.admit(None));
		let rx = waiter(coordinator.admit(None));
		let cause = Arc::new(Error::Api { status: 401, message: None });

		in_flight.settle(&Err(cause.clone()), false);

		let received = rx
			.await
			.expect("Settlement should be delivered.")
			.expect_err("Settlement should carry the refresh error.");

		assert!(Arc::ptr_eq(&received, &cause));
		assert_eq!(coordinator.generation(), 0);
	}

	#[tokio::test]
	async fn dropping_leader_releases_flag_and_closes_waiters() {
		let coordinator = RefreshCoordinator::default();
		let in_flight = leader(coordinator.admit(None));
		let rx = waiter(coordinator.admit(None));

		drop(in_flight);

		assert!(!coordinator.is_refreshing());
		assert!(rx.await.is_err(), "Waiters must observe a closed channel.");
		assert!(matches!(coordinator.admit(None), Admission::Leader(_)));
	}
}
