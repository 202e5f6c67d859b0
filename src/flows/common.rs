//! Shared helpers for flow implementations (refresh coalescing slots, fingerprints, outcomes).

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	obs::{self, FailureClass, FlowKind, FlowOutcome, FlowSpan},
	session::SessionKey,
};

/// Per-refresh-token slot; the first holder stores the key it minted for the waiters.
pub(crate) type RefreshSlot = Arc<AsyncMutex<Option<SessionKey>>>;
/// In-flight refreshes keyed by refresh-token fingerprint.
pub(crate) type RefreshGuards = Mutex<HashMap<String, RefreshSlot>>;

/// Hashes a refresh token so raw secrets never sit in the coalescing map.
pub(crate) fn fingerprint(refresh_token: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(refresh_token.as_bytes());
	let digest = hasher.finalize();
	URL_SAFE_NO_PAD.encode(digest)
}

/// Returns (and creates on demand) the coalescing slot for a fingerprint.
pub(crate) fn refresh_slot(guards: &RefreshGuards, fingerprint: &str) -> RefreshSlot {
	let mut guards = guards.lock();

	guards.entry(fingerprint.to_owned()).or_insert_with(|| Arc::new(AsyncMutex::new(None))).clone()
}

/// Drops the slot from the map unless a newer one already replaced it.
pub(crate) fn release_refresh_slot(guards: &RefreshGuards, fingerprint: &str, slot: &RefreshSlot) {
	let mut guards = guards.lock();

	if guards.get(fingerprint).is_some_and(|current| Arc::ptr_eq(current, slot)) {
		guards.remove(fingerprint);
	}
}

/// Hold on a coalescing slot that releases it from the map when dropped.
///
/// Release happens on every exit path, including a caller-imposed timeout cancelling the
/// refresh mid-flight. The first holder to finish evicts the entry; callers already queued on
/// the slot still observe its result, while later arrivals open a fresh slot.
pub(crate) struct RefreshLease<'a> {
	guards: &'a RefreshGuards,
	fingerprint: String,
	slot: RefreshSlot,
}
impl<'a> RefreshLease<'a> {
	/// Joins (or opens) the slot for `refresh_token`.
	pub(crate) fn acquire(guards: &'a RefreshGuards, refresh_token: &str) -> Self {
		let fingerprint = fingerprint(refresh_token);
		let slot = refresh_slot(guards, &fingerprint);

		Self { guards, fingerprint, slot }
	}

	pub(crate) fn slot(&self) -> &RefreshSlot {
		&self.slot
	}
}
impl Drop for RefreshLease<'_> {
	fn drop(&mut self) {
		release_refresh_slot(self.guards, &self.fingerprint, &self.slot);
	}
}

/// Records the terminal outcome of a flow on its span and counters.
pub(crate) fn record_result<T>(span: &FlowSpan, kind: FlowKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_flow_outcome(kind, FlowOutcome::Success),
		Err(e) => {
			span.record_failure(e);
			obs::record_flow_outcome(kind, FlowOutcome::Failure);
			obs::record_flow_failure(kind, FailureClass::of(e), e.provider_status());
		},
	}
}
