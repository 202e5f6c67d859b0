// self
use crate::obs::{FailureClass, FlowKind, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"discord_oauth2_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts a failed flow by class and (for Discord error responses) HTTP status.
pub fn record_flow_failure(kind: FlowKind, class: FailureClass, status: Option<u16>) {
	#[cfg(feature = "metrics")]
	{
		let status = status.map_or_else(|| "none".to_owned(), |status| status.to_string());

		metrics::counter!(
			"discord_oauth2_flow_failures_total",
			"flow" => kind.as_str(),
			"failure" => class.as_str(),
			"status" => status
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, class, status);
	}
}
