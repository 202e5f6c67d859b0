// self
use crate::{
	_prelude::*,
	obs::{FailureClass, FlowKind},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span wrapper used by client flows; one span per login, refresh, or resource call.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens a span for `operation` (`login`, `refresh`, `get_user`, ...) of the given flow.
	///
	/// `failure` and `status` start empty and are filled by [`FlowSpan::record_failure`].
	pub fn new(kind: FlowKind, operation: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"discord_oauth2.flow",
				flow = kind.as_str(),
				operation,
				failure = tracing::field::Empty,
				status = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, operation);

			Self {}
		}
	}

	/// Tags the span with the failure class and, for Discord error responses, the HTTP status.
	pub fn record_failure(&self, error: &Error) {
		let class = FailureClass::of(error);
		let status = error.provider_status();

		#[cfg(feature = "tracing")]
		{
			self.span.record("failure", class.as_str());

			if let Some(status) = status {
				self.span.record("status", status);
			}

			tracing::debug!(parent: &self.span, failure = class.as_str(), ?status, "flow failed");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (class, status);
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> FlowSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			FlowSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FlowSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}
