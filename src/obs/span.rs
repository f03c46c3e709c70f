// self
use crate::{_prelude::*, ext::SessionLostReason, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by session calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("storefront_session.call", kind = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
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

/// Logs a lost session at `warn` level.
pub fn log_session_lost(reason: SessionLostReason, login_path: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(reason = reason.as_str(), login_path, "session lost; credentials cleared");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (reason, login_path);
	}
}

/// Logs a call parked behind an in-flight refresh at `debug` level.
pub fn log_queued(waiters: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(waiters, "call queued behind in-flight refresh");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = waiters;
	}
}
