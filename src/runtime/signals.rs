//! Shutdown signals.
//!
//! The server stops on SIGINT (Ctrl-C) and, on Unix, on SIGTERM, which is what container
//! runtimes send.

use std::future;

use tokio::signal;

/// Resolves once the process is asked to shut down.
///
/// A signal that cannot be listened for is logged and ignored; the other one still works.
#[tracing::instrument(name = "runtime::signals")]
pub async fn shutdown()
{
	tokio::select! {
		() = interrupt() => {}
		() = terminate() => {}
	}
}

/// SIGINT
async fn interrupt()
{
	match signal::ctrl_c().await {
		Ok(()) => tracing::warn!(signal = "SIGINT", "shutting down"),
		Err(error) => {
			tracing::error!(%error, "cannot listen for SIGINT");
			future::pending::<()>().await;
		}
	}
}

/// SIGTERM
#[cfg(unix)]
async fn terminate()
{
	use tokio::signal::unix::{signal, SignalKind};

	match signal(SignalKind::terminate()) {
		Ok(mut stream) => {
			stream.recv().await;
			tracing::warn!(signal = "SIGTERM", "shutting down");
		}
		Err(error) => {
			tracing::error!(%error, "cannot listen for SIGTERM");
			future::pending::<()>().await;
		}
	}
}

#[cfg(not(unix))]
async fn terminate()
{
	future::pending::<()>().await;
}

#[cfg(test)]
mod tests
{
	use futures::FutureExt;

	use super::*;

	#[tokio::test]
	async fn pending_without_a_signal()
	{
		let mut shutdown = Box::pin(shutdown());

		assert!((&mut shutdown).now_or_never().is_none());

		tokio::task::yield_now().await;

		assert!(shutdown.now_or_never().is_none());
	}
}
