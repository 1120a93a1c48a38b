//! Log-capturing facilities.

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod stderr;

/// Initializes [`tracing-subscriber`].
///
/// Logs are written to STDERR. The `RUST_LOG` environment variable controls which events
/// are emitted; an invalid value is reported and replaced by the defaults.
///
/// [`tracing-subscriber`]: tracing_subscriber
pub fn init() -> anyhow::Result<()>
{
	let (stderr, rejected) = stderr::layer();

	tracing_subscriber::registry()
		.with(stderr)
		.try_init()
		.context("initialize tracing subscriber")?;

	if let Some(error) = rejected {
		tracing::warn!(target: "swagger_embed::runtime", %error, "ignoring invalid RUST_LOG");
	}

	tracing::debug!(target: "swagger_embed::runtime", "initialized logging");

	Ok(())
}
