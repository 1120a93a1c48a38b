//! Human-readable logs on STDERR.
//!
//! Interactive terminals get colored, multi-line events with span timings. Anything else
//! (pipes, container log collectors) gets one plain line per event.

use std::io::{self, IsTerminal};

use time::macros::format_description;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

/// Directives used when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVES: &str = "swagger_embed=info,tower_http=warn";

/// Returns the STDERR layer and whether `RUST_LOG` was rejected.
pub(super) fn layer<S>() -> (Box<dyn Layer<S> + Send + Sync + 'static>, Option<String>)
where
	S: Subscriber + for<'a> LookupSpan<'a>,
{
	let (filter, rejected) = filter();
	let interactive = io::stderr().is_terminal();
	let timer = UtcTime::new(format_description!("[hour]:[minute]:[second].[subsecond digits:3]Z"));
	let fmt = tracing_subscriber::fmt::layer()
		.with_writer(io::stderr)
		.with_timer(timer)
		.with_ansi(interactive);

	let layer = if interactive {
		fmt.pretty().with_span_events(FmtSpan::CLOSE).with_filter(filter).boxed()
	} else {
		fmt.compact().with_filter(filter).boxed()
	};

	(layer, rejected)
}

/// Builds the filter from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVES`].
fn filter() -> (EnvFilter, Option<String>)
{
	match EnvFilter::try_from_default_env() {
		Ok(filter) => (filter, None),
		Err(error) => {
			let rejected = std::env::var_os(EnvFilter::DEFAULT_ENV).map(|_| error.to_string());
			(EnvFilter::new(DEFAULT_DIRECTIVES), rejected)
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn default_directives_parse()
	{
		for directive in DEFAULT_DIRECTIVES.split(',') {
			assert!(directive.parse::<tracing_subscriber::filter::Directive>().is_ok(), "{directive}");
		}
	}
}
