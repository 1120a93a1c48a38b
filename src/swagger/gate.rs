//! Disabling a viewer through the environment.

use std::env;
use std::ffi::OsStr;

use super::{Result, SwaggerUi};

/// A viewer that may have been switched off when it was mounted.
///
/// A disabled viewer answers every request with the same `404` an unknown path gets, so it
/// is indistinguishable from a route that does not exist.
#[derive(Debug, Clone)]
pub enum Gated
{
	/// Requests are dispatched normally.
	Enabled(SwaggerUi),

	/// Every request is a `404`.
	Disabled,
}

impl Gated
{
	/// Reads the environment variable `var` and builds the viewer only if it is unset or
	/// empty.
	///
	/// The variable is read once, right here. Changing it later has no effect on the returned
	/// value.
	#[tracing::instrument(skip(build), err(Debug))]
	pub fn from_env<F>(var: &str, build: F) -> Result<Self>
	where
		F: FnOnce() -> Result<SwaggerUi>,
	{
		Self::from_flag(env::var_os(var).as_deref(), build)
	}

	/// Same as [`Gated::from_env()`], but with the toggle's value passed in directly.
	pub fn from_flag<F>(flag: Option<&OsStr>, build: F) -> Result<Self>
	where
		F: FnOnce() -> Result<SwaggerUi>,
	{
		if flag.is_some_and(|value| !value.is_empty()) {
			tracing::info!("swagger ui is disabled");
			return Ok(Self::Disabled);
		}

		build().map(Self::Enabled)
	}

	/// Whether requests reach the viewer.
	pub const fn is_enabled(&self) -> bool
	{
		matches!(self, Self::Enabled(_))
	}
}

impl From<SwaggerUi> for Gated
{
	fn from(ui: SwaggerUi) -> Self
	{
		Self::Enabled(ui)
	}
}
