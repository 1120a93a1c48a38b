//! The errors that can occur while serving a viewer request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::asset_name::ClassificationMiss;
use super::registry::ReadDocError;

/// Body of every `404 Not Found` response produced by the viewer.
pub(crate) const NOT_FOUND_BODY: &str = "404 page not found";

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when serving viewer requests.
#[derive(Debug, Error)]
pub enum Error
{
	/// The request path does not name a viewer asset.
	#[error(transparent)]
	UnknownAsset(#[from] ClassificationMiss),

	/// The request path does not start with this instance's mount prefix.
	#[error("`{path}` is outside of mount prefix `{prefix}`")]
	OutsidePrefix
	{
		/// The requested path.
		path: String,

		/// The captured prefix.
		prefix: String,
	},

	/// The viewer has been disabled through its environment toggle.
	#[error("viewer is disabled")]
	Disabled,

	/// No specification document has been registered under the configured instance name.
	#[error("no specification document registered as `{instance}`")]
	DocNotRegistered
	{
		/// The instance name we looked up.
		instance: String,
	},

	/// The registered provider failed to produce the specification document.
	#[error("failed to read specification document `{instance}`")]
	ReadDoc
	{
		/// The instance name we looked up.
		instance: String,

		/// The provider's error.
		source: ReadDocError,
	},

	/// The HTML shell could not be parsed or rendered.
	#[error("failed to render the index template")]
	Template(#[from] tera::Error),
}

impl Error
{
	/// The status code this error is reported with.
	pub fn status(&self) -> StatusCode
	{
		match self {
			Self::UnknownAsset(_) | Self::OutsidePrefix { .. } | Self::Disabled => {
				StatusCode::NOT_FOUND
			}
			Self::DocNotRegistered { .. } | Self::ReadDoc { .. } | Self::Template(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl IntoResponse for Error
{
	fn into_response(self) -> Response
	{
		let status = self.status();

		if status.is_server_error() {
			tracing::error!(error = ?self, "failed to serve viewer request");
			return status.into_response();
		}

		tracing::debug!(error = %self, "viewer asset not found");

		(status, NOT_FOUND_BODY).into_response()
	}
}
