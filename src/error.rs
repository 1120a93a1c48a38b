//! Errors that can occur while assembling the server.

use thiserror::Error;

use crate::swagger;

/// The server's router could not be built from its [configuration].
///
/// [configuration]: crate::runtime::Config
#[derive(Debug, Error)]
pub enum BuildRouterError
{
	/// Two documents would be served under the same instance name.
	#[error("document `{name}` was specified more than once")]
	DuplicateDocument
	{
		/// The instance name.
		name: String,
	},

	/// A viewer failed to initialize.
	#[error("failed to build viewer for `{instance}`")]
	Viewer
	{
		/// The viewer's instance name.
		instance: String,

		/// The underlying error.
		source: swagger::Error,
	},
}
