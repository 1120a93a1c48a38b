//! This module contains the [`Config`] struct - the server's configuration.
//!
//! Every option can be passed on the command line or set in the environment.
//! See the `.env.example` file in the root of the repository for all the
//! relevant variables and example values.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::swagger::{ConfigOption, DocExpansion};

/// The server's runtime configuration.
#[derive(Debug, Clone, clap::Parser)]
#[command(version, about)]
pub struct Config
{
	/// The address the server is going to listen on.
	#[arg(long, env = "SWAGGER_EMBED_ADDR", default_value = "127.0.0.1:8080")]
	pub addr: SocketAddr,

	/// Path under which the viewers are mounted.
	///
	/// A document registered without a name is served directly below this
	/// path, named documents are served below `<mount>/<name>`.
	#[arg(long, env = "SWAGGER_EMBED_MOUNT", default_value = "/swagger")]
	pub mount: String,

	/// Specification documents to serve, as `[NAME=]PATH`.
	#[arg(
		long = "doc",
		env = "SWAGGER_EMBED_DOCS",
		value_delimiter = ',',
		required = true
	)]
	pub docs: Vec<DocSource>,

	/// Name of the environment variable that disables all viewers when it is
	/// set to a non-empty value.
	#[arg(long, env = "SWAGGER_EMBED_DISABLE_VAR", default_value = "SWAGGER_DISABLE")]
	pub disable_var: String,

	/// Default expansion of operations and tags (`list`, `full`, or `none`).
	#[arg(long, env = "SWAGGER_EMBED_DOC_EXPANSION", default_value_t = DocExpansion::List)]
	pub doc_expansion: DocExpansion,

	/// Page title of the viewers.
	#[arg(long, env = "SWAGGER_EMBED_TITLE")]
	pub title: Option<String>,

	/// Whether authorization data should survive a browser refresh.
	#[arg(long, env = "SWAGGER_EMBED_PERSIST_AUTHORIZATION")]
	pub persist_authorization: bool,

	/// Default OAuth2 client ID.
	#[arg(long, env = "SWAGGER_EMBED_OAUTH2_CLIENT_ID")]
	pub oauth2_client_id: Option<String>,

	/// Directory containing a Swagger UI distribution.
	///
	/// If this is not set, the distribution compiled into the binary is used.
	#[arg(long, env = "SWAGGER_EMBED_ASSETS_DIR")]
	pub assets_dir: Option<PathBuf>,

	/// Compress responses with gzip.
	#[arg(long, env = "SWAGGER_EMBED_COMPRESS")]
	pub compress: bool,
}

impl Config
{
	/// Viewer options shared by every mounted document.
	pub fn viewer_options(&self) -> Vec<ConfigOption>
	{
		let mut options = vec![
			ConfigOption::DocExpansion(self.doc_expansion),
			ConfigOption::PersistAuthorization(self.persist_authorization),
		];

		if let Some(title) = &self.title {
			options.push(ConfigOption::Title(title.clone()));
		}

		if let Some(client_id) = &self.oauth2_client_id {
			options.push(ConfigOption::OAuth2ClientId(client_id.clone()));
		}

		options
	}
}

/// A specification document on disk, optionally with an instance name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSource
{
	/// The instance name.
	pub name: Option<String>,

	/// Path to the document.
	pub path: PathBuf,
}

/// Error that can occur while parsing a [`DocSource`].
#[derive(Debug, Error)]
pub enum ParseDocSourceError
{
	/// The path was empty.
	#[error("document path cannot be empty")]
	EmptyPath,

	/// The name contained characters that cannot appear in a path segment.
	#[error("invalid document name `{0}`")]
	InvalidName(String),
}

impl FromStr for DocSource
{
	type Err = ParseDocSourceError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		let (name, path) = match value.split_once('=') {
			Some((name, path)) => (Some(name), path),
			None => (None, value),
		};

		if path.is_empty() {
			return Err(ParseDocSourceError::EmptyPath);
		}

		let name = match name {
			None => None,
			Some(name)
				if !name.is_empty()
					&& name
						.chars()
						.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) =>
			{
				Some(name.to_owned())
			}
			Some(name) => return Err(ParseDocSourceError::InvalidName(name.to_owned())),
		};

		Ok(Self { name, path: PathBuf::from(path) })
	}
}

#[cfg(test)]
mod tests
{
	use clap::Parser;

	use super::*;

	#[test]
	fn parse_doc_sources()
	{
		let unnamed = "docs/openapi.json".parse::<DocSource>().expect("valid source");

		assert_eq!(unnamed, DocSource { name: None, path: PathBuf::from("docs/openapi.json") });

		let named = "v1=api/v1.json".parse::<DocSource>().expect("valid source");

		assert_eq!(named.name.as_deref(), Some("v1"));
		assert_eq!(named.path, PathBuf::from("api/v1.json"));

		assert!(matches!("v1=".parse::<DocSource>(), Err(ParseDocSourceError::EmptyPath)));
		assert!(matches!(
			"a/b=x.json".parse::<DocSource>(),
			Err(ParseDocSourceError::InvalidName(_))
		));
	}

	#[test]
	fn parse_command_line()
	{
		let config = Config::try_parse_from([
			"swagger-embed",
			"--doc",
			"v1=v1.json,v2=v2.json",
			"--doc-expansion",
			"none",
			"--title",
			"Books",
		])
		.expect("valid arguments");

		assert_eq!(config.docs.len(), 2);
		assert_eq!(config.doc_expansion, DocExpansion::None);
		assert!(config.viewer_options().contains(&ConfigOption::Title("Books".into())));
		assert!(config.viewer_options().contains(&ConfigOption::DocExpansion(DocExpansion::None)));
	}
}
