//! Per-instance viewer configuration.
//!
//! A [`Config`] starts out with the documented defaults (see [`Config::default()`]) and is
//! then modified by an ordered list of [`ConfigOption`]s. Options are applied in order, so a
//! later option overrides an earlier one targeting the same field. Fields that no option
//! touches keep their default.
//!
//! ```
//! use swagger_embed::swagger::{Config, ConfigOption, DocExpansion};
//!
//! let config = Config::resolve([
//! 	ConfigOption::DocExpansion(DocExpansion::None),
//! 	ConfigOption::InstanceName("v2".into()),
//! ]);
//!
//! assert_eq!(config.doc_expansion, DocExpansion::None);
//! assert_eq!(config.instance_name, "v2");
//! assert_eq!(config.url, "doc.json");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::registry::DEFAULT_INSTANCE_NAME;

/// The title used when none (or an empty one) is configured.
pub const DEFAULT_TITLE: &str = "Swagger UI";

/// The specification document URL used when none is configured.
///
/// This is relative to the mount prefix, so by default the UI loads the document this
/// instance serves itself.
pub const DEFAULT_URL: &str = "doc.json";

/// Configuration for a single mounted viewer instance.
///
/// Instances are created once when the viewer is mounted and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config
{
	/// URL pointing to the API definition.
	pub url: String,

	/// Whether deep linking for tags and operations is enabled.
	pub deep_linking: bool,

	/// Whether authorization data survives a browser refresh.
	pub persist_authorization: bool,

	/// How deep models are expanded by default.
	///
	/// `-1` hides the models section entirely.
	pub default_models_expand_depth: i32,

	/// Default expansion of operations and tags.
	pub doc_expansion: DocExpansion,

	/// Page title of the rendered shell.
	pub title: String,

	/// Name the specification document was registered under.
	pub instance_name: String,

	/// Explicit mount prefix.
	///
	/// If this is `None`, the prefix is inferred from the first request.
	pub mount_prefix: Option<String>,

	/// Default OAuth2 client ID pre-filled in the authorization dialog.
	pub oauth2_client_id: Option<String>,
}

impl Default for Config
{
	fn default() -> Self
	{
		Self {
			url: String::from(DEFAULT_URL),
			deep_linking: true,
			persist_authorization: false,
			default_models_expand_depth: 1,
			doc_expansion: DocExpansion::List,
			title: String::from(DEFAULT_TITLE),
			instance_name: String::from(DEFAULT_INSTANCE_NAME),
			mount_prefix: None,
			oauth2_client_id: None,
		}
	}
}

impl Config
{
	/// Applies `options` to the default configuration, in order.
	pub fn resolve<I>(options: I) -> Self
	where
		I: IntoIterator<Item = ConfigOption>,
	{
		options
			.into_iter()
			.fold(Self::default(), Self::with)
			.finalize()
	}

	/// Applies a single option.
	pub fn with(mut self, option: ConfigOption) -> Self
	{
		option.apply(&mut self);
		self
	}

	/// Sets [`Config::url`].
	pub fn url<S>(self, url: S) -> Self
	where
		S: Into<String>,
	{
		self.with(ConfigOption::Url(url.into()))
	}

	/// Sets [`Config::deep_linking`].
	pub fn deep_linking(self, deep_linking: bool) -> Self
	{
		self.with(ConfigOption::DeepLinking(deep_linking))
	}

	/// Sets [`Config::persist_authorization`].
	pub fn persist_authorization(self, persist_authorization: bool) -> Self
	{
		self.with(ConfigOption::PersistAuthorization(persist_authorization))
	}

	/// Sets [`Config::default_models_expand_depth`].
	pub fn default_models_expand_depth(self, depth: i32) -> Self
	{
		self.with(ConfigOption::DefaultModelsExpandDepth(depth))
	}

	/// Sets [`Config::doc_expansion`].
	pub fn doc_expansion(self, doc_expansion: DocExpansion) -> Self
	{
		self.with(ConfigOption::DocExpansion(doc_expansion))
	}

	/// Sets [`Config::title`].
	pub fn title<S>(self, title: S) -> Self
	where
		S: Into<String>,
	{
		self.with(ConfigOption::Title(title.into()))
	}

	/// Sets [`Config::instance_name`].
	pub fn instance_name<S>(self, instance_name: S) -> Self
	where
		S: Into<String>,
	{
		self.with(ConfigOption::InstanceName(instance_name.into()))
	}

	/// Sets [`Config::mount_prefix`].
	pub fn mount_prefix<S>(self, mount_prefix: S) -> Self
	where
		S: Into<String>,
	{
		self.with(ConfigOption::MountPrefix(mount_prefix.into()))
	}

	/// Sets [`Config::oauth2_client_id`].
	pub fn oauth2_client_id<S>(self, client_id: S) -> Self
	where
		S: Into<String>,
	{
		self.with(ConfigOption::OAuth2ClientId(client_id.into()))
	}

	/// Replaces empty required fields with their defaults.
	///
	/// This runs after all options have been applied, and again when a hand-built config is
	/// mounted.
	pub(crate) fn finalize(mut self) -> Self
	{
		if self.instance_name.is_empty() {
			self.instance_name = String::from(DEFAULT_INSTANCE_NAME);
		}

		if self.title.is_empty() {
			self.title = String::from(DEFAULT_TITLE);
		}

		self
	}
}

/// A single modification of a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOption
{
	/// See [`Config::url`].
	Url(String),

	/// See [`Config::deep_linking`].
	DeepLinking(bool),

	/// See [`Config::persist_authorization`].
	PersistAuthorization(bool),

	/// See [`Config::default_models_expand_depth`].
	DefaultModelsExpandDepth(i32),

	/// See [`Config::doc_expansion`].
	DocExpansion(DocExpansion),

	/// See [`Config::title`].
	Title(String),

	/// See [`Config::instance_name`].
	InstanceName(String),

	/// See [`Config::mount_prefix`].
	MountPrefix(String),

	/// See [`Config::oauth2_client_id`].
	OAuth2ClientId(String),
}

impl ConfigOption
{
	/// Writes this option into `config`.
	pub fn apply(self, config: &mut Config)
	{
		match self {
			Self::Url(url) => config.url = url,
			Self::DeepLinking(deep_linking) => config.deep_linking = deep_linking,
			Self::PersistAuthorization(persist) => config.persist_authorization = persist,
			Self::DefaultModelsExpandDepth(depth) => config.default_models_expand_depth = depth,
			Self::DocExpansion(doc_expansion) => config.doc_expansion = doc_expansion,
			Self::Title(title) => config.title = title,
			Self::InstanceName(instance_name) => config.instance_name = instance_name,
			Self::MountPrefix(mount_prefix) => config.mount_prefix = Some(mount_prefix),
			Self::OAuth2ClientId(client_id) => config.oauth2_client_id = Some(client_id),
		}
	}
}

/// Default expansion setting for operations and tags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion
{
	/// Expands only the tags.
	#[default]
	List,

	/// Expands tags and operations.
	Full,

	/// Expands nothing.
	None,
}

impl DocExpansion
{
	/// The value Swagger UI expects for this setting.
	pub const fn as_str(&self) -> &'static str
	{
		match self {
			Self::List => "list",
			Self::Full => "full",
			Self::None => "none",
		}
	}
}

impl fmt::Display for DocExpansion
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown [`DocExpansion`] value.
#[derive(Debug, Error)]
#[error("unknown doc expansion `{0}`; expected one of `list`, `full`, `none`")]
pub struct ParseDocExpansionError(String);

impl FromStr for DocExpansion
{
	type Err = ParseDocExpansionError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		match value {
			"list" => Ok(Self::List),
			"full" => Ok(Self::Full),
			"none" => Ok(Self::None),
			unknown => Err(ParseDocExpansionError(unknown.to_owned())),
		}
	}
}
