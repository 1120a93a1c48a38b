//! An embeddable Swagger UI.
//!
//! A [`SwaggerUi`] answers every request below the path it is mounted at. The last path
//! segment decides what is served:
//!
//! - `index.html` (or an empty segment) renders the HTML shell from the instance's
//!   [`Config`]
//! - `doc.json` returns the specification document registered in the [`Registry`] under
//!   [`Config::instance_name`]
//! - every other recognized [`AssetName`] is delegated to an [`AssetStore`]
//! - anything else is a `404`
//!
//! The mount prefix does not need to be configured; it is captured from the first request
//! and fixed from then on.
//!
//! ```no_run
//! use axum::Router;
//! use swagger_embed::swagger::{self, ConfigOption, EmbeddedAssets, Registry, StaticDoc};
//!
//! # fn main() -> swagger_embed::swagger::Result<()> {
//! let registry = Registry::new();
//! registry.register("v1", StaticDoc(String::from(r#"{"openapi":"3.1.0"}"#)));
//!
//! let ui = swagger::SwaggerUi::new(EmbeddedAssets::new(), registry, [
//! 	ConfigOption::InstanceName("v1".into()),
//! ])?;
//!
//! let router: Router = swagger::mount(Router::new(), "/swagger", ui);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use axum::extract::{OriginalUri, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Response};

mod error;
pub use error::{Error, Result};

mod config;
pub use config::{
	Config,
	ConfigOption,
	DocExpansion,
	ParseDocExpansionError,
	DEFAULT_TITLE,
	DEFAULT_URL,
};

mod asset_name;
pub use asset_name::{classify, AssetName, ClassificationMiss, Classified};

pub mod content_type;

mod prefix;
pub use prefix::MountPrefix;

pub mod registry;
pub use registry::{
	DocProvider,
	FileDoc,
	ReadDocError,
	Registry,
	StaticDoc,
	DEFAULT_INSTANCE_NAME,
};

pub mod assets;
pub use assets::{AssetStore, DirectoryAssets, EmbeddedAssets};

mod template;
use template::IndexTemplate;

mod gate;
pub use gate::Gated;

mod http;
pub use http::mount;

/// A mounted viewer instance.
///
/// This is a cheaply cloneable handle; clones share configuration, mount prefix, and asset
/// store.
#[derive(Clone)]
pub struct SwaggerUi
{
	#[allow(clippy::missing_docs_in_private_items)]
	inner: Arc<Inner>,
}

#[allow(clippy::missing_docs_in_private_items)]
struct Inner
{
	config: Config,
	prefix: MountPrefix,
	template: IndexTemplate,
	registry: Registry,
	assets: Arc<dyn AssetStore>,
}

impl fmt::Debug for SwaggerUi
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("SwaggerUi")
			.field("config", &self.inner.config)
			.field("prefix", &self.inner.prefix)
			.field("registry", &self.inner.registry)
			.finish_non_exhaustive()
	}
}

impl SwaggerUi
{
	/// Creates a viewer from the default [`Config`] and a list of `options`.
	pub fn new<A, I>(assets: A, registry: Registry, options: I) -> Result<Self>
	where
		A: AssetStore,
		I: IntoIterator<Item = ConfigOption>,
	{
		Self::with_config(Config::resolve(options), assets, registry)
	}

	/// Creates a viewer from a complete [`Config`].
	///
	/// Empty `instance_name` and `title` fields fall back to their defaults.
	#[tracing::instrument(skip(assets, registry), err(Debug))]
	pub fn with_config<A>(config: Config, assets: A, registry: Registry) -> Result<Self>
	where
		A: AssetStore,
	{
		let config = config.finalize();
		let prefix = MountPrefix::new(config.mount_prefix.as_deref());
		let template = IndexTemplate::new()?;

		Ok(Self {
			inner: Arc::new(Inner { config, prefix, template, registry, assets: Arc::new(assets) }),
		})
	}

	/// The configuration this viewer was created with.
	pub fn config(&self) -> &Config
	{
		&self.inner.config
	}

	/// The mount prefix, if it is already known.
	pub fn mount_prefix(&self) -> Option<&str>
	{
		self.inner.prefix.get()
	}

	/// Produces the response for a single request.
	#[tracing::instrument(level = "debug", skip_all, fields(uri = %request.uri()), err(Debug, level = "debug"))]
	pub async fn dispatch(&self, request: Request) -> Result<Response>
	{
		let uri = request
			.extensions()
			.get::<OriginalUri>()
			.map_or_else(|| request.uri().clone(), |OriginalUri(uri)| uri.clone());

		let path = uri.path_and_query().map_or(uri.path(), |path_and_query| path_and_query.as_str());
		let Classified { prefix: candidate, asset } = classify(path)?;
		let prefix = self.inner.prefix.get_or_init(candidate);

		let mut response = match asset {
			AssetName::Index => self.index()?,
			AssetName::Doc => self.doc().await?,
			asset => {
				debug_assert!(!asset.is_generated(), "{asset} is generated, not stored");

				let Some(relative) = uri.path().strip_prefix(prefix) else {
					return Err(Error::OutsidePrefix {
						path: uri.path().to_owned(),
						prefix: prefix.to_owned(),
					});
				};

				tracing::trace!(%asset, relative, "delegating to asset store");

				let request = rebase(request, asset, uri.query());

				self.inner.assets.serve(asset, request).await
			}
		};

		if let Some(content_type) = content_type::resolve(asset.as_str()) {
			response.headers_mut().insert(CONTENT_TYPE, content_type);
		}

		Ok(response)
	}

	/// Renders the HTML shell.
	fn index(&self) -> Result<Response>
	{
		let html = self.inner.template.render(&self.inner.config)?;

		Ok(Html(html).into_response())
	}

	/// Reads the specification document.
	async fn doc(&self) -> Result<Response>
	{
		let instance = &self.inner.config.instance_name;
		let provider = self
			.inner
			.registry
			.lookup(instance)
			.ok_or_else(|| Error::DocNotRegistered { instance: instance.clone() })?;

		let doc = provider
			.read_doc()
			.await
			.map_err(|source| Error::ReadDoc { instance: instance.clone(), source })?;

		Ok(doc.into_response())
	}
}

/// Rewrites `request` so its URI addresses `asset` relative to the mount prefix.
fn rebase(mut request: Request, asset: AssetName, query: Option<&str>) -> Request
{
	let path_and_query = match query {
		Some(query) => format!("/{asset}?{query}"),
		None => format!("/{asset}"),
	};

	// Asset names and an already valid query always form a valid URI.
	if let Ok(uri) = path_and_query.parse::<Uri>() {
		*request.uri_mut() = uri;
	}

	request
}
