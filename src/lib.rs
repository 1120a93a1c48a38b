#![doc = include_str!("../README.md")]
// TODO: remove once https://github.com/tokio-rs/tracing/issues/2912 lands
#![allow(clippy::blocks_in_conditions)]

use std::collections::HashSet;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

mod error;
pub use error::BuildRouterError;

pub mod swagger;
pub mod logging;
mod middleware;
pub mod runtime;

#[cfg(test)]
mod tests;

use swagger::{
	AssetStore,
	ConfigOption,
	DirectoryAssets,
	EmbeddedAssets,
	FileDoc,
	Gated,
	Registry,
	SwaggerUi,
	DEFAULT_INSTANCE_NAME,
};

/// Run the server.
///
/// This function will not exit until a SIGINT or SIGTERM signal is received.
/// If you want to supply a custom signal for graceful shutdown, use [`run_until()`] instead.
pub async fn run(config: runtime::Config) -> anyhow::Result<()>
{
	run_until(config, std::future::pending()).await
}

/// Run the server until a given future completes.
///
/// This function is the same as [`run()`], except that it also waits for the provided `until`
/// future, and shuts down the server when that future resolves.
pub async fn run_until<Until>(config: runtime::Config, until: Until) -> anyhow::Result<()>
where
	Until: Future<Output = ()> + Send + 'static,
{
	let router = router(&config).context("build router")?;

	tracing::debug!(addr = %config.addr, "binding tcp socket");

	let tcp_listener = TcpListener::bind(config.addr)
		.await
		.context("bind tcp socket")?;

	let addr = tcp_listener.local_addr().context("get tcp addr")?;

	tracing::info!(%addr, mount = %config.mount, "listening for requests");

	axum::serve(tcp_listener, router.into_make_service_with_connect_info::<SocketAddr>())
		.with_graceful_shutdown(async move {
			tokio::select! {
				() = until => {}
				() = runtime::signals::shutdown() => {}
			}
		})
		.await
		.context("run http server")
}

/// Builds the HTTP service described by `config`.
///
/// Every document in [`runtime::Config::docs`] gets its own viewer. A document without a
/// name is mounted at [`runtime::Config::mount`], a named one below
/// `<mount>/<name>`. All viewers are switched off together when the environment variable
/// named by [`runtime::Config::disable_var`] is set.
pub fn router(config: &runtime::Config) -> Result<Router, BuildRouterError>
{
	router_with_assets(config, || asset_store(config))
}

/// The asset store selected by `config`.
fn asset_store(config: &runtime::Config) -> Arc<dyn AssetStore>
{
	match &config.assets_dir {
		Some(dir) => {
			tracing::debug!(dir = %dir.display(), "serving assets from disk");
			Arc::new(DirectoryAssets::new(dir))
		}
		None => Arc::new(EmbeddedAssets::new()),
	}
}

/// Same as [`router()`], with the asset store created by `make_assets`.
///
/// `make_assets` is called at most once, and only if some viewer is enabled.
pub(crate) fn router_with_assets<F>(
	config: &runtime::Config,
	mut make_assets: F,
) -> Result<Router, BuildRouterError>
where
	F: FnMut() -> Arc<dyn AssetStore>,
{
	let registry = Registry::new();
	let mount = config.mount.trim_end_matches('/');
	let mut assets = None::<Arc<dyn AssetStore>>;
	let mut seen = HashSet::new();
	let mut router = Router::new();

	for source in &config.docs {
		let (instance, path) = match &source.name {
			None => (DEFAULT_INSTANCE_NAME, mount.to_owned()),
			Some(name) => (name.as_str(), format!("{mount}/{name}")),
		};

		if !seen.insert(instance) {
			return Err(BuildRouterError::DuplicateDocument { name: instance.to_owned() });
		}

		registry.register(instance, FileDoc(source.path.clone()));

		let root = format!("{path}/");
		let mut options = config.viewer_options();
		options.push(ConfigOption::InstanceName(instance.to_owned()));
		options.push(ConfigOption::MountPrefix(root.clone()));

		let viewer = Gated::from_env(&config.disable_var, || {
			let store = Arc::clone(assets.get_or_insert_with(&mut make_assets));
			SwaggerUi::new(store, registry.clone(), options)
		})
		.map_err(|source| BuildRouterError::Viewer { instance: instance.to_owned(), source })?;

		tracing::info!(instance, path = %root, enabled = viewer.is_enabled(), "mounting document");

		router = swagger::mount(router, &path, viewer);
	}

	if assets.is_none() {
		tracing::info!("no viewer is enabled, skipping asset store");
	}

	if config.compress {
		router = router.layer(CompressionLayer::new());
	}

	Ok(router.layer(middleware::logging::layer()))
}
