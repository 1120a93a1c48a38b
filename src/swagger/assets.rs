//! Static asset stores.
//!
//! Everything that is not `index.html` or `doc.json` is delegated to an [`AssetStore`].
//! The store receives the original request, with its URI rewritten to be relative to the
//! viewer's mount prefix (e.g. `/swagger/v1/swagger-ui.css` becomes `/swagger-ui.css`), so it
//! can apply conditional requests, ranges, and caching however it sees fit.
//!
//! Two stores are provided:
//!
//! - [`EmbeddedAssets`] serves the Swagger UI distribution compiled into the binary
//! - [`DirectoryAssets`] serves a distribution from a directory on disk

use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use futures::future::{self, BoxFuture, FutureExt};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use super::asset_name::AssetName;
use super::error::NOT_FOUND_BODY;

/// A read-only, name-addressed source of UI files.
pub trait AssetStore: Send + Sync + 'static
{
	/// Responds to `request` for `asset`.
	///
	/// This is only ever called for assets that are not [generated].
	///
	/// [generated]: AssetName::is_generated
	fn serve(&self, asset: AssetName, request: Request) -> BoxFuture<'static, Response>;
}

impl<T> AssetStore for Arc<T>
where
	T: AssetStore + ?Sized,
{
	fn serve(&self, asset: AssetName, request: Request) -> BoxFuture<'static, Response>
	{
		(**self).serve(asset, request)
	}
}

/// The Swagger UI distribution vendored by [`utoipa_swagger_ui`].
///
/// Responses carry a strong `ETag`, and `If-None-Match` requests for unchanged files are
/// answered with `304 Not Modified`.
#[derive(Clone)]
pub struct EmbeddedAssets
{
	/// Required by [`utoipa_swagger_ui::serve()`]; only consulted for its own initializer
	/// script, which we never request.
	config: Arc<utoipa_swagger_ui::Config<'static>>,
}

impl fmt::Debug for EmbeddedAssets
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("EmbeddedAssets").finish_non_exhaustive()
	}
}

impl EmbeddedAssets
{
	/// Creates a new [`EmbeddedAssets`].
	pub fn new() -> Self
	{
		Self { config: Arc::new(utoipa_swagger_ui::Config::from("doc.json")) }
	}

	/// Builds the response for `asset`.
	fn respond(&self, asset: AssetName, headers: &HeaderMap) -> Response
	{
		let file = match utoipa_swagger_ui::serve(asset.as_str(), Arc::clone(&self.config)) {
			Ok(Some(file)) => file,
			Ok(None) => {
				tracing::debug!(%asset, "asset is not part of the embedded distribution");
				return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response();
			}
			Err(error) => {
				tracing::error!(%asset, %error, "failed to read embedded asset");
				return StatusCode::INTERNAL_SERVER_ERROR.into_response();
			}
		};

		let etag = format!("\"{:08x}\"", crc32fast::hash(&file.bytes));
		let mut response = if matches_etag(headers, &etag) {
			StatusCode::NOT_MODIFIED.into_response()
		} else {
			let mut response = Response::new(Body::from(file.bytes.into_owned()));

			if let Ok(content_type) = HeaderValue::from_str(&file.content_type) {
				response.headers_mut().insert(CONTENT_TYPE, content_type);
			}

			response
		};

		if let Ok(etag) = HeaderValue::from_str(&etag) {
			response.headers_mut().insert(ETAG, etag);
		}

		response
			.headers_mut()
			.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

		response
	}
}

impl AssetStore for EmbeddedAssets
{
	#[tracing::instrument(level = "trace", skip(self, request))]
	fn serve(&self, asset: AssetName, request: Request) -> BoxFuture<'static, Response>
	{
		future::ready(self.respond(asset, request.headers())).boxed()
	}
}

/// Whether an `If-None-Match` header in `headers` matches `etag`.
fn matches_etag(headers: &HeaderMap, etag: &str) -> bool
{
	headers
		.get_all(IF_NONE_MATCH)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(|value| value.split(','))
		.map(|candidate| candidate.trim().trim_start_matches("W/"))
		.any(|candidate| candidate == "*" || candidate == etag)
}

/// A Swagger UI distribution in a directory on disk.
///
/// This is backed by [`ServeDir`], which handles conditional requests and ranges.
#[derive(Debug, Clone)]
pub struct DirectoryAssets
{
	/// The directory service.
	dir: ServeDir,
}

impl DirectoryAssets
{
	/// Serves files from `root`.
	pub fn new<P>(root: P) -> Self
	where
		P: AsRef<Path>,
	{
		Self { dir: ServeDir::new(root) }
	}
}

impl AssetStore for DirectoryAssets
{
	#[tracing::instrument(level = "trace", skip(self, request))]
	fn serve(&self, asset: AssetName, request: Request) -> BoxFuture<'static, Response>
	{
		self.dir
			.clone()
			.oneshot(request)
			.map(|result: Result<_, Infallible>| match result {
				Ok(response) => response.map(Body::new),
				Err(never) => match never {},
			})
			.boxed()
	}
}
