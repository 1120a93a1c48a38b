//! Router-level tests.
//!
//! These drive complete [`axum::Router`]s with [`tower::ServiceExt::oneshot()`], so no
//! sockets are involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::body::Body;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use futures::future::{self, BoxFuture, FutureExt};
use tower::ServiceExt;

use crate::swagger::{AssetName, AssetStore};

mod server;

/// Body of every `404` the viewer produces.
const NOT_FOUND_BODY: &str = "404 page not found";

/// An [`AssetStore`] that answers with the asset's name and remembers what it was asked for.
///
/// Responses carry no `Content-Type`, so any header seen by a test was set by the viewer.
#[derive(Debug, Default, Clone)]
struct CountingAssets
{
	hits: Arc<AtomicUsize>,
	uris: Arc<Mutex<Vec<String>>>,
}

impl CountingAssets
{
	fn hits(&self) -> usize
	{
		self.hits.load(Ordering::SeqCst)
	}

	fn uris(&self) -> Vec<String>
	{
		self.uris.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}
}

impl AssetStore for CountingAssets
{
	fn serve(&self, asset: AssetName, request: Request) -> BoxFuture<'static, Response>
	{
		self.hits.fetch_add(1, Ordering::SeqCst);
		self.uris
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(request.uri().to_string());

		future::ready((StatusCode::OK, asset.as_str()).into_response())
			.map(|mut response| {
				response.headers_mut().clear();
				response
			})
			.boxed()
	}
}

/// Sends a single request through `router`.
async fn send(router: &Router, method: Method, uri: &str) -> color_eyre::Result<Response>
{
	let request = Request::builder().method(method).uri(uri).body(Body::empty())?;

	Ok(router.clone().oneshot(request).await?)
}

/// Sends a `GET` request through `router`.
async fn get(router: &Router, uri: &str) -> color_eyre::Result<Response>
{
	send(router, Method::GET, uri).await
}

/// Collects a response body.
async fn body(response: Response) -> color_eyre::Result<Vec<u8>>
{
	Ok(axum::body::to_bytes(response.into_body(), usize::MAX).await?.to_vec())
}
