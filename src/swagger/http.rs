//! Integration with [`axum`] and [`tower`].

use std::convert::Infallible;
use std::task::{self, Poll};

use axum::extract::Request;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing, Router};
use futures::future::{self, BoxFuture, FutureExt};
use tower::Service;

use super::{Error, Gated, SwaggerUi};

impl Service<Request> for SwaggerUi
{
	type Response = Response;
	type Error = Infallible;
	type Future = BoxFuture<'static, Result<Response, Infallible>>;

	fn poll_ready(&mut self, _cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>>
	{
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, request: Request) -> Self::Future
	{
		let ui = self.clone();

		async move { Ok::<_, Infallible>(ui.dispatch(request).await.into_response()) }.boxed()
	}
}

impl Service<Request> for Gated
{
	type Response = Response;
	type Error = Infallible;
	type Future = BoxFuture<'static, Result<Response, Infallible>>;

	fn poll_ready(&mut self, _cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>>
	{
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, request: Request) -> Self::Future
	{
		match self {
			Self::Enabled(ui) => ui.call(request),
			Self::Disabled => future::ready(Ok::<_, Infallible>(Error::Disabled.into_response())).boxed(),
		}
	}
}

/// Registers `viewer` on `router` below `path`.
///
/// This adds three routes:
///
/// - `{path}` permanently redirects to `{path}/`, because the HTML shell links its assets
///   with relative URLs
/// - `{path}/` serves the HTML shell
/// - `{path}/{*rest}` serves everything else
///
/// Only `GET` (and `HEAD`) requests are routed to the viewer; other methods get
/// `405 Method Not Allowed` from the router.
pub fn mount<S, V>(router: Router<S>, path: &str, viewer: V) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	V: Service<Request, Response = Response, Error = Infallible> + Clone + Send + Sync + 'static,
	V::Future: Send + 'static,
{
	let base = path.trim_end_matches('/');
	let root = format!("{base}/");
	let router = if base.is_empty() {
		router
	} else {
		let target = root.clone();

		router.route(
			base,
			routing::get(move || {
				let target = target.clone();
				async move { Redirect::permanent(&target) }
			}),
		)
	};

	tracing::debug!(path = %root, "mounting swagger ui");

	router
		.route(&root, routing::get_service(viewer.clone()))
		.route(&format!("{base}/{{*rest}}"), routing::get_service(viewer))
}
