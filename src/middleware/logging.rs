//! Request logging.
//!
//! Every request gets a span carrying a fresh UUIDv7, the client address, and the viewer
//! asset the path resolves to. Status, latency and cache revalidations are recorded on the
//! span once the response is ready.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ConnectInfo;
use axum::http::{Request, Response, StatusCode};
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{
	DefaultOnBodyChunk,
	DefaultOnEos,
	DefaultOnRequest,
	MakeSpan,
	OnFailure,
	OnResponse,
	TraceLayer,
};
use uuid::Uuid;

use crate::swagger::classify;

/// Tracing target for everything logged by this module.
const TARGET: &str = "swagger_embed::http";

/// The layer returned by [`layer()`].
pub(crate) type LoggingLayer = TraceLayer<
	SharedClassifier<ServerErrorsAsFailures>,
	RequestSpan,
	DefaultOnRequest,
	RecordResponse,
	DefaultOnBodyChunk,
	DefaultOnEos,
	LogFailure,
>;

/// Creates a middleware that logs incoming HTTP requests.
pub(crate) fn layer() -> LoggingLayer
{
	TraceLayer::new_for_http()
		.make_span_with(RequestSpan)
		.on_response(RecordResponse)
		.on_failure(LogFailure)
}

/// Opens the per-request span.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan
{
	fn make_span(&mut self, request: &Request<B>) -> tracing::Span
	{
		let client = request
			.extensions()
			.get::<ConnectInfo<SocketAddr>>()
			.map(|ConnectInfo(addr)| addr.ip());

		let span = tracing::info_span! {
			target: TARGET,
			"request",
			request.id = %Uuid::now_v7(),
			request.client = tracing::field::Empty,
			request.method = %request.method(),
			request.path = request.uri().path(),
			request.asset = tracing::field::Empty,
			response.status = tracing::field::Empty,
			response.revalidated = tracing::field::Empty,
			latency = tracing::field::Empty,
		};

		if let Some(client) = client {
			span.record("request.client", tracing::field::display(client));
		}

		if let Some(asset) = requested_asset(request.uri().path()) {
			span.record("request.asset", asset);
		}

		span
	}
}

/// The viewer file `path` resolves to, if any.
fn requested_asset(path: &str) -> Option<&'static str>
{
	classify(path).ok().map(|classified| classified.asset.as_str())
}

/// Records the outcome of a request on its span.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordResponse;

impl<B> OnResponse<B> for RecordResponse
{
	fn on_response(self, response: &Response<B>, latency: Duration, span: &tracing::Span)
	{
		span.record("response.status", response.status().as_u16())
			.record("response.revalidated", response.status() == StatusCode::NOT_MODIFIED)
			.record("latency", tracing::field::debug(latency));
	}
}

/// Logs requests that failed on the server's side.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LogFailure;

impl OnFailure<ServerErrorsFailureClass> for LogFailure
{
	fn on_failure(&mut self, failure: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span)
	{
		match failure {
			ServerErrorsFailureClass::StatusCode(status) => {
				tracing::error!(target: TARGET, %status, ?latency, "request failed");
			}
			ServerErrorsFailureClass::Error(error) => {
				tracing::error!(target: TARGET, %error, ?latency, "request errored");
			}
		}
	}
}
