//! The HTML shell that boots Swagger UI.

use std::collections::HashMap;

use serde::Serialize;
use tera::{Context, Tera, Value};

use super::config::{Config, DocExpansion};

/// Name the shell is registered under.
///
/// The `.html` suffix turns on autoescaping.
const TEMPLATE_NAME: &str = "swagger_index.html";

/// Source of the shell.
const TEMPLATE_SOURCE: &str = include_str!("templates/index.html");

/// JavaScript expression computing the OAuth2 redirect URL in the browser.
///
/// It takes the current page location and replaces its last path segment with
/// `oauth2-redirect.html`, so it follows the viewer wherever it is mounted.
const OAUTH2_REDIRECT_URL: &str = "`${window.location.protocol}//${window.location.host}\
	${window.location.pathname.split('/').slice(0, window.location.pathname.split('/').length - 1).join('/')}\
	/oauth2-redirect.html`";

/// The parsed HTML shell.
#[derive(Debug)]
pub(crate) struct IndexTemplate
{
	/// Template engine holding only the shell.
	tera: Tera,
}

/// Values substituted into the shell.
#[derive(Debug, Serialize)]
struct IndexContext<'a>
{
	title: &'a str,
	url: &'a str,
	deep_linking: bool,
	doc_expansion: DocExpansion,
	default_models_expand_depth: i32,
	oauth2_redirect_url: &'static str,
	persist_authorization: bool,
	oauth2_client_id: Option<&'a str>,
}

impl<'a> From<&'a Config> for IndexContext<'a>
{
	fn from(config: &'a Config) -> Self
	{
		Self {
			title: &config.title,
			url: &config.url,
			deep_linking: config.deep_linking,
			doc_expansion: config.doc_expansion,
			default_models_expand_depth: config.default_models_expand_depth,
			oauth2_redirect_url: OAUTH2_REDIRECT_URL,
			persist_authorization: config.persist_authorization,
			oauth2_client_id: config.oauth2_client_id.as_deref(),
		}
	}
}

impl IndexTemplate
{
	/// Parses the shell.
	pub(crate) fn new() -> tera::Result<Self>
	{
		let mut tera = Tera::default();

		tera.register_filter("script_json", script_json);
		tera.add_raw_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;

		Ok(Self { tera })
	}

	/// Renders the shell for `config`.
	pub(crate) fn render(&self, config: &Config) -> tera::Result<String>
	{
		let context = Context::from_serialize(IndexContext::from(config))?;

		self.tera.render(TEMPLATE_NAME, &context)
	}
}

/// Encodes a value as a JavaScript literal that is safe inside a `<script>` element.
///
/// `<`, `>`, and `&` are written as unicode escapes, so no encoded value can close the
/// element or start a comment.
fn script_json(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value>
{
	let json = serde_json::to_string(value)
		.map_err(|error| tera::Error::chain("failed to encode template value", error))?;

	let mut escaped = String::with_capacity(json.len());

	for c in json.chars() {
		match c {
			'<' => escaped.push_str("\\u003c"),
			'>' => escaped.push_str("\\u003e"),
			'&' => escaped.push_str("\\u0026"),
			c => escaped.push(c),
		}
	}

	Ok(Value::String(escaped))
}
