use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use tower::ServiceExt;

use super::{body, get, CountingAssets, NOT_FOUND_BODY};
use crate::runtime::{Config, DocSource};
use crate::swagger::{AssetStore, DocExpansion};
use crate::BuildRouterError;

fn config(docs: Vec<DocSource>) -> Config
{
	Config {
		addr: ([127, 0, 0, 1], 0).into(),
		mount: String::from("/swagger/"),
		docs,
		disable_var: String::from("SWAGGER_EMBED_TEST_SERVER_NEVER_SET"),
		doc_expansion: DocExpansion::Full,
		title: Some(String::from("Inventory")),
		persist_authorization: false,
		oauth2_client_id: None,
		assets_dir: None,
		compress: false,
	}
}

fn doc(dir: &Path, name: Option<&str>, contents: &str) -> color_eyre::Result<DocSource>
{
	let path = dir.join(format!("{}.json", name.unwrap_or("openapi")));

	fs::write(&path, contents)?;

	Ok(DocSource { name: name.map(str::to_owned), path })
}

#[tokio::test]
async fn unnamed_document_is_served_at_the_mount() -> color_eyre::Result<()>
{
	let dir = tempfile::tempdir()?;
	let router = crate::router(&config(vec![doc(dir.path(), None, r#"{"openapi":"3.0.3"}"#)?]))?;

	let res = get(&router, "/swagger/doc.json").await?;

	assert_eq!(res.status(), StatusCode::OK);
	assert_eq!(body(res).await?, br#"{"openapi":"3.0.3"}"#);

	let index = String::from_utf8(body(get(&router, "/swagger/").await?).await?)?;

	assert!(index.contains("<title>Inventory</title>"));
	assert!(index.contains(r#"docExpansion: "full""#));

	let res = get(&router, "/swagger/swagger-ui.css").await?;

	assert_eq!(res.status(), StatusCode::OK, "embedded distribution is served");

	Ok(())
}

#[tokio::test]
async fn named_documents_get_their_own_path() -> color_eyre::Result<()>
{
	let dir = tempfile::tempdir()?;
	let router = crate::router(&config(vec![
		doc(dir.path(), Some("v1"), r#"{"v":1}"#)?,
		doc(dir.path(), Some("v2"), r#"{"v":2}"#)?,
	]))?;

	assert_eq!(body(get(&router, "/swagger/v1/doc.json").await?).await?, br#"{"v":1}"#);
	assert_eq!(body(get(&router, "/swagger/v2/doc.json").await?).await?, br#"{"v":2}"#);

	fs::write(dir.path().join("v2.json"), r#"{"v":3}"#)?;

	assert_eq!(
		body(get(&router, "/swagger/v2/doc.json").await?).await?,
		br#"{"v":3}"#,
		"edits are picked up without a restart",
	);

	let res = get(&router, "/swagger/v3/doc.json").await?;

	assert_eq!(res.status(), StatusCode::NOT_FOUND);

	Ok(())
}

#[test]
fn duplicate_documents_are_rejected() -> color_eyre::Result<()>
{
	let dir = tempfile::tempdir()?;
	let v1 = doc(dir.path(), Some("v1"), "{}")?;

	let error = crate::router(&config(vec![v1.clone(), v1])).expect_err("duplicate name");

	assert!(matches!(error, BuildRouterError::DuplicateDocument { name } if name == "v1"));

	Ok(())
}

#[tokio::test]
async fn missing_file_is_a_server_error() -> color_eyre::Result<()>
{
	let dir = tempfile::tempdir()?;
	let source = DocSource { name: None, path: dir.path().join("missing.json") };
	let router = crate::router(&config(vec![source]))?;

	let res = get(&router, "/swagger/doc.json").await?;

	assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

	Ok(())
}

#[tokio::test]
async fn disable_variable_turns_everything_off() -> color_eyre::Result<()>
{
	const VAR: &str = "SWAGGER_EMBED_TEST_SERVER_DISABLED";

	let dir = tempfile::tempdir()?;
	let mut config = config(vec![doc(dir.path(), None, "{}")?]);

	config.disable_var = String::from(VAR);

	std::env::set_var(VAR, "yes");

	let router = crate::router(&config);

	std::env::remove_var(VAR);

	let router = router?;

	for uri in ["/swagger/", "/swagger/doc.json", "/swagger/swagger-ui.css"] {
		let res = get(&router, uri).await?;

		assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
		assert_eq!(body(res).await?, NOT_FOUND_BODY.as_bytes(), "{uri}");
	}

	Ok(())
}

#[tokio::test]
async fn compression_keeps_content_type() -> color_eyre::Result<()>
{
	let dir = tempfile::tempdir()?;
	let mut config = config(vec![doc(dir.path(), None, "{}")?]);

	config.compress = true;

	let router = crate::router(&config)?;
	let request = Request::builder()
		.uri("/swagger/swagger-ui-bundle.js")
		.header(ACCEPT_ENCODING, "gzip")
		.body(Body::empty())?;

	let res = router.oneshot(request).await?;

	assert_eq!(res.status(), StatusCode::OK);
	assert_eq!(res.headers().get(CONTENT_ENCODING), Some(&HeaderValue::from_static("gzip")));
	assert_eq!(res.headers().get(CONTENT_TYPE), Some(&HeaderValue::from_static("application/javascript")));

	Ok(())
}

#[test]
fn asset_store_is_built_once_and_only_when_needed() -> color_eyre::Result<()>
{
	const VAR: &str = "SWAGGER_EMBED_TEST_SERVER_LAZY_ASSETS";

	let dir = tempfile::tempdir()?;
	let mut config = config(vec![
		doc(dir.path(), Some("v1"), "{}")?,
		doc(dir.path(), Some("v2"), "{}")?,
	]);

	config.disable_var = String::from(VAR);

	let built = AtomicUsize::new(0);
	let make_assets = || -> Arc<dyn AssetStore> {
		built.fetch_add(1, Ordering::SeqCst);
		Arc::new(CountingAssets::default())
	};

	crate::router_with_assets(&config, make_assets)?;

	assert_eq!(built.load(Ordering::SeqCst), 1, "viewers share one store");

	std::env::set_var(VAR, "1");

	let disabled = crate::router_with_assets(&config, make_assets);

	std::env::remove_var(VAR);

	disabled?;

	assert_eq!(built.load(Ordering::SeqCst), 1, "disabled viewers never build a store");

	Ok(())
}

#[tokio::test]
async fn run_until_stops_when_asked() -> color_eyre::Result<()>
{
	let dir = tempfile::tempdir()?;
	let config = config(vec![doc(dir.path(), None, "{}")?]);

	let result = crate::run_until(config, async {}).await;

	assert!(result.is_ok(), "{result:?}");

	Ok(())
}
