//! A keyed store of specification documents.
//!
//! Every mounted viewer looks up its document by [instance name] when `doc.json` is
//! requested. Documents are produced on demand by a [`DocProvider`], so a provider can
//! return a different document every time it is asked.
//!
//! The registry is a cheaply cloneable handle; clones share the same underlying map.
//!
//! [instance name]: super::Config::instance_name

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use std::{fmt, io};

use futures::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

/// The instance name used when none is configured.
pub const DEFAULT_INSTANCE_NAME: &str = "swagger";

#[allow(clippy::missing_docs_in_private_items)]
type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Something that can produce the current specification document.
pub trait DocProvider: Send + Sync + 'static
{
	/// Returns the document text.
	///
	/// The text is served as-is. The future runs on the request's task, so providers that
	/// touch the disk or the network must do so asynchronously.
	fn read_doc(&self) -> BoxFuture<'_, Result<String, ReadDocError>>;
}

/// A [`DocProvider`] failed to produce its document.
#[derive(Debug, Error)]
pub enum ReadDocError
{
	/// The document could not be serialized.
	#[error("failed to serialize specification document")]
	Serialize(#[from] serde_json::Error),

	/// The document could not be read from disk.
	#[error("failed to read specification document")]
	Io(#[from] io::Error),

	/// Any other provider-specific failure.
	#[error(transparent)]
	Other(BoxedError),
}

impl ReadDocError
{
	/// Wraps an arbitrary error.
	pub fn other<E>(error: E) -> Self
	where
		E: Into<BoxedError>,
	{
		Self::Other(error.into())
	}
}

/// A document that never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDoc(pub String);

impl DocProvider for StaticDoc
{
	fn read_doc(&self) -> BoxFuture<'_, Result<String, ReadDocError>>
	{
		future::ready(Ok(self.0.clone())).boxed()
	}
}

impl DocProvider for utoipa::openapi::OpenApi
{
	fn read_doc(&self) -> BoxFuture<'_, Result<String, ReadDocError>>
	{
		future::ready(self.to_json().map_err(ReadDocError::from)).boxed()
	}
}

/// A document read from disk on every request.
///
/// Edits to the file show up on the next `doc.json` request without a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDoc(pub PathBuf);

impl DocProvider for FileDoc
{
	fn read_doc(&self) -> BoxFuture<'_, Result<String, ReadDocError>>
	{
		async move { Ok(tokio::fs::read_to_string(&self.0).await?) }.boxed()
	}
}

/// A [`DocProvider`] backed by a closure.
///
/// See [`from_fn()`].
#[derive(Clone)]
pub struct FnDoc<F>(F);

impl<F> fmt::Debug for FnDoc<F>
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str("FnDoc(..)")
	}
}

impl<F> DocProvider for FnDoc<F>
where
	F: Fn() -> Result<String, ReadDocError> + Send + Sync + 'static,
{
	fn read_doc(&self) -> BoxFuture<'_, Result<String, ReadDocError>>
	{
		future::ready((self.0)()).boxed()
	}
}

/// Creates a [`DocProvider`] that calls `f` every time the document is requested.
pub fn from_fn<F>(f: F) -> FnDoc<F>
where
	F: Fn() -> Result<String, ReadDocError> + Send + Sync + 'static,
{
	FnDoc(f)
}

/// Instance name → document provider.
#[derive(Clone, Default)]
pub struct Registry
{
	/// The registered providers.
	providers: Arc<RwLock<HashMap<String, Arc<dyn DocProvider>>>>,
}

impl fmt::Debug for Registry
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);

		f.debug_struct("Registry")
			.field("instances", &providers.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl Registry
{
	/// Creates an empty registry.
	pub fn new() -> Self
	{
		Self::default()
	}

	/// Registers `provider` under `name`, replacing any provider registered before.
	#[tracing::instrument(skip_all, fields(name = %name.as_ref()))]
	pub fn register<N, P>(&self, name: N, provider: P)
	where
		N: AsRef<str> + Into<String>,
		P: DocProvider,
	{
		let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);

		if providers.insert(name.into(), Arc::new(provider)).is_some() {
			tracing::warn!("replaced previously registered specification document");
		} else {
			tracing::debug!("registered specification document");
		}
	}

	/// Returns the provider registered under `name`.
	pub fn lookup(&self, name: &str) -> Option<Arc<dyn DocProvider>>
	{
		self.providers
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(name)
			.map(Arc::clone)
	}
}

#[cfg(test)]
mod tests
{
	use std::fs;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use utoipa::OpenApi;

	use super::*;

	#[tokio::test]
	async fn lookup_before_and_after_register()
	{
		let registry = Registry::new();

		assert!(registry.lookup("v1").is_none());

		registry.register("v1", StaticDoc(String::from(r#"{"openapi":"3.1.0"}"#)));

		let doc = registry.lookup("v1").expect("registered").read_doc().await.expect("static doc");

		assert_eq!(doc, r#"{"openapi":"3.1.0"}"#);
		assert!(registry.lookup("v2").is_none(), "other names stay unregistered");
	}

	#[test]
	fn clones_share_providers()
	{
		let registry = Registry::new();
		let clone = registry.clone();

		clone.register(DEFAULT_INSTANCE_NAME, StaticDoc(String::from("{}")));

		assert!(registry.lookup(DEFAULT_INSTANCE_NAME).is_some());
	}

	#[tokio::test]
	async fn closures_are_called_per_read()
	{
		let calls = Arc::new(AtomicUsize::new(0));
		let registry = Registry::new();

		registry.register("counter", from_fn({
			let calls = Arc::clone(&calls);
			move || Ok(calls.fetch_add(1, Ordering::SeqCst).to_string())
		}));

		let provider = registry.lookup("counter").expect("registered");

		assert_eq!(provider.read_doc().await.expect("read"), "0");
		assert_eq!(provider.read_doc().await.expect("read"), "1");
	}

	#[tokio::test]
	async fn provider_failures_surface()
	{
		let registry = Registry::new();

		registry.register("broken", from_fn(|| Err(ReadDocError::other("disk on fire"))));

		let error = registry
			.lookup("broken")
			.expect("registered")
			.read_doc()
			.await
			.expect_err("provider fails");

		assert_eq!(error.to_string(), "disk on fire");
	}

	#[tokio::test]
	async fn file_documents_are_reread() -> color_eyre::Result<()>
	{
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("openapi.json");

		fs::write(&path, "{}")?;

		let provider = FileDoc(path.clone());

		assert_eq!(provider.read_doc().await?, "{}");

		fs::write(&path, r#"{"openapi":"3.1.0"}"#)?;

		assert_eq!(provider.read_doc().await?, r#"{"openapi":"3.1.0"}"#);

		fs::remove_file(&path)?;

		assert!(matches!(provider.read_doc().await, Err(ReadDocError::Io(_))));

		Ok(())
	}

	#[tokio::test]
	async fn openapi_documents()
	{
		#[derive(OpenApi)]
		#[openapi(info(title = "Test API", version = "1.0.0"))]
		struct ApiDoc;

		let registry = Registry::new();

		registry.register("api", ApiDoc::openapi());

		let doc = registry.lookup("api").expect("registered").read_doc().await.expect("serialize");
		let json = serde_json::from_str::<serde_json::Value>(&doc).expect("valid json");

		assert_eq!(json["info"]["title"], "Test API");
	}
}
