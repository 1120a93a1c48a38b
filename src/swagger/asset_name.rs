//! The closed set of names a viewer instance answers for, and the classifier that maps a raw
//! request path onto them.

use std::fmt;

use thiserror::Error;

/// A file the viewer knows how to serve.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetName
{
	Index,
	Doc,
	Favicon16,
	Favicon32,
	OAuth2Redirect,
	Css,
	CssMap,
	Js,
	JsMap,
	Bundle,
	BundleMap,
	StandalonePreset,
	StandalonePresetMap,
}

impl AssetName
{
	/// Every recognized asset.
	pub const ALL: [Self; 13] = [
		Self::Index,
		Self::Doc,
		Self::Favicon16,
		Self::Favicon32,
		Self::OAuth2Redirect,
		Self::Css,
		Self::CssMap,
		Self::Js,
		Self::JsMap,
		Self::Bundle,
		Self::BundleMap,
		Self::StandalonePreset,
		Self::StandalonePresetMap,
	];

	/// The file name as it appears in request paths.
	pub const fn as_str(&self) -> &'static str
	{
		match self {
			Self::Index => "index.html",
			Self::Doc => "doc.json",
			Self::Favicon16 => "favicon-16x16.png",
			Self::Favicon32 => "favicon-32x32.png",
			Self::OAuth2Redirect => "oauth2-redirect.html",
			Self::Css => "swagger-ui.css",
			Self::CssMap => "swagger-ui.css.map",
			Self::Js => "swagger-ui.js",
			Self::JsMap => "swagger-ui.js.map",
			Self::Bundle => "swagger-ui-bundle.js",
			Self::BundleMap => "swagger-ui-bundle.js.map",
			Self::StandalonePreset => "swagger-ui-standalone-preset.js",
			Self::StandalonePresetMap => "swagger-ui-standalone-preset.js.map",
		}
	}

	/// Looks up a file name. Matching is case-sensitive.
	pub fn from_file_name(name: &str) -> Option<Self>
	{
		Self::ALL.into_iter().find(|asset| asset.as_str() == name)
	}

	/// Whether this asset is produced by the dispatcher itself rather than the asset store.
	pub const fn is_generated(&self) -> bool
	{
		matches!(self, Self::Index | Self::Doc)
	}
}

impl fmt::Display for AssetName
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.as_str())
	}
}

/// A request path split into mount prefix and asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a>
{
	/// Everything in front of the asset name, including the trailing `/`.
	pub prefix: &'a str,

	/// The requested asset.
	pub asset: AssetName,
}

/// The request path does not name a recognized asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{path}` is not a viewer asset")]
pub struct ClassificationMiss
{
	/// The path that failed to classify.
	pub path: String,
}

/// Characters that may trail an asset name without changing what is requested.
const TRAILING_PUNCTUATION: &[char] = &['?', '|', '.'];

/// Splits a raw request path (optionally including a query string) into mount prefix and
/// asset name.
///
/// The asset name must make up the entire last path segment. An empty last segment means
/// the mount root, which is served as [`AssetName::Index`].
///
/// ```
/// use swagger_embed::swagger::{classify, AssetName};
///
/// let classified = classify("/swagger/v1/swagger-ui.css?v=3").unwrap();
///
/// assert_eq!(classified.prefix, "/swagger/v1/");
/// assert_eq!(classified.asset, AssetName::Css);
///
/// assert_eq!(classify("/swagger/").unwrap().asset, AssetName::Index);
/// assert!(classify("/swagger/notfound").is_err());
/// ```
pub fn classify(path: &str) -> Result<Classified<'_>, ClassificationMiss>
{
	let path_only = path.split_once('?').map_or(path, |(path, _query)| path);
	let miss = || ClassificationMiss { path: path.to_owned() };

	let (prefix, segment) = match path_only.rsplit_once('/') {
		Some((head, _)) => path_only.split_at(head.len() + 1),
		None => ("", path_only),
	};

	if segment.is_empty() {
		return Ok(Classified { prefix, asset: AssetName::Index });
	}

	let asset = AssetName::from_file_name(segment.trim_end_matches(TRAILING_PUNCTUATION))
		.ok_or_else(miss)?;

	Ok(Classified { prefix, asset })
}
