//! Maps asset file extensions to `Content-Type` header values.

use std::path::Path;

use axum::http::HeaderValue;

/// Returns the `Content-Type` for `file_name`, based on its extension.
///
/// Unknown extensions yield `None`, in which case whoever produces the body is free to set
/// its own header.
pub fn resolve(file_name: &str) -> Option<HeaderValue>
{
	let extension = Path::new(file_name).extension()?.to_str()?;
	let content_type = match extension {
		"html" => "text/html; charset=utf-8",
		"css" => "text/css; charset=utf-8",
		"js" => "application/javascript",
		"png" => "image/png",
		"json" => "application/json; charset=utf-8",
		_ => return None,
	};

	Some(HeaderValue::from_static(content_type))
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn known_extensions()
	{
		let cases = [
			("index.html", "text/html; charset=utf-8"),
			("swagger-ui.css", "text/css; charset=utf-8"),
			("swagger-ui-bundle.js", "application/javascript"),
			("favicon-32x32.png", "image/png"),
			("doc.json", "application/json; charset=utf-8"),
		];

		for (file_name, expected) in cases {
			assert_eq!(resolve(file_name), Some(HeaderValue::from_static(expected)), "{file_name}");
		}
	}

	#[test]
	fn unknown_extensions()
	{
		assert_eq!(resolve("swagger-ui.css.map"), None);
		assert_eq!(resolve("swagger-ui.js.map"), None);
		assert_eq!(resolve("LICENSE"), None);
	}
}
