//! The write-once mount prefix of a viewer instance.

use std::sync::OnceLock;

/// The URL path segment a viewer instance is reachable under.
///
/// The prefix is either fixed up front or captured from the first classified request. Once
/// set it never changes, no matter what later requests look like.
#[derive(Debug, Default)]
pub struct MountPrefix
{
	/// The captured value.
	cell: OnceLock<String>,
}

impl MountPrefix
{
	/// A prefix that will be inferred from the first request.
	pub fn inferred() -> Self
	{
		Self::default()
	}

	/// A prefix that is already known.
	pub fn fixed<S>(prefix: S) -> Self
	where
		S: Into<String>,
	{
		Self { cell: OnceLock::from(prefix.into()) }
	}

	/// Creates a prefix from an optional override.
	pub fn new(fixed: Option<&str>) -> Self
	{
		fixed.map_or_else(Self::inferred, Self::fixed)
	}

	/// Returns the prefix, storing `candidate` if no prefix has been set yet.
	///
	/// Concurrent callers racing on an unset prefix all observe the same stored value.
	pub fn get_or_init(&self, candidate: &str) -> &str
	{
		self.cell.get_or_init(|| {
			tracing::debug!(prefix = candidate, "captured mount prefix");
			candidate.to_owned()
		})
	}

	/// Returns the prefix if it has been set.
	pub fn get(&self) -> Option<&str>
	{
		self.cell.get().map(String::as_str)
	}
}
