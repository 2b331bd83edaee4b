use crate::error::FetchError;
use crate::object::Object;

/// Fetches the document a [`Link`](crate::Link) points at.
///
/// The model never performs I/O itself; [`Link::resolve`](crate::Link::resolve)
/// calls through this trait and caches the result on the link. Errors are
/// passed back to the caller unchanged and are never retried.
///
/// Closures `Fn(&str) -> Result<Object, FetchError>` implement it directly.
pub trait ObjectFetcher: Send + Sync {
    /// Fetch and decode the object at `href`.
    fn fetch_object(&self, href: &str) -> Result<Object, FetchError>;
}

impl<F> ObjectFetcher for F
where
    F: Fn(&str) -> Result<Object, FetchError> + Send + Sync,
{
    fn fetch_object(&self, href: &str) -> Result<Object, FetchError> {
        self(href)
    }
}

/// A fetcher with no transport. Every call fails with
/// [`FetchError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NotImplementedFetcher;

impl ObjectFetcher for NotImplementedFetcher {
    fn fetch_object(&self, href: &str) -> Result<Object, FetchError> {
        Err(FetchError::NotImplemented {
            href: href.to_string(),
        })
    }
}
