//! Outcome of a cached read.

use crate::errors::{Error, Result};

/// Data/error pair handed back by [`super::QueryClient::fetch_query`].
///
/// `error` is set when the last fetch failed. `data` then holds the previous
/// successful value if one was cached, and `None` otherwise.
#[derive(Debug)]
pub struct QueryState<T> {
    /// Latest successful value
    pub data: Option<T>,
    /// Error from the last fetch, if it failed
    pub error: Option<Error>,
}

impl<T> QueryState<T> {
    /// A successful read.
    pub const fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// A failed read, optionally keeping the last good value.
    pub const fn failure(error: Error, previous: Option<T>) -> Self {
        Self {
            data: previous,
            error: Some(error),
        }
    }

    /// True when the read succeeded.
    pub const fn is_success(&self) -> bool {
        self.error.is_none() && self.data.is_some()
    }

    /// True when the read failed.
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Collapses the pair into a `Result`, preferring the error.
    pub fn into_result(self) -> Result<T> {
        match self.error {
            Some(error) => Err(error),
            None => self.data.ok_or(Error::EmptyQuery),
        }
    }
}
