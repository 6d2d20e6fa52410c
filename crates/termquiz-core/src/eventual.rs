//! A value that is either available now or will be available later.
//!
//! [`Eventual`] is the tagged result used on both sides of the sequence API:
//! callbacks hand one back for every element, and each [`Sequence`]
//! operation hands one back to its caller. Whether an operation completes
//! synchronously is decided by looking at the tags of the per-element
//! results, never by inspecting values at runtime.
//!
//! [`Sequence`]: crate::seq::Sequence

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

/// A value that is ready now, or a future that resolves to it.
///
/// Callback results use the default `anyhow::Error`; sequence operations use
/// [`SeqError`](crate::error::SeqError).
pub enum Eventual<'a, T, E = anyhow::Error> {
    /// The value is available immediately.
    Ready(T),
    /// The value is produced by a future that may still fail.
    Deferred(BoxFuture<'a, Result<T, E>>),
}

impl<'a, T, E> Eventual<'a, T, E> {
    /// Wrap an immediately available value.
    pub fn ready(value: T) -> Self {
        Eventual::Ready(value)
    }

    /// Wrap a future. The result is always `Deferred`, even if the future
    /// would complete on its first poll.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
    {
        Eventual::Deferred(future.boxed())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Eventual::Ready(_))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Eventual::Deferred(_))
    }

    /// The value, if it was available immediately.
    pub fn into_ready(self) -> Option<T> {
        match self {
            Eventual::Ready(value) => Some(value),
            Eventual::Deferred(_) => None,
        }
    }

    /// Await the value regardless of which variant this is.
    pub async fn resolve(self) -> Result<T, E> {
        match self {
            Eventual::Ready(value) => Ok(value),
            Eventual::Deferred(future) => future.await,
        }
    }

    /// Transform the value once it is available, keeping the variant.
    pub fn map<U, F>(self, f: F) -> Eventual<'a, U, E>
    where
        F: FnOnce(T) -> U + Send + 'a,
        T: 'a,
        U: 'a,
        E: 'a,
    {
        match self {
            Eventual::Ready(value) => Eventual::Ready(f(value)),
            Eventual::Deferred(future) => Eventual::Deferred(future.map(|r| r.map(f)).boxed()),
        }
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Eventual<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eventual::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Eventual::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
