//! Stable top-down merge sort with a possibly-asynchronous comparator.
//!
//! The comparator is called once per merge step and its answer is awaited
//! before the next element is placed, so comparisons never overlap and the
//! outcome is deterministic. On a tie the element from the left half is
//! taken first, which keeps equal elements in input order.

use std::cmp::Ordering;
use std::fmt;

use futures::future::BoxFuture;

use crate::error::SeqError;
use crate::eventual::Eventual;

/// Compare two values by their `Display` form, in code point order.
pub fn default_compare<T: fmt::Display + ?Sized>(a: &T, b: &T) -> Ordering {
    a.to_string().cmp(&b.to_string())
}

/// Pin a closure to the comparator signature.
///
/// Closures stored in a variable before being handed to [`merge_sort`] do
/// not get their lifetimes inferred from its bound; passing them through
/// this function first does.
pub fn comparator<T, F>(f: F) -> F
where
    F: for<'c> FnMut(&'c T, &'c T) -> anyhow::Result<Eventual<'c, Ordering>>,
{
    f
}

/// Sort `items` with `cmp`.
///
/// Both halves are sorted by awaited recursive calls even when the
/// comparator answers synchronously. A comparator failure aborts the sort
/// and nothing is returned.
pub fn merge_sort<'f, T, F>(
    items: Vec<T>,
    cmp: &'f mut F,
) -> BoxFuture<'f, Result<Vec<T>, SeqError>>
where
    T: Send + Sync + 'f,
    F: for<'c> FnMut(&'c T, &'c T) -> anyhow::Result<Eventual<'c, Ordering>> + Send,
{
    Box::pin(async move {
        if items.len() <= 1 {
            return Ok(items);
        }
        let mut left = items;
        let right = left.split_off(left.len() / 2);

        let left = merge_sort(left, &mut *cmp).await?;
        let right = merge_sort(right, &mut *cmp).await?;
        merge(left, right, cmp).await
    })
}

async fn merge<T, F>(left: Vec<T>, right: Vec<T>, cmp: &mut F) -> Result<Vec<T>, SeqError>
where
    T: Send + Sync,
    F: for<'c> FnMut(&'c T, &'c T) -> anyhow::Result<Eventual<'c, Ordering>> + Send,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let order = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(l, r)
                .map_err(SeqError::Comparator)?
                .resolve()
                .await
                .map_err(SeqError::Comparator)?,
            _ => break,
        };
        let next = match order {
            Ordering::Greater => right.next(),
            Ordering::Less | Ordering::Equal => left.next(),
        };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}
