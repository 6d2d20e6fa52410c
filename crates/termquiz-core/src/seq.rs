//! Promise-transparent sequences.
//!
//! [`Sequence`] wraps a `Vec` and adds transformations whose callbacks may
//! answer either immediately or with a future. Each operation looks at the
//! per-element [`Eventual`] tags produced during that call: if every one is
//! `Ready` the operation finishes synchronously and returns
//! `Eventual::Ready`; if any is `Deferred` it returns a single
//! `Eventual::Deferred` that settles once all of them have.
//!
//! `map` and the operations built on it (`filter`, `some`, `every`, `find`,
//! `flat_map`, `for_each`) invoke every callback eagerly and then await the
//! deferred results together. `reduce` is different: each step waits for the
//! previous accumulator before the next callback runs. Sorting is always
//! deferred.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use futures::future::{try_join_all, BoxFuture};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SeqError;
use crate::eventual::Eventual;
use crate::sort::{default_compare, merge_sort};

/// Result of a sequence operation: a synchronous failure, or a value that is
/// ready now or later.
pub type SeqResult<'a, T> = Result<Eventual<'a, T, SeqError>, SeqError>;

/// Build a [`Sequence`] from a list of elements, like `vec!`.
#[macro_export]
macro_rules! seq {
    () => {
        $crate::seq::Sequence::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::seq::Sequence::from(vec![$($item),+])
    };
}

/// An ordered, densely indexed, growable sequence.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence<T> {
    items: Vec<T>,
}

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an element at index `len()`.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, SeqError> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, item)),
            None => Err(SeqError::OutOfBounds { index, len }),
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Shuffle in place with the thread-local RNG. Returns `self` for chaining.
    pub fn shuffle(&mut self) -> &mut Self {
        crate::util::shuffle(self)
    }

    /// Shuffle in place with the given RNG. Returns `self` for chaining.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        crate::util::shuffle_with(self, rng)
    }
}

impl<T> Sequence<Sequence<T>> {
    /// Remove one level of nesting.
    pub fn flatten(self) -> Sequence<T> {
        self.items.into_iter().flatten().collect()
    }
}

// ---------------------------------------------------------------------------
// Transformations
// ---------------------------------------------------------------------------

impl<T: Sync> Sequence<T> {
    /// Apply `f` to every element in index order.
    ///
    /// All callbacks run before this returns. If none of them deferred, the
    /// result is `Ready`; otherwise the deferred results are awaited
    /// concurrently and the returned future resolves to the values in
    /// index order. The first failure fails the whole call and no partial
    /// sequence is produced.
    pub fn map<'a, U, F>(&'a self, mut f: F) -> SeqResult<'a, Sequence<U>>
    where
        F: FnMut(&'a T, usize) -> anyhow::Result<Eventual<'a, U>>,
        U: Send + 'a,
    {
        let mut steps = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            let step = f(item, index).map_err(|source| SeqError::Callback { index, source })?;
            steps.push(step);
        }
        Ok(settle(steps))
    }

    /// Same as [`map`](Self::map); the mapped sequence is returned so callers
    /// can await callbacks that finish later.
    pub fn for_each<'a, U, F>(&'a self, f: F) -> SeqResult<'a, Sequence<U>>
    where
        F: FnMut(&'a T, usize) -> anyhow::Result<Eventual<'a, U>>,
        U: Send + 'a,
    {
        self.map(f)
    }

    /// Keep the elements whose predicate is `true`, in their original order.
    pub fn filter<'a, F>(&'a self, f: F) -> SeqResult<'a, Sequence<T>>
    where
        F: FnMut(&'a T, usize) -> anyhow::Result<Eventual<'a, bool>>,
        T: Clone + Send,
    {
        self.map_with(f, move |flags| {
            self.items
                .iter()
                .zip(flags.iter())
                .filter(|(_, keep)| **keep)
                .map(|(item, _)| item.clone())
                .collect()
        })
    }

    /// `true` if the predicate holds for at least one element.
    pub fn some<'a, F>(&'a self, f: F) -> SeqResult<'a, bool>
    where
        F: FnMut(&'a T, usize) -> anyhow::Result<Eventual<'a, bool>>,
    {
        self.map_with(f, |flags| flags.iter().any(|hit| *hit))
    }

    /// `true` if the predicate holds for every element.
    pub fn every<'a, F>(&'a self, f: F) -> SeqResult<'a, bool>
    where
        F: FnMut(&'a T, usize) -> anyhow::Result<Eventual<'a, bool>>,
    {
        self.map_with(f, |flags| flags.iter().all(|hit| *hit))
    }

    /// The lowest-index element whose predicate is `true`.
    ///
    /// The index decides which element wins, not the order in which deferred
    /// predicates happen to settle.
    pub fn find<'a, F>(&'a self, f: F) -> SeqResult<'a, Option<&'a T>>
    where
        F: FnMut(&'a T, usize) -> anyhow::Result<Eventual<'a, bool>>,
    {
        self.map_with(f, move |flags| {
            flags
                .iter()
                .position(|hit| *hit)
                .and_then(|index| self.items.get(index))
        })
    }

    /// Map every element to a collection and flatten the results one level.
    pub fn flat_map<'a, U, I, F>(&'a self, f: F) -> SeqResult<'a, Sequence<U>>
    where
        F: FnMut(&'a T, usize) -> anyhow::Result<Eventual<'a, I>>,
        I: IntoIterator<Item = U> + Send + 'a,
        U: 'a,
    {
        self.map_with(f, |nested| nested.into_iter().flatten().collect())
    }

    /// Fold left to right, starting from `initial`.
    ///
    /// Steps run synchronously while the callback keeps answering `Ready`.
    /// Once a step defers, the rest of the fold moves into the returned
    /// future, where every callback waits for the previous accumulator
    /// first. Steps never overlap. The final accumulator is returned as a
    /// one-element sequence.
    pub fn reduce<'a, R, F>(&'a self, mut f: F, initial: R) -> SeqResult<'a, Sequence<R>>
    where
        F: FnMut(R, &'a T, usize) -> anyhow::Result<Eventual<'a, R>> + Send + 'a,
        R: Send + 'a,
    {
        let mut acc = initial;
        for (index, item) in self.items.iter().enumerate() {
            match f(acc, item, index).map_err(|source| SeqError::Callback { index, source })? {
                Eventual::Ready(next) => acc = next,
                Eventual::Deferred(pending) => {
                    let rest = &self.items[index + 1..];
                    return Ok(Eventual::deferred(async move {
                        let mut acc = pending
                            .await
                            .map_err(|source| SeqError::Callback { index, source })?;
                        for (offset, item) in rest.iter().enumerate() {
                            let index = index + 1 + offset;
                            let step = f(acc, item, index)
                                .map_err(|source| SeqError::Callback { index, source })?;
                            acc = step
                                .resolve()
                                .await
                                .map_err(|source| SeqError::Callback { index, source })?;
                        }
                        Ok(Sequence::from(vec![acc]))
                    }));
                }
            }
        }
        Ok(Eventual::Ready(Sequence::from(vec![acc])))
    }

    fn map_with<'a, U, R, F, C>(&'a self, f: F, finish: C) -> SeqResult<'a, R>
    where
        F: FnMut(&'a T, usize) -> anyhow::Result<Eventual<'a, U>>,
        U: Send + 'a,
        R: 'a,
        C: FnOnce(Sequence<U>) -> R + Send + 'a,
    {
        Ok(self.map(f)?.map(finish))
    }
}

impl<T: Send + Sync> Sequence<T> {
    /// Sort by the string form of each element (code point order).
    ///
    /// Always deferred, like [`sort_by`](Self::sort_by).
    pub fn sort<'a>(self) -> BoxFuture<'a, Result<Sequence<T>, SeqError>>
    where
        T: fmt::Display + 'a,
    {
        self.sort_by(|a, b| Ok(Eventual::ready(default_compare(a, b))))
    }

    /// Stable merge sort with a comparator that may answer later.
    ///
    /// The result is always a future, whatever the comparator does.
    pub fn sort_by<'a, F>(self, mut cmp: F) -> BoxFuture<'a, Result<Sequence<T>, SeqError>>
    where
        F: for<'c> FnMut(&'c T, &'c T) -> anyhow::Result<Eventual<'c, Ordering>> + Send + 'a,
        T: 'a,
    {
        Box::pin(async move {
            let sorted = merge_sort(self.items, &mut cmp).await?;
            Ok(Sequence::from(sorted))
        })
    }
}

/// Collapse per-element results into one: `Ready` if every step was ready,
/// otherwise a future that awaits all of them.
fn settle<'a, U>(steps: Vec<Eventual<'a, U>>) -> Eventual<'a, Sequence<U>, SeqError>
where
    U: Send + 'a,
{
    if steps.iter().all(Eventual::is_ready) {
        return Eventual::Ready(steps.into_iter().filter_map(Eventual::into_ready).collect());
    }

    tracing::trace!(
        pending = steps.iter().filter(|s| s.is_deferred()).count(),
        total = steps.len(),
        "sequence callbacks deferred"
    );

    Eventual::deferred(async move {
        let values = try_join_all(steps.into_iter().enumerate().map(|(index, step)| async move {
            step.resolve()
                .await
                .map_err(|source| SeqError::Callback { index, source })
        }))
        .await?;
        Ok(Sequence::from(values))
    })
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> From<Sequence<T>> for Vec<T> {
    fn from(seq: Sequence<T>) -> Self {
        seq.items
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'s, T> IntoIterator for &'s Sequence<T> {
    type Item = &'s T;
    type IntoIter = std::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}
