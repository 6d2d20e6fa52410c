//! Numeric range and shuffle helpers built on [`Sequence`].

use rand::Rng;

use crate::error::SeqError;
use crate::seq::Sequence;

/// `0, 1, ..., stop - 1`. Empty when `stop <= 0`.
pub fn range(stop: i64) -> Sequence<i64> {
    range_step(0, stop, Some(1))
}

/// Arithmetic progression from `start` up to, but excluding, `stop`.
///
/// A missing or zero `step` counts up when `start < stop` and down when
/// `start > stop`. A step pointing away from `stop` yields an empty
/// sequence instead of running forever, and the progression stops before
/// stepping past `i64::MIN` or `i64::MAX`.
pub fn range_step(start: i64, stop: i64, step: Option<i64>) -> Sequence<i64> {
    let step = match step {
        Some(step) if step != 0 => step,
        _ if start > stop => -1,
        _ => 1,
    };

    let mut result = Sequence::new();
    if (start > stop && step > 0) || (start < stop && step < 0) {
        return result;
    }

    let descending = start > stop;
    let mut current = Some(start);
    while let Some(value) = current {
        if (descending && value <= stop) || (!descending && value >= stop) {
            break;
        }
        result.push(value);
        current = value.checked_add(step);
    }
    result
}

/// Variadic form: `[stop]`, `[start, stop]`, or `[start, stop, step]`.
pub fn range_args(args: &[i64]) -> Result<Sequence<i64>, SeqError> {
    match *args {
        [stop] => Ok(range(stop)),
        [start, stop] => Ok(range_step(start, stop, None)),
        [start, stop, step] => Ok(range_step(start, stop, Some(step))),
        _ => Err(SeqError::argument(
            "range",
            format!("expected 1 to 3 arguments, got {}", args.len()),
        )),
    }
}

/// Fisher–Yates shuffle in place using the thread-local RNG.
pub fn shuffle<T>(seq: &mut Sequence<T>) -> &mut Sequence<T> {
    shuffle_with(seq, &mut rand::rng())
}

/// Fisher–Yates shuffle in place: walk from the last index down to 1 and
/// swap each element with a uniformly chosen one at or below it.
pub fn shuffle_with<'s, T, R>(seq: &'s mut Sequence<T>, rng: &mut R) -> &'s mut Sequence<T>
where
    R: Rng + ?Sized,
{
    for current in (1..seq.len()).rev() {
        let other = rng.random_range(0..=current);
        seq.swap(current, other);
    }
    seq
}
