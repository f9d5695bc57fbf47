//! Uniform random selection over provider series.
//!
//! Harvests sample one observation at random instead of always taking the
//! newest, so the archive spans many historical conditions.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick one element uniformly at random. `None` for an empty slice.
pub fn pick<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}
