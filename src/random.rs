//! Injectable randomness
//!
//! Round generation draws every random value through [`RandomSource`] so that
//! hosts can use a real generator while tests script the exact outcome.

use std::collections::VecDeque;

/// A source of uniformly distributed indices
pub trait RandomSource {
    /// Returns a uniform random index in `[0, len)`
    ///
    /// Callers never pass a `len` of zero.
    fn index(&mut self, len: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    fn index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}

/// Replays a fixed sequence of indices, wrapping each into range
///
/// Once the sequence runs out every draw returns `0`. Useful for hosts and
/// tests that need a round with a known word, imposter, and first speaker.
///
/// ```rust
/// use imposter::random::{RandomSource, Scripted};
///
/// let mut rng = Scripted::new([4, 1]);
/// assert_eq!(rng.index(3), 1);
/// assert_eq!(rng.index(3), 1);
/// assert_eq!(rng.index(3), 0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Scripted(VecDeque<usize>);

impl Scripted {
    /// Creates a source that returns `values` in order
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self(values.into_iter().collect())
    }
}

impl RandomSource for Scripted {
    fn index(&mut self, len: usize) -> usize {
        self.0.pop_front().unwrap_or_default() % len
    }
}
