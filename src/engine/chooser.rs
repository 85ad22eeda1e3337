//! Random selection as an injected capability.
//!
//! Both template selection and substitution selection draw an index through a
//! [`Chooser`]. Production code wraps a `rand` generator in [`RngChooser`];
//! tests pass a closure such as `|_| 0`.

use rand::Rng;

/// Produces an index in `0..len` for a non-empty candidate list.
pub trait Chooser {
    fn pick(&mut self, len: usize) -> usize;
}

impl<F> Chooser for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, len: usize) -> usize {
        self(len)
    }
}

/// Uniform selection backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngChooser<R>(pub R);

impl<R: Rng> Chooser for RngChooser<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Pick one of `candidates`, returning its index and text.
///
/// Out-of-range picks (from a scripted chooser) wrap modulo the length.
/// `candidates` must be non-empty, which `Rule` guarantees.
pub(crate) fn choose<'a, C>(chooser: &mut C, candidates: &'a [String]) -> (usize, &'a str)
where
    C: Chooser + ?Sized,
{
    let idx = chooser.pick(candidates.len()) % candidates.len();
    (idx, candidates[idx].as_str())
}
