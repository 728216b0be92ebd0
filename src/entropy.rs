use rand::Rng;

/// Source of the randomness a reveal consumes: frame offsets for the
/// schedule, reroll decisions and decoy picks while scrambling.
///
/// Every [`rand::Rng`] is an `Entropy`; tests swap in a scripted source to
/// pin down exact frames.
pub trait Entropy {
    /// Uniform integer in `0..bound`. `bound` is never zero.
    fn below(&mut self, bound: u32) -> u32;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index into a sequence of `len` items. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> Entropy for R {
    fn below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.random::<f64>() < p
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}
