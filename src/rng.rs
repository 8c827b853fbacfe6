//! Seedable random-draw source shared by renderers and post-processing.
//!
//! Every stochastic step in a generation call pulls from one `DrawRng`, in
//! the order the renderers issue their draws. That order is part of the
//! reproducibility contract: same seed, same sequence of calls, same image.
//! A context built with [`DrawRng::recording`] keeps a log of those calls so
//! the order each renderer uses can be checked.

use crate::palettes::{Bucket, Palette};
use image::Rgb;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One call made against a [`DrawRng`], logged without its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// `draw_int(min, max)`
    Int(i32, i32),
    Float,
    /// `draw_color` from a palette bucket
    Color(Bucket),
    /// `choose` over a slice of this many colors
    Pick(usize),
}

/// Deterministic PRNG context threaded through a generation call.
#[derive(Debug, Clone)]
pub struct DrawRng {
    rng: ChaCha8Rng,
    trace: Option<Vec<Draw>>,
}

impl DrawRng {
    /// Create a context seeded from the given value.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), trace: None }
    }

    /// Seeded context that logs every call it serves.
    pub fn recording(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), trace: Some(Vec::new()) }
    }

    /// Create a context from OS entropy.
    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy(), trace: None }
    }

    /// Context for one request: seeded when a seed is given, entropy otherwise.
    ///
    /// Negative seeds are reinterpreted bit for bit.
    pub fn for_request(seed: Option<i64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed as u64),
            None => Self::from_entropy(),
        }
    }

    /// Reset to a deterministic state when a seed is supplied.
    ///
    /// With `None` the current stream simply continues.
    pub fn reseed(&mut self, seed: Option<i64>) {
        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed as u64);
        }
    }

    /// Take the calls logged so far, leaving an empty log.
    ///
    /// Returns `None` unless the context was built with [`recording`](Self::recording).
    pub fn take_trace(&mut self) -> Option<Vec<Draw>> {
        self.trace.as_mut().map(std::mem::take)
    }

    fn log(&mut self, draw: Draw) {
        if let Some(trace) = &mut self.trace {
            trace.push(draw);
        }
    }

    /// Uniform integer in `[min, max]` (both inclusive).
    ///
    /// `min == max` returns `min` without consuming randomness.
    pub fn draw_int(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "empty draw range {}..={}", min, max);
        self.log(Draw::Int(min, max));
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform float in `[0.0, 1.0)`.
    pub fn draw_float(&mut self) -> f64 {
        self.log(Draw::Float);
        self.rng.gen::<f64>()
    }

    /// Pick one color uniformly from a slice of colors.
    ///
    /// Callers pass palette buckets, which are never empty. An empty slice
    /// yields black without consuming a draw.
    pub fn choose(&mut self, colors: &[Rgb<u8>]) -> Rgb<u8> {
        self.log(Draw::Pick(colors.len()));
        self.pick(colors)
    }

    /// Pick one color from a palette bucket.
    pub fn draw_color(&mut self, palette: &Palette, bucket: Bucket) -> Rgb<u8> {
        self.log(Draw::Color(bucket));
        self.pick(palette.bucket(bucket))
    }

    fn pick(&mut self, colors: &[Rgb<u8>]) -> Rgb<u8> {
        if colors.is_empty() {
            return Rgb([0, 0, 0]);
        }
        colors[self.rng.gen_range(0..colors.len())]
    }
}
