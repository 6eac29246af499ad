//! The single point where the responder picks one of several equally valid
//! strings.

use rand::Rng;

/// Picks one option out of a list.
///
/// Every template, advice and framework pick goes through this trait, so a
/// deterministic implementation makes the whole responder deterministic.
pub trait Chooser {
    /// Pick one of `options`, or `None` when the list is empty.
    fn choose<'a>(&mut self, options: &'a [String]) -> Option<&'a str>;
}

/// Uniform random choice.
///
/// Generic over the PRNG type `R` so callers can seed it for reproducible
/// output.
#[derive(Debug, Clone)]
pub struct RandomChooser<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomChooser<R> {
    pub fn new(rng: R) -> Self {
        RandomChooser { rng }
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn choose<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        if options.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..options.len());
        Some(&options[idx])
    }
}

/// Always picks the first option.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn choose<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        options.first().map(String::as_str)
    }
}
