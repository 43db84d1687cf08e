use std::sync::atomic::{AtomicU64, Ordering};

/// `f64` cell with atomic add, stored as raw bits.
#[derive(Debug, Default)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Add `delta`, returning the previous value.
    pub fn fetch_add(&self, delta: f64) -> f64 {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(prev) => return f64::from_bits(prev),
                Err(actual) => current = actual,
            }
        }
    }

    pub fn into_inner(self) -> f64 {
        f64::from_bits(self.0.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn concurrent_adds_are_not_lost() {
        let cell = AtomicF64::new(0.5);
        (0..10_000).into_par_iter().for_each(|_| {
            cell.fetch_add(1.0);
        });
        assert_eq!(cell.into_inner(), 10_000.5);
    }

    #[test]
    fn fetch_add_returns_previous() {
        let cell = AtomicF64::default();
        assert_eq!(cell.fetch_add(2.0), 0.0);
        assert_eq!(cell.load(), 2.0);
    }
}
