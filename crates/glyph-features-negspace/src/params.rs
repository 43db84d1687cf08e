use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NegativeSpaceParams {
    /// Pairs closer than this many steps (Chebyshev distance) cast no ray.
    pub min_steps: usize,
    /// Spread the all-pairs pass over the rayon pool.
    pub parallel: bool,
}

impl Default for NegativeSpaceParams {
    fn default() -> Self {
        Self {
            min_steps: 2,
            parallel: true,
        }
    }
}
