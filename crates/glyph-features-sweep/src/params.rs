use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SweepParams {
    /// First sampled angle, degrees.
    pub start_deg: i32,
    pub step_deg: i32,
    /// Number of sampled angles.
    pub samples: usize,
    /// Cast angles and rays on the rayon pool.
    pub parallel: bool,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            start_deg: -90,
            step_deg: 3,
            samples: 120,
            parallel: true,
        }
    }
}

impl SweepParams {
    /// Sampled angles in degrees, in sweep order.
    pub fn angles(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.samples).map(move |i| self.start_deg + self.step_deg * i as i32)
    }
}
