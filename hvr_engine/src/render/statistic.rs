/// Rolling min/max/average of a timing metric
///
/// Samples are grouped in blocks of [`SAMPLES_PER_BLOCK`]. The accumulate
/// call after a full block starts a new block, so the reported values always
/// describe the current block only.

/// Samples per rolling block
pub const SAMPLES_PER_BLOCK: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistic {
    avg: f32,
    min: f32,
    max: f32,
    samples: u32,
}

impl Default for Statistic {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistic {
    pub fn new() -> Self {
        Self {
            avg: 0.0,
            min: f32::INFINITY,
            max: 0.0,
            samples: 0,
        }
    }

    /// Add one sample (incremental mean)
    pub fn accumulate(&mut self, metric: f32) {
        if self.samples >= SAMPLES_PER_BLOCK {
            *self = Self::new();
        }

        self.samples += 1;
        self.min = self.min.min(metric);
        self.max = self.max.max(metric);
        self.avg += (metric - self.avg) / self.samples as f32;
    }

    pub fn avg(&self) -> f32 {
        self.avg
    }

    /// Smallest sample of the block, 0 while the block is empty
    pub fn min(&self) -> f32 {
        if self.samples == 0 {
            0.0
        } else {
            self.min
        }
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Samples in the current block
    pub fn samples(&self) -> u32 {
        self.samples
    }
}

#[cfg(test)]
#[path = "statistic_tests.rs"]
mod tests;
