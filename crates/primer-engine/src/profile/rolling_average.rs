/// Mean of the last `n` samples, kept in a ring buffer.
#[derive(Debug, Clone)]
pub struct RollingAverage {
    total: f64,
    samples: Vec<f64>,
    cursor: usize,
    capacity: usize,
}

impl RollingAverage {
    pub const DEFAULT_SAMPLES: usize = 30;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            total: 0.0,
            samples: Vec::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    pub fn add_sample(&mut self, v: f64) {
        match self.samples.get_mut(self.cursor) {
            Some(slot) => {
                self.total += v - *slot;
                *slot = v;
            }
            None => {
                self.total += v;
                self.samples.push(v);
            }
        }
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    /// Current average; zero before the first sample.
    pub fn get(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.total / self.samples.len() as f64
    }
}

impl Default for RollingAverage {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SAMPLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_average_is_zero() {
        assert_eq!(RollingAverage::default().get(), 0.0);
    }

    #[test]
    fn partial_window_averages_what_it_has() {
        let mut avg = RollingAverage::new(4);
        avg.add_sample(2.0);
        avg.add_sample(4.0);
        assert_eq!(avg.get(), 3.0);
    }

    #[test]
    fn old_samples_fall_out_of_the_window() {
        let mut avg = RollingAverage::new(3);
        for v in [1.0, 2.0, 3.0, 10.0] {
            avg.add_sample(v);
        }
        // 1.0 was replaced by 10.0.
        assert_eq!(avg.get(), 5.0);
    }

    #[test]
    fn zero_capacity_behaves_like_one() {
        let mut avg = RollingAverage::new(0);
        avg.add_sample(7.0);
        avg.add_sample(9.0);
        assert_eq!(avg.get(), 9.0);
    }
}
