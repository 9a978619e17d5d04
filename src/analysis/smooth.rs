use std::collections::VecDeque;

/// Fixed-capacity trailing window over angle samples.
///
/// The oldest sample is evicted on overflow; the smoothed value is the
/// arithmetic mean of the current contents.
pub struct AngleWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl AngleWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Mean of the current contents. 0.0 while empty.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_over_partial_fill() {
        let mut w = AngleWindow::new(10);
        w.push(90.0);
        w.push(100.0);
        assert_eq!(w.len(), 2);
        assert!((w.mean() - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_eviction_keeps_last_capacity_samples() {
        let mut w = AngleWindow::new(10);
        for i in 0..15 {
            w.push(i as f64);
        }
        assert_eq!(w.len(), 10);
        // contents are 5..=14, mean 9.5
        assert!((w.mean() - 9.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_mean_is_zero() {
        let w = AngleWindow::new(10);
        assert!(w.is_empty());
        assert_eq!(w.mean(), 0.0);
    }

    #[test]
    fn test_capacity_one() {
        let mut w = AngleWindow::new(1);
        w.push(10.0);
        w.push(20.0);
        assert_eq!(w.len(), 1);
        assert_eq!(w.mean(), 20.0);
    }
}
