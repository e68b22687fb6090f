//! Interval arithmetic for ray parameter ranges.
//!
//! Provides closed intervals [min, max] used for ray t-values and colour clamping.

/// Closed interval [min, max] for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f64,
    /// Maximum value of the interval
    pub max: f64,
}

impl Interval {
    /// Empty interval (min > max), contains nothing.
    pub const EMPTY: Interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Universe interval, contains every real number.
    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Create a new interval with given min and max values
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the interval. Negative for an empty interval.
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp the given value to be within this interval's bounds
    pub fn clamp(&self, x: f64) -> f64 {
        if x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let i = Interval::new(0.0, 1.0);
        assert!(i.contains(0.0));
        assert!(i.contains(1.0));
        assert!(!i.contains(1.5));
    }

    #[test]
    fn test_surrounds_is_exclusive() {
        let i = Interval::new(0.0, 1.0);
        assert!(!i.surrounds(0.0));
        assert!(!i.surrounds(1.0));
        assert!(i.surrounds(0.5));
    }

    #[test]
    fn test_empty_and_universe() {
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(Interval::EMPTY.size() < 0.0);
        assert!(Interval::UNIVERSE.surrounds(1e300));
        assert_eq!(Interval::default(), Interval::EMPTY);
    }

    #[test]
    fn test_clamp() {
        let i = Interval::new(0.0, 0.999);
        assert_eq!(i.clamp(-1.0), 0.0);
        assert_eq!(i.clamp(2.0), 0.999);
        assert_eq!(i.clamp(0.25), 0.25);
    }
}
