//! Arithmetic challenge

use std::fmt;

use rand::Rng;

/// Two operands whose sum is the expected answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub lhs: u32,
    pub rhs: u32,
}

impl Challenge {
    pub fn new(lhs: u32, rhs: u32) -> Self {
        Self { lhs, rhs }
    }

    /// Draw both operands independently from `min..=max`
    pub fn generate<R: Rng>(rng: &mut R, min: u32, max: u32) -> Self {
        Self::new(rng.random_range(min..=max), rng.random_range(min..=max))
    }

    pub fn answer(&self) -> i64 {
        self.lhs as i64 + self.rhs as i64
    }

    /// Anything that does not parse as an integer is simply wrong
    pub fn accepts(&self, input: &str) -> bool {
        input.trim().parse::<i64>().is_ok_and(|n| n == self.answer())
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} = ?", self.lhs, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_accepts_sum() {
        let c = Challenge::new(3, 4);
        assert!(c.accepts("7"));
        assert!(c.accepts(" 7 "));
        assert!(!c.accepts("8"));
        assert!(!c.accepts("-7"));
    }

    #[test]
    fn test_non_numeric_is_wrong_not_error() {
        let c = Challenge::new(6, 2);
        for input in ["", "eight", "8.0", "8e0", "0x8"] {
            assert!(!c.accepts(input), "accepted {input:?}");
        }
    }

    #[test]
    fn test_generate_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut seen_lhs = [false; 11];
        for _ in 0..1000 {
            let c = Challenge::generate(&mut rng, 1, 10);
            assert!((1..=10).contains(&c.lhs));
            assert!((1..=10).contains(&c.rhs));
            seen_lhs[c.lhs as usize] = true;
        }
        assert!(seen_lhs[1..].iter().all(|&s| s), "range endpoints never drawn");
    }

    #[test]
    fn test_display() {
        assert_eq!(Challenge::new(6, 2).to_string(), "6 + 2 = ?");
    }
}
