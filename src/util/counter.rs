use std::fmt;
use std::fmt::{Display, Formatter};

/// Monotonic count of iterations or streaks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    value: usize,
}

impl Counter {
    pub fn new() -> Self {
        Counter::default()
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn inc(&mut self) {
        self.value += 1;
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}

impl Display for Counter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Count: {}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inc_and_reset_works() {
        let mut counter = Counter::new();
        counter.inc();
        counter.inc();
        assert_eq!(counter.value(), 2);

        counter.reset();
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn display_works() {
        let mut counter = Counter::new();
        counter.inc();
        assert_eq!(format!("{}", counter), "Count: 1");
    }
}
