use getrandom::getrandom;
use oorandom::Rand64;

/// Source of randomness used by ants and colonies.
pub trait RandomSource {
    /// Returns an integer in `min..max`.
    fn next_int(&mut self, min: usize, max: usize) -> usize;

    /// Returns a double in `[0, 1)`.
    fn next_double(&mut self) -> f64;
}

impl RandomSource for Rand64 {
    fn next_int(&mut self, min: usize, max: usize) -> usize {
        self.rand_range(min as u64..max as u64) as usize
    }

    fn next_double(&mut self) -> f64 {
        self.rand_float()
    }
}

pub fn preseeded_rng64() -> Rand64 {
    Rand64::new(os_random_seed())
}

pub fn rng64(seed: u128) -> Rand64 {
    Rand64::new(seed)
}

/// Draws a fresh 128 bit seed from a master generator.
pub fn child_seed(rng: &mut Rand64) -> u128 {
    rng.rand_u64() as u128 + ((rng.rand_u64() as u128) << 64)
}

pub fn os_random_seed() -> u128 {
    let mut buf = [0; 16];
    let _res = getrandom(&mut buf);
    u128::from_le_bytes(buf)
}

/// Replays queued values in order. Panics once a queue runs dry.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    ints: std::collections::VecDeque<usize>,
    doubles: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(ints: Vec<usize>, doubles: Vec<f64>) -> Self {
        ScriptedRandom {
            ints: ints.into(),
            doubles: doubles.into(),
        }
    }

    pub fn doubles(doubles: Vec<f64>) -> Self {
        ScriptedRandom::new(Vec::new(), doubles)
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, _min: usize, _max: usize) -> usize {
        self.ints.pop_front().expect("scripted ints exhausted")
    }

    fn next_double(&mut self) -> f64 {
        self.doubles.pop_front().expect("scripted doubles exhausted")
    }
}
