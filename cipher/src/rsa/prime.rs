use crate::{DefaultRand, Rand};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;
use std::thread;

/// Generates probable primes of a fixed bit width by racing a pool of
/// sampling workers; the first accepted candidate wins and cancels the
/// rest.
pub struct PrimeGenerator {
    bits: usize,
    workers: usize,
    test_rounds: usize,
}

impl PrimeGenerator {
    /// `bits` must be a positive multiple of 8. The top byte of every
    /// candidate is forced to zero, so the usable randomness is `bits`
    /// bits spread over `bits / 8` bytes; size `bits` accordingly.
    pub fn new(bits: usize) -> Self {
        Self {
            bits,
            workers: (num_cpus::get() * 2).max(1),
            test_rounds: 10,
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn test_rounds(mut self, rounds: usize) -> Self {
        self.test_rounds = rounds.max(1);
        self
    }

    /// Blocks until one worker finds a probable prime, then cancels and
    /// joins every worker before returning. No sampling thread survives
    /// this call; overlapping pools across successive calls would leak.
    pub fn generate(&self) -> BigUint {
        assert!(
            self.bits >= 8 && self.bits % 8 == 0,
            "prime bit length must be a positive multiple of 8, got {}",
            self.bits
        );

        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = channel();
        let mut pool = Vec::with_capacity(self.workers);
        for _ in 0..self.workers {
            let (cancel, tx) = (Arc::clone(&cancel), tx.clone());
            let (bits, rounds) = (self.bits, self.test_rounds);
            pool.push(thread::spawn(move || search(bits, rounds, &cancel, &tx)));
        }
        drop(tx);

        let prime = rx
            .recv()
            .expect("all prime search workers exited without a result");
        cancel.store(true, Ordering::Release);
        for worker in pool {
            if worker.join().is_err() {
                // a leaked worker would poison every later search
                panic!("prime search worker panicked before observing cancellation");
            }
        }

        prime
    }
}

/// Worker loop: sample, sieve, test, repeat until cancelled. Candidates
/// are accepted only when odd, filling their top random byte, and
/// passing the Miller-Rabin test.
fn search(bits: usize, rounds: usize, cancel: &AtomicBool, found: &Sender<BigUint>) {
    let mut rng = DefaultRand::default();
    let mut buf = vec![0u8; bits / 8 + 1];

    while !cancel.load(Ordering::Acquire) {
        rng.rand(buf.as_mut_slice());
        buf[0] = 0;

        let candidate = BigUint::from_bytes_be(buf.as_slice());
        if candidate.is_even() || (candidate.bits() as usize) + 8 <= bits {
            continue;
        }
        if !probably_prime(&candidate, rounds, &mut rng) {
            continue;
        }
        if found.send(candidate).is_err() {
            // receiver already took a winner and went away
            return;
        }
    }
}

/// Miller-Rabin probable prime test with `rounds` random witnesses.
/// Returns false as soon as any witness proves `value` composite.
pub fn probably_prime<R: Rand>(value: &BigUint, rounds: usize, rng: &mut R) -> bool {
    let (two, three) = (BigUint::from(2u32), BigUint::from(3u32));
    if value < &two {
        return false;
    }
    if value == &two || value == &three {
        return true;
    }
    if value.is_even() {
        return false;
    }

    // value - 1 = 2^r * d, d odd
    let value_m1 = value - 1u32;
    let r = value_m1.trailing_zeros().unwrap_or(0);
    let d = &value_m1 >> r;
    let witness_high = value - &two;

    'witness: for _ in 0..rounds {
        let a = rand_in_range(&two, &witness_high, rng);
        let mut x = a.modpow(&d, value);
        if x.is_one() || x == value_m1 {
            continue 'witness;
        }

        for _ in 0..r.saturating_sub(1) {
            x = &x * &x % value;
            if x == value_m1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Uniform random integer in `[low, high]`, both inclusive, by rejection
/// sampling. Terminates with probability 1 but has no iteration bound.
fn rand_in_range<R: Rand>(low: &BigUint, high: &BigUint, rng: &mut R) -> BigUint {
    debug_assert!(high > low, "empty sampling range");

    let range = high - low;
    let mut buf = vec![0u8; min_byte_len(&range) + 1];
    loop {
        rng.rand(buf.as_mut_slice());
        buf[0] = 0;
        let value = BigUint::from_bytes_be(buf.as_slice()) + low;
        if &value <= high {
            return value;
        }
    }
}

/// Fewest bytes holding `value` as an unsigned magnitude; 1 for zero.
fn min_byte_len(value: &BigUint) -> usize {
    (value.bits() as usize).div_ceil(8).max(1)
}
