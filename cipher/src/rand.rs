use xrand::rngs::OsRng;
use xrand::RngCore;

pub trait Rand: Default {
    fn rand(&mut self, random: &mut [u8]);
}

/// 默认使用OsRng
#[derive(Copy, Clone, Default)]
pub struct DefaultRand {
    rng: OsRng,
}

impl Rand for DefaultRand {
    fn rand(&mut self, random: &mut [u8]) {
        self.rng.fill_bytes(random);
    }
}
