//! Noise generation
//!
//! White noise for the texture layer. The default source is the thread-local
//! CSPRNG, so a 30 second buffer has no audible repetition; seeded PCG
//! generators can be passed in for reproducible renders.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Generate `sample_count` independent uniform samples in [-1.0, 1.0)
pub fn generate_noise(sample_count: usize) -> Vec<f32> {
    generate_noise_with_rng(sample_count, &mut rand::thread_rng())
}

/// Generate noise from a caller-supplied generator
pub fn generate_noise_with_rng<R: Rng + ?Sized>(sample_count: usize, rng: &mut R) -> Vec<f32> {
    (0..sample_count)
        .map(|_| rng.gen_range(-1.0_f32..1.0_f32))
        .collect()
}

/// Generate reproducible noise from a 64-bit seed
pub fn generate_seeded_noise(sample_count: usize, seed: u64) -> Vec<f32> {
    let mut rng = Pcg32::seed_from_u64(seed);
    generate_noise_with_rng(sample_count, &mut rng)
}
