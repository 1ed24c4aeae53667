use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use cgmtok_core::consts::READINGS_PER_DAY;

use crate::consts::{GLUCOSE_CEILING, GLUCOSE_FLOOR, MEAL_TIMES, NOISE_STD};
use crate::error::SimError;

/// Shape of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileParams {
    pub base: f64,
    pub peak_min: f64,
    pub peak_max: f64,
    /// Width of each post-meal peak, in hours.
    pub sigma: f64,
}

impl ProfileParams {
    pub fn diabetic() -> Self {
        ProfileParams {
            base: 160.0,
            peak_min: 80.0,
            peak_max: 150.0,
            sigma: 1.5,
        }
    }

    pub fn normal() -> Self {
        ProfileParams {
            base: 100.0,
            peak_min: 30.0,
            peak_max: 60.0,
            sigma: 0.8,
        }
    }

    pub fn for_status(is_diabetic: bool) -> Self {
        if is_diabetic {
            Self::diabetic()
        } else {
            Self::normal()
        }
    }
}

/// StdRng from a fixed seed, or from the OS when none is given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Hours since midnight for each of the day's readings, evenly spaced over [0, 24].
fn time_points() -> Vec<f64> {
    let step = 24.0 / (READINGS_PER_DAY - 1) as f64;
    (0..READINGS_PER_DAY).map(|i| i as f64 * step).collect()
}

///
/// Simulate one day of glucose readings.
///
/// A flat baseline plus a Gaussian bump after each meal, with N(0, 5) noise, clipped into
/// [40, 400] and truncated to whole mg/dL.
///
/// # Arguments
/// - is_diabetic: use the elevated baseline and taller, wider peaks
/// - rng: source of randomness
///
pub fn generate_glucose_profile<R: Rng>(
    is_diabetic: bool,
    rng: &mut R,
) -> Result<Vec<i64>, SimError> {
    let params = ProfileParams::for_status(is_diabetic);
    let noise = Normal::new(0.0, NOISE_STD)?;

    let t = time_points();
    let mut glucose = vec![params.base; t.len()];

    for meal in MEAL_TIMES {
        let height = rng.random_range(params.peak_min..params.peak_max);
        for (g, &hour) in glucose.iter_mut().zip(&t) {
            let z = (hour - meal) / params.sigma;
            *g += height * (-0.5 * z * z).exp();
        }
    }

    let profile = glucose
        .into_iter()
        .map(|g| {
            let noisy = g + noise.sample(rng);
            noisy.clamp(GLUCOSE_FLOOR, GLUCOSE_CEILING).trunc() as i64
        })
        .collect();

    Ok(profile)
}
