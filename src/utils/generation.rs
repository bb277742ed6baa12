//! Audio signal generation utilities.
//!
//! This module provides functions for generating simple reference signals
//! for testing and calibrating the cochleagram analysis.

use std::time::Duration;

use crate::{RealFloat, to_precision};

use ndarray::Array1;
use num_traits::FloatConst;

/// Generates a sine wave with the specified parameters.
///
/// # Arguments
/// * `frequency` - Frequency of the sine wave in Hz
/// * `duration` - Duration of the signal
/// * `sample_rate` - Sample rate in Hz
/// * `amplitude` - Amplitude of the sine wave (0.0 to 1.0)
///
/// # Returns
/// An [`Array1`] containing the generated sine wave samples.
///
/// # Panics
/// If the computed number of samples cannot be represented as `usize`
/// (requires a non-finite or absurdly large duration or sample rate).
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::generation::sine_wave;
/// use std::time::Duration;
///
/// let tone = sine_wave::<f64>(440.0, Duration::from_millis(100), 44100.0, 1.0);
/// assert_eq!(tone.len(), 4410);
/// assert_eq!(tone[0], 0.0);
/// ```
pub fn sine_wave<F: RealFloat>(
    frequency: F,
    duration: Duration,
    sample_rate: F,
    amplitude: F,
) -> Array1<F> {
    let num_samples = (to_precision::<F, _>(duration.as_secs_f64()) * sample_rate)
        .to_usize()
        .expect("duration and sample_rate must yield a representable sample count");

    let two = to_precision::<F, _>(2.0);
    let pi = <F as FloatConst>::PI();
    let two_pi_freq = two * pi * frequency;

    let mut samples = Vec::with_capacity(num_samples);
    for i in 0..num_samples {
        let t = to_precision::<F, _>(i) / sample_rate;
        samples.push(amplitude * num_traits::Float::sin(two_pi_freq * t));
    }

    Array1::from_vec(samples)
}

/// Generates a silent (all-zero) signal.
///
/// # Arguments
/// * `duration` - Duration of the signal
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// An [`Array1`] of zero-valued samples.
///
/// # Panics
/// If the computed number of samples cannot be represented as `usize`
/// (requires a non-finite or absurdly large duration or sample rate).
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::generation::silence;
/// use std::time::Duration;
///
/// let quiet = silence::<f64>(Duration::from_secs(1), 8000.0);
/// assert_eq!(quiet.len(), 8000);
/// assert!(quiet.iter().all(|&v| v == 0.0));
/// ```
pub fn silence<F: RealFloat>(duration: Duration, sample_rate: F) -> Array1<F> {
    let num_samples = (to_precision::<F, _>(duration.as_secs_f64()) * sample_rate)
        .to_usize()
        .expect("duration and sample_rate must yield a representable sample count");

    Array1::zeros(num_samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_wave_basic_properties() {
        let sample_rate = 8000.0f64;
        let tone = sine_wave(1000.0, Duration::from_millis(500), sample_rate, 0.5);

        assert_eq!(tone.len(), 4000);
        assert_eq!(tone[0], 0.0);
        assert!(tone.iter().all(|&v| v.abs() <= 0.5 + 1e-12));

        // Quarter period of 1 kHz at 8 kHz is two samples: sin peaks there
        assert!((tone[2] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_sine_wave_frequency() {
        let sample_rate = 44100.0f64;
        let tone = sine_wave(441.0, Duration::from_secs(1), sample_rate, 1.0);

        // One full period spans exactly 100 samples at this rate
        assert!((tone[0] - tone[100]).abs() < 1e-9);
        assert!((tone[25] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_silence_is_zero() {
        let quiet = silence::<f32>(Duration::from_millis(250), 16000.0);
        assert_eq!(quiet.len(), 4000);
        assert!(quiet.iter().all(|&v| v == 0.0));
    }
}
