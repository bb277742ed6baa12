//! Audio mathematics utilities for auditory-scale analysis.
//!
//! This module provides the numeric collaborators behind the cochleagram
//! transform: ERB-scale frequency conversions, perceptually uniform channel
//! spacing, the gammatone analysis-window generator, and small framing and
//! spectral helpers.
//!
//! The ERB (Equivalent Rectangular Bandwidth) scale describes the bandwidth
//! of human auditory filters as a function of their center frequency and is
//! the basis for the channel layout of the cochleagram.
//!
//! # Examples
//!
//! ```rust
//! use cochleagram::utils::audio_math::{erb, erb_space, hz_to_erb_rate};
//!
//! // Auditory filter bandwidth at 1 kHz
//! let bandwidth = erb(1000.0); // ≈ 132.6 Hz
//!
//! // 16 channels spaced uniformly on the ERB-rate scale
//! let channels = erb_space(100.0, 8000.0, 16);
//! assert_eq!(channels.len(), 16);
//! ```

use crate::{RealFloat, to_precision};
use ndarray::{Array1, Array2, s};

// =============================================================================
// ERB-SCALE CONVERSIONS
// =============================================================================

/// Returns the equivalent rectangular bandwidth at a center frequency.
///
/// Uses the Glasberg and Moore approximation:
/// `ERB(f) = 24.7 * (4.37 * f / 1000 + 1)`
///
/// # Arguments
/// * `freq_hz` - Center frequency in Hz
///
/// # Returns
/// Auditory filter bandwidth in Hz
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::erb;
///
/// let bw_dc = erb(0.0); // 24.7 Hz
/// let bw_1k = erb(1000.0); // ≈ 132.6 Hz
/// ```
pub fn erb<F: RealFloat>(freq_hz: F) -> F {
    to_precision::<F, _>(24.7)
        * (to_precision::<F, _>(4.37) * freq_hz / to_precision::<F, _>(1000.0) + F::one())
}

/// Converts frequency in Hz to the ERB-rate scale.
///
/// The ERB-rate scale measures cumulative distance in auditory filter
/// bandwidths, so equal steps on it are perceptually uniform. Uses:
/// `rate = 21.4 * log10(1 + 4.37 * f / 1000)`
///
/// # Arguments
/// * `freq_hz` - Frequency in Hz
///
/// # Returns
/// Position on the ERB-rate scale (in ERBs)
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::hz_to_erb_rate;
///
/// let rate = hz_to_erb_rate(1000.0); // ≈ 15.6 ERBs
/// ```
pub fn hz_to_erb_rate<F: RealFloat>(freq_hz: F) -> F {
    to_precision::<F, _>(21.4)
        * (F::one() + to_precision::<F, _>(4.37) * freq_hz / to_precision::<F, _>(1000.0)).log10()
}

/// Converts an ERB-rate scale value back to frequency in Hz.
///
/// Inverse of `hz_to_erb_rate`. Uses the formula:
/// `f = (10^(rate / 21.4) - 1) * 1000 / 4.37`
///
/// # Arguments
/// * `erb_rate` - Position on the ERB-rate scale
///
/// # Returns
/// Frequency in Hz
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::{erb_rate_to_hz, hz_to_erb_rate};
///
/// let freq: f64 = 1000.0;
/// let rate = hz_to_erb_rate(freq);
/// let freq_back = erb_rate_to_hz(rate);
/// assert!((freq - freq_back).abs() < 1e-6f64);
/// ```
pub fn erb_rate_to_hz<F: RealFloat>(erb_rate: F) -> F {
    (to_precision::<F, _>(10.0).powf(erb_rate / to_precision::<F, _>(21.4)) - F::one())
        * to_precision::<F, _>(1000.0)
        / to_precision::<F, _>(4.37)
}

/// Generates frequencies spaced uniformly on the ERB-rate scale.
///
/// Creates `count` frequency points between `low` and `high` (both
/// inclusive) whose ERB-rate values are linearly spaced. This is the
/// channel layout used by the cochleagram's default filter bank.
///
/// # Arguments
/// * `low` - Lowest frequency in Hz
/// * `high` - Highest frequency in Hz
/// * `count` - Number of frequency points to generate
///
/// # Returns
/// Frequencies in Hz, uniformly spaced on the ERB-rate scale
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::erb_space;
///
/// let freqs = erb_space(30.0, 16000.0, 77);
/// assert_eq!(freqs.len(), 77);
/// assert!((freqs[0] - 30.0f64).abs() < 1e-6);
/// assert!((freqs[76] - 16000.0f64).abs() < 1e-6);
/// ```
pub fn erb_space<F: RealFloat>(low: F, high: F, count: usize) -> Array1<F> {
    if count == 0 {
        return Array1::zeros(0);
    }
    if count == 1 {
        return Array1::from_elem(1, low);
    }

    let rate_low = hz_to_erb_rate(low);
    let rate_high = hz_to_erb_rate(high);
    let rate_step = (rate_high - rate_low) / to_precision::<F, _>(count - 1);

    Array1::from_iter(
        (0..count).map(|i| erb_rate_to_hz(rate_low + to_precision::<F, _>(i) * rate_step)),
    )
}

// =============================================================================
// WINDOW AND FRAMING HELPERS
// =============================================================================

/// Generates a time-reversed gammatone envelope window.
///
/// The envelope follows the impulse response of a 4th-order gammatone
/// filter, `e(u) = u^3 * exp(-2 * pi * 0.495 * erds * u)` sampled at
/// `u = k / len`, then time-reversed so the envelope rises toward its peak
/// late in the window, and finally scaled so the peak value is 1. The
/// `erds` argument expresses the window length in equivalent rectangular
/// durations: larger values concentrate the envelope in a shorter portion
/// of the window.
///
/// # Arguments
/// * `len` - Window length in samples
/// * `erds` - Window length expressed in equivalent rectangular durations
///
/// # Returns
/// Peak-normalized window of `len` samples
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::gammatone_window;
///
/// let window = gammatone_window(2048, 2.0f64);
/// assert_eq!(window.len(), 2048);
/// let peak = window.iter().cloned().fold(0.0, f64::max);
/// assert!((peak - 1.0).abs() < 1e-12);
/// ```
pub fn gammatone_window<F: RealFloat>(len: usize, erds: F) -> Array1<F> {
    if len == 0 {
        return Array1::zeros(0);
    }

    let two_pi = to_precision::<F, _>(2.0) * F::PI();
    let decay = two_pi * to_precision::<F, _>(0.495) * erds;
    let n = to_precision::<F, _>(len);

    let mut window = Array1::zeros(len);
    for k in 0..len {
        let u = to_precision::<F, _>(len - 1 - k) / n;
        window[k] = u * u * u * (-decay * u).exp();
    }

    let peak = window.iter().cloned().fold(F::zero(), F::max);
    if peak > F::zero() {
        window.mapv_inplace(|v| v / peak);
    }
    window
}

/// Computes the weighted centroid index of a non-negative vector.
///
/// Returns `sum(k * v[k]) / sum(v[k])` over sample indices `k`, the center
/// of mass of the vector. Used to locate the energy center of the squared
/// analysis window so frames can be aligned on it. An all-zero vector has
/// centroid 0.
///
/// # Arguments
/// * `weights` - Non-negative weights, one per sample index
///
/// # Returns
/// Center-of-mass index (fractional)
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::centroid;
/// use ndarray::array;
///
/// let uniform = array![1.0f64, 1.0, 1.0, 1.0, 1.0];
/// assert!((centroid(&uniform) - 2.0).abs() < 1e-12);
///
/// let impulse = array![0.0f64, 0.0, 0.0, 1.0];
/// assert!((centroid(&impulse) - 3.0).abs() < 1e-12);
/// ```
pub fn centroid<F: RealFloat>(weights: &Array1<F>) -> F {
    let total = weights.sum();
    if total <= F::zero() {
        return F::zero();
    }

    let weighted = weights
        .iter()
        .enumerate()
        .fold(F::zero(), |acc, (i, &w)| acc + to_precision::<F, _>(i) * w);
    weighted / total
}

/// Slices a signal into overlapping frames.
///
/// Extracts frames of `frame_len` samples starting every `hop` samples,
/// stored as the columns of the returned matrix, together with the start
/// index of each frame. Frames that would run past the end of the signal
/// are not emitted; a signal shorter than one frame yields zero frames.
///
/// # Arguments
/// * `signal` - Input samples
/// * `frame_len` - Frame length in samples (must be > 0)
/// * `hop` - Interval between frame starts in samples (must be > 0)
///
/// # Returns
/// A `frame_len x num_frames` matrix of frame columns and the per-frame
/// start indices
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::frame_signal;
/// use ndarray::Array1;
///
/// let signal = Array1::from_iter((0..10).map(|i| i as f64));
/// let (frames, starts) = frame_signal(&signal, 4, 2);
/// assert_eq!(frames.dim(), (4, 4));
/// assert_eq!(starts, vec![0, 2, 4, 6]);
/// assert_eq!(frames[(0, 1)], 2.0);
/// ```
pub fn frame_signal<F: RealFloat>(
    signal: &Array1<F>,
    frame_len: usize,
    hop: usize,
) -> (Array2<F>, Vec<usize>) {
    if frame_len == 0 || hop == 0 || signal.len() < frame_len {
        return (Array2::zeros((frame_len, 0)), Vec::new());
    }

    let num_frames = (signal.len() - frame_len) / hop + 1;
    let mut frames = Array2::zeros((frame_len, num_frames));
    let mut starts = Vec::with_capacity(num_frames);

    for frame_idx in 0..num_frames {
        let start = frame_idx * hop;
        starts.push(start);
        frames
            .column_mut(frame_idx)
            .assign(&signal.slice(s![start..start + frame_len]));
    }

    (frames, starts)
}

// =============================================================================
// SPECTRAL HELPER FUNCTIONS
// =============================================================================

/// Generates the frequencies of the retained one-sided FFT bins.
///
/// Bin `k` of an `n_fft`-point transform corresponds to the frequency
/// `k * sample_rate / n_fft`. The caller chooses how many bins to keep;
/// the cochleagram retains `n_fft / 2` bins (DC included, Nyquist
/// excluded). `n_fft` must be non-zero.
///
/// # Arguments
/// * `n_fft` - FFT size in samples
/// * `sample_rate` - Sampling rate in Hz
/// * `n_bins` - Number of leading bins to generate
///
/// # Returns
/// Frequencies in Hz, one per retained bin
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::fft_bin_frequencies;
///
/// let freqs = fft_bin_frequencies(2048, 44100.0, 1024);
/// assert_eq!(freqs.len(), 1024);
/// assert_eq!(freqs[0], 0.0); // DC component
/// assert!((freqs[1] - 21.533203125f64).abs() < 1e-9);
/// ```
pub fn fft_bin_frequencies<F: RealFloat>(n_fft: usize, sample_rate: F, n_bins: usize) -> Array1<F> {
    let freq_resolution = sample_rate / to_precision::<F, _>(n_fft);
    Array1::from_iter((0..n_bins).map(|k| to_precision::<F, _>(k) * freq_resolution))
}

// =============================================================================
// POWER CONVERSIONS
// =============================================================================

/// Converts power to decibels.
///
/// Uses the formula: `dB = 10 * log10(power)` for power ratios.
/// Returns -80 dB for zero or negative power to avoid infinite values;
/// positive powers are never clamped, so values below 1e-8 map below
/// -80 dB. For a whole-matrix conversion that clamps every value to a
/// caller-chosen floor, see
/// [`Cochleagram::to_db`](crate::analysis::Cochleagram::to_db).
///
/// # Arguments
/// * `power` - Power value
///
/// # Returns
/// Power in decibels (dB)
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::power_to_db;
///
/// let db = power_to_db(1.0); // 0.0 dB
/// let db_half = power_to_db(0.5); // ≈ -3.01 dB
/// ```
pub fn power_to_db<F: RealFloat>(power: F) -> F {
    if power > F::zero() {
        to_precision::<F, _>(10.0) * power.log10()
    } else {
        to_precision::<F, _>(-80.0) // Floor at -80 dB
    }
}

/// Converts decibels to power.
///
/// Uses the formula: `power = 10^(dB / 10)` for power ratios.
///
/// # Arguments
/// * `db` - Power in decibels
///
/// # Returns
/// Linear power value
///
/// # Examples
///
/// ```rust
/// use cochleagram::utils::audio_math::db_to_power;
///
/// let power = db_to_power(0.0); // 1.0
/// let power_neg3 = db_to_power(-3.0); // ≈ 0.501
/// ```
pub fn db_to_power<F: RealFloat>(db: F) -> F {
    to_precision::<F, _>(10.0).powf(db / to_precision::<F, _>(10.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use ndarray::array;

    #[test]
    fn test_erb_known_values() {
        // ERB(0) = 24.7, ERB(1000) = 24.7 * 5.37 = 132.639
        assert_approx_eq!(erb(0.0f64), 24.7, 1e-12);
        assert_approx_eq!(erb(1000.0f64), 132.639, 1e-9);

        // Bandwidth grows linearly with frequency
        let delta_low = erb(2000.0f64) - erb(1000.0f64);
        let delta_high = erb(9000.0f64) - erb(8000.0f64);
        assert!((delta_low - delta_high).abs() < 1e-9);
    }

    #[test]
    fn test_erb_rate_round_trip() {
        for &freq in &[30.0f64, 100.0, 440.0, 1000.0, 8000.0, 16000.0] {
            let rate = hz_to_erb_rate(freq);
            let freq_back = erb_rate_to_hz(rate);
            assert_approx_eq!(freq_back, freq, 1e-9);
        }
    }

    #[test]
    fn test_erb_rate_monotonic() {
        let freqs = [0.0f64, 50.0, 200.0, 1000.0, 5000.0, 20000.0];
        for pair in freqs.windows(2) {
            assert!(hz_to_erb_rate(pair[0]) < hz_to_erb_rate(pair[1]));
        }
    }

    #[test]
    fn test_erb_space_endpoints_and_spacing() {
        let freqs = erb_space(30.0f64, 16000.0, 77);
        assert_eq!(freqs.len(), 77);
        assert!((freqs[0] - 30.0).abs() < 1e-6);
        assert!((freqs[76] - 16000.0).abs() < 1e-6);

        // Uniform steps on the ERB-rate scale
        let rates: Vec<f64> = freqs.iter().map(|&f| hz_to_erb_rate(f)).collect();
        let expected_step = (rates[76] - rates[0]) / 76.0;
        for pair in rates.windows(2) {
            assert!((pair[1] - pair[0] - expected_step).abs() < 1e-9);
        }
    }

    #[test]
    fn test_erb_space_degenerate_counts() {
        assert_eq!(erb_space(100.0f64, 1000.0, 0).len(), 0);

        let single = erb_space(100.0f64, 1000.0, 1);
        assert_eq!(single.len(), 1);
        assert!((single[0] - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_gammatone_window_shape() {
        let window = gammatone_window(2048, 2.0f64);
        assert_eq!(window.len(), 2048);

        // Peak-normalized, non-negative, zero at the trailing edge
        let peak = window.iter().cloned().fold(0.0f64, f64::max);
        assert!((peak - 1.0).abs() < 1e-12);
        assert!(window.iter().all(|&v| v >= 0.0));
        assert_eq!(window[2047], 0.0);

        // Time-reversed envelope peaks in the second half of the window
        let peak_idx = window
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert!(peak_idx > 1024);
    }

    #[test]
    fn test_gammatone_window_erds_concentration() {
        // More ERDs per window means a faster envelope decay, pushing the
        // reversed envelope's center of mass toward the trailing edge.
        let wide = gammatone_window(1024, 1.0f64);
        let narrow = gammatone_window(1024, 4.0f64);
        let centroid_wide = centroid(&wide.mapv(|v| v * v));
        let centroid_narrow = centroid(&narrow.mapv(|v| v * v));
        assert!(centroid_narrow > centroid_wide);
    }

    #[test]
    fn test_centroid_values() {
        // Uniform weights center on the middle index
        let uniform = array![1.0f64, 1.0, 1.0, 1.0, 1.0];
        assert!((centroid(&uniform) - 2.0).abs() < 1e-12);

        // An impulse centers on itself
        let impulse = array![0.0f64, 0.0, 1.0, 0.0];
        assert!((centroid(&impulse) - 2.0).abs() < 1e-12);

        // All-zero input maps to index 0
        let zeros = array![0.0f64, 0.0, 0.0];
        assert_eq!(centroid(&zeros), 0.0);
    }

    #[test]
    fn test_frame_signal_layout() {
        let signal = Array1::from_iter((0..10).map(|i| i as f64));
        let (frames, starts) = frame_signal(&signal, 4, 2);

        // (10 - 4) / 2 + 1 = 4 frames
        assert_eq!(frames.dim(), (4, 4));
        assert_eq!(starts, vec![0, 2, 4, 6]);

        // Column 1 holds samples 2..6
        assert_eq!(frames.column(1).to_vec(), vec![2.0, 3.0, 4.0, 5.0]);
        // Final frame ends exactly at the signal's last sample
        assert_eq!(frames.column(3).to_vec(), vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_frame_signal_short_input() {
        let signal = array![1.0f64, 2.0, 3.0];
        let (frames, starts) = frame_signal(&signal, 4, 2);
        assert_eq!(frames.dim(), (4, 0));
        assert!(starts.is_empty());
    }

    #[test]
    fn test_frame_signal_exact_fit() {
        let signal = array![1.0f64, 2.0, 3.0, 4.0];
        let (frames, starts) = frame_signal(&signal, 4, 3);
        assert_eq!(frames.dim(), (4, 1));
        assert_eq!(starts, vec![0]);
    }

    #[test]
    fn test_fft_bin_frequencies() {
        let freqs = fft_bin_frequencies(2048, 44100.0f64, 1024);
        assert_eq!(freqs.len(), 1024);
        assert_eq!(freqs[0], 0.0); // DC
        // Bin spacing is sr / n_fft
        let resolution = 44100.0 / 2048.0;
        assert!((freqs[1] - resolution).abs() < 1e-9);
        // Last retained bin sits just below Nyquist
        assert!((freqs[1023] - 1023.0 * resolution).abs() < 1e-9);
        assert!(freqs[1023] < 22050.0);
    }

    #[test]
    fn test_power_db_conversions() {
        // Test unity power
        assert!((power_to_db(1.0f64) - 0.0f64).abs() < 0.001f64);
        assert!((db_to_power(0.0f64) - 1.0f64).abs() < 0.001f64);

        // Test -3 dB ≈ 0.5 power
        assert!((power_to_db(0.5f64) + 3.01f64).abs() < 0.1f64);
        assert!((db_to_power(-3.0f64) - 0.501f64).abs() < 0.01f64);

        // Non-positive power floors at -80 dB
        assert_eq!(power_to_db(0.0f64), -80.0);
        assert_eq!(power_to_db(-1.0f64), -80.0);

        // Small positive powers are not clamped to the -80 dB substitute
        assert_approx_eq!(power_to_db(1e-12f64), -120.0, 1e-9);
    }
}
