//! Analysis window design.
//!
//! The cochleagram analyzes every channel through one shared time window
//! shaped like a time-reversed gammatone envelope. Its duration follows
//! the equivalent rectangular duration (ERD) of the narrowest auditory
//! filter, so the window is long enough for the lowest channels while the
//! FFT length stays a power of two.

use ndarray::Array1;

use crate::utils::audio_math::{centroid, erb, gammatone_window};
use crate::{CochleagramError, CochleagramResult, RealFloat, to_precision};

use super::{ERB_OVER_B, ERD_TIMES_B};

/// The shared gammatone-envelope analysis window.
///
/// Designed from the sampling rate alone: the base auditory bandwidth
/// `24.7 Hz` fixes the gammatone shape parameter `b0 = 24.7 / 0.982` and
/// the equivalent rectangular duration `ERD = 0.495 / b0`; the window
/// length is the smallest power of two covering `2 * ERD * sample_rate`
/// samples. Values are peak-normalized; absolute scale is free because
/// the transform carries no absolute calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisWindow<F: RealFloat> {
    values: Array1<F>,
    erd: F,
    shape_parameter: F,
    centroid_offset: usize,
}

impl<F: RealFloat> AnalysisWindow<F> {
    /// Designs the analysis window for a sampling rate in Hz.
    ///
    /// # Errors
    /// Returns [`CochleagramError::InvalidParameter`] if the sampling rate
    /// yields a window length not representable as `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cochleagram::AnalysisWindow;
    ///
    /// let window = AnalysisWindow::<f64>::design(44100.0).unwrap();
    /// assert_eq!(window.len(), 2048);
    /// ```
    pub fn design(sample_rate: F) -> CochleagramResult<Self> {
        let base_bandwidth = erb(F::zero());
        let shape_parameter = base_bandwidth / to_precision::<F, _>(ERB_OVER_B);
        let erd = to_precision::<F, _>(ERD_TIMES_B) / shape_parameter;

        let two = to_precision::<F, _>(2.0);
        let min_len = (two * erd * sample_rate).ceil().to_usize().ok_or_else(|| {
            CochleagramError::InvalidParameter(format!(
                "sample_rate {} Hz yields an unrepresentable window length",
                sample_rate.to_f64().unwrap_or(f64::NAN)
            ))
        })?;
        let len = min_len.max(1).next_power_of_two();

        // Window span measured in ERDs; about 2 by construction, slightly
        // more after rounding the length up to a power of two.
        let erds = to_precision::<F, _>(len) / (erd * sample_rate);
        let values = gammatone_window(len, erds);

        let energy = values.mapv(|v| v * v);
        let centroid_offset = centroid(&energy).round().to_usize().unwrap_or(0);

        Ok(Self {
            values,
            erd,
            shape_parameter,
            centroid_offset,
        })
    }

    /// Returns the window values.
    pub const fn values(&self) -> &Array1<F> {
        &self.values
    }

    /// Returns the window length in samples (a power of two).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the equivalent rectangular duration in seconds.
    pub const fn erd(&self) -> F {
        self.erd
    }

    /// Returns the gammatone shape parameter `b0` in Hz.
    ///
    /// The window behaves like a 0 Hz gammatone filter with this shape
    /// parameter; kernel bandwidths are corrected against it.
    pub const fn shape_parameter(&self) -> F {
        self.shape_parameter
    }

    /// Returns the rounded energy-centroid index of the squared window.
    ///
    /// Frames are zero-padded so this index lines up with the nominal
    /// analysis instants.
    pub const fn centroid_offset(&self) -> usize {
        self.centroid_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_design_constants() {
        let window = AnalysisWindow::<f64>::design(44100.0).unwrap();

        // b0 = 24.7 / 0.982, ERD = 0.495 / b0
        assert_approx_eq!(window.shape_parameter(), 25.15275, 1e-4);
        assert!((window.erd() - 0.0196798).abs() < 1e-6);
    }

    #[test]
    fn test_window_length_is_smallest_covering_power_of_two() {
        for &sample_rate in &[8000.0f64, 11025.0, 16000.0, 22050.0, 44100.0, 48000.0, 96000.0] {
            let window = AnalysisWindow::<f64>::design(sample_rate).unwrap();
            let len = window.len();
            let min_len = 2.0 * window.erd() * sample_rate;

            assert!(len.is_power_of_two());
            assert!(len as f64 >= min_len);
            assert!(((len / 2) as f64) < min_len);
        }

        // Reference sizes
        assert_eq!(AnalysisWindow::<f64>::design(44100.0).unwrap().len(), 2048);
        assert_eq!(AnalysisWindow::<f64>::design(8000.0).unwrap().len(), 512);
    }

    #[test]
    fn test_window_values_are_normalized() {
        let window = AnalysisWindow::<f64>::design(44100.0).unwrap();
        let values = window.values();

        let peak = values.iter().cloned().fold(0.0f64, f64::max);
        assert!((peak - 1.0).abs() < 1e-12);
        assert!(values.iter().all(|&v| v >= 0.0));
        // Time-reversed envelope decays to zero at the trailing edge
        assert_eq!(values[window.len() - 1], 0.0);
    }

    #[test]
    fn test_centroid_offset_sits_past_midpoint() {
        // The reversed envelope concentrates energy late in the window
        let window = AnalysisWindow::<f64>::design(44100.0).unwrap();
        let offset = window.centroid_offset();
        assert!(offset > window.len() / 4);
        assert!(offset < window.len());
    }

    #[test]
    fn test_design_matches_across_precisions() {
        let window_f32 = AnalysisWindow::<f32>::design(44100.0).unwrap();
        let window_f64 = AnalysisWindow::<f64>::design(44100.0).unwrap();
        assert_eq!(window_f32.len(), window_f64.len());
        assert!((f64::from(window_f32.erd()) - window_f64.erd()).abs() < 1e-6);
    }
}
