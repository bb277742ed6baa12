//! ERB-weighted gammatone kernel bank.
//!
//! Each channel is a sampled power transfer function of a 4th-order
//! gammatone filter, evaluated at the retained FFT bin frequencies. The
//! analysis window already behaves like a 0 Hz gammatone filter of shape
//! `b0`, so each channel's kernel is built with the reduced shape
//! `bb = sqrt(b^2 - b0^2)`; the window and kernel together then approximate
//! the desired bandwidth `b`. The approximation is near-exact at low and
//! high center frequencies and stays within about 3 dB of the ideal
//! response down to -50 dB in between; it is not an exact deconvolution.

use ndarray::{Array1, Array2};

use crate::utils::audio_math::erb;
use crate::{CochleagramError, CochleagramResult, RealFloat, to_precision};

use super::ERB_OVER_B;

/// Bank of spectral weighting kernels, one column per channel.
///
/// Kernel values are non-negative. Every column is scaled so that its sum
/// equals the channel's nominal ERB bandwidth, giving each channel total
/// weight proportional to its auditory bandwidth; the whole matrix is then
/// divided by its global peak. The pre-normalization peak is retained so
/// the scaling can be undone, for example by a calibration layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ErbKernelBank<F: RealFloat> {
    weights: Array2<F>,
    center_frequencies: Array1<F>,
    bin_frequencies: Array1<F>,
    peak: F,
}

impl<F: RealFloat> ErbKernelBank<F> {
    /// Builds the kernel bank for a set of channel center frequencies.
    ///
    /// `window_shape_parameter` is the analysis window's own gammatone
    /// shape `b0` (see
    /// [`AnalysisWindow::shape_parameter`](super::AnalysisWindow::shape_parameter));
    /// `bandwidth_factor` scales every channel's target bandwidth.
    ///
    /// # Errors
    /// Returns [`CochleagramError::BandwidthTooNarrow`] if any channel's
    /// scaled bandwidth parameter does not exceed `b0`; the kernel shape
    /// `sqrt(b^2 - b0^2)` would not be real for such a channel.
    pub fn build(
        center_frequencies: Array1<F>,
        bin_frequencies: Array1<F>,
        window_shape_parameter: F,
        bandwidth_factor: F,
    ) -> CochleagramResult<Self> {
        let num_bins = bin_frequencies.len();
        let num_channels = center_frequencies.len();
        let mut weights = Array2::zeros((num_bins, num_channels));

        for (chan, &center) in center_frequencies.iter().enumerate() {
            let target_b = erb(center) / to_precision::<F, _>(ERB_OVER_B) * bandwidth_factor;
            if target_b <= window_shape_parameter {
                return Err(CochleagramError::BandwidthTooNarrow(format!(
                    "channel at {} Hz requests bandwidth parameter {} <= window bandwidth parameter {}; raise the center frequency or the bandwidth factor",
                    center.to_f64().unwrap_or(f64::NAN),
                    target_b.to_f64().unwrap_or(f64::NAN),
                    window_shape_parameter.to_f64().unwrap_or(f64::NAN)
                )));
            }

            // Bandwidth left for the kernel once the window's share is removed
            let kernel_b = (target_b * target_b
                - window_shape_parameter * window_shape_parameter)
                .sqrt();
            let kernel_b_squared = kernel_b * kernel_b;

            let mut column = weights.column_mut(chan);
            for (bin, &freq) in bin_frequencies.iter().enumerate() {
                let detune = freq - center;
                // |1 / (i*(f - cf) + bb)^4|^2 = ((f - cf)^2 + bb^2)^-4
                column[bin] = (detune * detune + kernel_b_squared).powi(-4);
            }

            let column_sum = column.sum();
            if column_sum > F::zero() {
                let scale = erb(center) / column_sum;
                column.mapv_inplace(|v| v * scale);
            }
        }

        let peak = weights.iter().cloned().fold(F::zero(), F::max);
        if peak > F::zero() {
            weights.mapv_inplace(|v| v / peak);
        }

        Ok(Self {
            weights,
            center_frequencies,
            bin_frequencies,
            peak,
        })
    }

    /// Returns the kernel matrix, `num_bins x num_channels`.
    pub const fn weights(&self) -> &Array2<F> {
        &self.weights
    }

    /// Returns the channel center frequencies in Hz.
    pub const fn center_frequencies(&self) -> &Array1<F> {
        &self.center_frequencies
    }

    /// Returns the FFT bin frequencies the kernels are sampled at, in Hz.
    pub const fn bin_frequencies(&self) -> &Array1<F> {
        &self.bin_frequencies
    }

    /// Returns the global peak of the kernel matrix before the final
    /// max-normalization.
    pub const fn peak(&self) -> F {
        self.peak
    }

    /// Returns the number of channels.
    pub fn num_channels(&self) -> usize {
        self.weights.ncols()
    }

    /// Returns the number of spectral bins.
    pub fn num_bins(&self) -> usize {
        self.weights.nrows()
    }
}
