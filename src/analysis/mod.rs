//! Cochleagram analysis pipeline.
//!
//! The transform mimics the frequency analysis of the cochlea: the signal
//! is cut into heavily overlapping frames under a gammatone-shaped window,
//! each frame's one-sided power spectrum is taken, and the spectra are
//! pooled into channels through a bank of gammatone kernels spaced evenly
//! on the ERB-rate scale. [`compute`] wires the stages together;
//! [`Signal::cochleagram`](crate::Signal::cochleagram) is the usual entry
//! point.
//!
//! Stages, in order:
//! 1. [`config`] resolves the [`CochleagramConfig`] against the signal's
//!    sample rate (channel layout, hop in samples, bandwidth factor).
//! 2. [`window`] designs the gammatone [`AnalysisWindow`] for the sample
//!    rate.
//! 3. [`kernel`] builds the [`ErbKernelBank`] over the retained FFT bins.
//! 4. Framing centers each analysis instant on the window's energy
//!    centroid, the frames are transformed to power spectra, and a single
//!    matrix product collapses bins into channels.

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::utils::audio_math::{fft_bin_frequencies, hz_to_erb_rate};
use crate::{CochleagramResult, RealFloat, Signal, to_precision};

pub mod config;
mod framing;
pub mod kernel;
mod spectrum;
pub mod window;

pub use config::CochleagramConfig;
pub use kernel::ErbKernelBank;
pub use window::AnalysisWindow;

// 4th-order gammatone filter relations: ERB = 0.982 * b and ERD = 0.495 / b.
pub(crate) const ERB_OVER_B: f64 = 0.982;
pub(crate) const ERD_TIMES_B: f64 = 0.495;

// ===== OUTPUT TYPE =====

/// Result of a cochleagram analysis.
///
/// Holds the channel-by-frame power matrix together with the axes needed
/// to interpret it: the channel center frequencies in Hz and the frame
/// times in seconds. Row `c` of [`power`](Self::power) is the power
/// trajectory of the channel centered at `channel_frequencies()[c]`;
/// column `t` is the excitation pattern at `times()[t]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cochleagram<F: RealFloat> {
    power: Array2<F>,
    channel_frequencies: Array1<F>,
    times: Array1<F>,
}

impl<F: RealFloat> Cochleagram<F> {
    /// Returns the power matrix, `num_channels x num_frames`.
    pub const fn power(&self) -> &Array2<F> {
        &self.power
    }

    /// Returns the channel center frequencies in Hz, lowest first.
    pub const fn channel_frequencies(&self) -> &Array1<F> {
        &self.channel_frequencies
    }

    /// Returns the analysis instant of each frame in seconds, measured
    /// from the start of the signal.
    pub const fn times(&self) -> &Array1<F> {
        &self.times
    }

    /// Returns the number of channels (rows of the power matrix).
    pub fn num_channels(&self) -> usize {
        self.power.nrows()
    }

    /// Returns the number of frames (columns of the power matrix).
    pub fn num_frames(&self) -> usize {
        self.power.ncols()
    }

    /// Converts the power matrix to decibels, clamping to `floor_db`.
    ///
    /// Zero power maps to `floor_db` rather than negative infinity, so the
    /// result is always finite and safe to plot. The clamp applies to every
    /// value, unlike the per-element
    /// [`power_to_db`](crate::utils::audio_math::power_to_db), which
    /// substitutes a fixed -80 dB for non-positive input only.
    ///
    /// # Arguments
    /// * `floor_db` - Lower bound of the returned values, e.g. `-80.0`
    ///
    /// # Examples
    /// ```rust
    /// use cochleagram::{CochleagramConfig, Signal};
    /// use cochleagram::utils::generation::sine_wave;
    /// use std::time::Duration;
    ///
    /// let tone = sine_wave(1000.0_f64, Duration::from_millis(100), 8000.0, 1.0);
    /// let signal = Signal::new(tone, 8000.0).unwrap();
    /// let output = signal.cochleagram(&CochleagramConfig::default()).unwrap();
    /// let db = output.to_db(-80.0);
    /// assert!(db.iter().all(|&v| (-80.0..=100.0).contains(&v)));
    /// ```
    pub fn to_db(&self, floor_db: F) -> Array2<F> {
        let ten = to_precision::<F, _>(10.0);
        self.power.mapv(|p| {
            if p > F::zero() {
                (ten * p.log10()).max(floor_db)
            } else {
                floor_db
            }
        })
    }

    /// Returns the index of the channel whose center frequency is nearest
    /// to `frequency` on the ERB-rate scale, or `None` if there are no
    /// channels.
    pub fn channel_nearest(&self, frequency: F) -> Option<usize> {
        let rate = hz_to_erb_rate(frequency);
        self.channel_frequencies
            .iter()
            .enumerate()
            .min_by(|a, b| {
                let da = (hz_to_erb_rate(*a.1) - rate).abs();
                let db = (hz_to_erb_rate(*b.1) - rate).abs();
                da.partial_cmp(&db).unwrap_or(core::cmp::Ordering::Equal)
            })
            .map(|(chan, _)| chan)
    }

    /// Consumes the cochleagram and returns `(power, channel_frequencies,
    /// times)`.
    pub fn into_parts(self) -> (Array2<F>, Array1<F>, Array1<F>) {
        (self.power, self.channel_frequencies, self.times)
    }
}

// ===== PIPELINE =====

/// Computes the cochleagram of a signal.
///
/// Equivalent to [`Signal::cochleagram`]. The stages are: resolve the
/// configuration, design the analysis window, build the kernel bank, frame
/// the signal around the window's energy centroid, take one-sided power
/// spectra, and pool bins into channels with one matrix product.
///
/// # Arguments
/// * `signal` - The signal to analyze
/// * `config` - Analysis parameters; `CochleagramConfig::default()` gives
///   the standard ERB-spaced layout
///
/// # Errors
/// Returns an error if the configuration is invalid for the signal's
/// sample rate, or if a channel's bandwidth is too narrow for the analysis
/// window (see [`ErbKernelBank::build`]).
pub fn compute<F: RealFloat>(
    signal: &Signal<F>,
    config: &CochleagramConfig<F>,
) -> CochleagramResult<Cochleagram<F>> {
    let params = config::resolve(config, signal.sample_rate())?;
    let window = AnalysisWindow::design(signal.sample_rate())?;

    // Build the kernel bank up front so invalid channel layouts fail
    // before any spectral work
    let bin_frequencies =
        fft_bin_frequencies(window.len(), signal.sample_rate(), window.len() / 2);
    let kernels = ErbKernelBank::build(
        params.channel_frequencies.clone(),
        bin_frequencies,
        window.shape_parameter(),
        params.bandwidth_factor,
    )?;

    let (frames, starts) = framing::frame_signal_aligned(signal, &window, params.hop_samples);
    let times = starts
        .iter()
        .map(|&start| to_precision::<F, _>(start) / signal.sample_rate())
        .collect::<Array1<F>>();

    let spectra = spectrum::power_spectra(frames, window.values());
    let power = kernels.weights().t().dot(&spectra);

    debug!(
        target: "cochleagram::analysis",
        num_channels = power.nrows(),
        num_frames = power.ncols(),
        window_size = window.len(),
        "computed cochleagram"
    );

    Ok(Cochleagram {
        power,
        channel_frequencies: params.channel_frequencies,
        times,
    })
}
