//! Analysis configuration and parameter resolution.
//!
//! [`CochleagramConfig`] is the plain-data parameter set of the transform;
//! every field has a documented default. Resolution turns it into the
//! validated, fully concrete values the pipeline runs on: an explicit
//! channel-frequency array, a hop in whole samples, and a checked
//! bandwidth factor.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::audio_math::{erb, erb_space, hz_to_erb_rate};
use crate::{CochleagramError, CochleagramResult, RealFloat, to_precision};

/// Configuration for cochleagram analysis.
///
/// All parameters are optional in spirit: [`Default`] fills every field
/// with the standard analysis values, and the builder methods override
/// them selectively.
///
/// # Examples
///
/// ```rust
/// use cochleagram::CochleagramConfig;
///
/// let config = CochleagramConfig::<f64>::default()
///     .with_hop_size(0.005)
///     .with_bandwidth_factor(1.5);
/// assert_eq!(config.hop_size, 0.005);
/// assert!(config.channel_frequencies.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CochleagramConfig<F: RealFloat> {
    /// Center frequencies of the analysis channels in Hz.
    ///
    /// `None` selects the default layout: channels spaced at half-ERB
    /// intervals from 30 Hz up to `min(16000, nyquist - ERB(nyquist)/2)`.
    pub channel_frequencies: Option<Vec<F>>,

    /// Interval between analysis instants in seconds (default 0.01).
    pub hop_size: F,

    /// Scale factor on every channel's bandwidth (default 1.0).
    ///
    /// Values above 1 widen the auditory filters; values below 1 narrow
    /// them and may be rejected for low channels whose resulting bandwidth
    /// falls under the analysis window's own bandwidth.
    pub bandwidth_factor: F,
}

impl<F: RealFloat> Default for CochleagramConfig<F> {
    fn default() -> Self {
        Self {
            channel_frequencies: None,
            hop_size: to_precision::<F, _>(0.01),
            bandwidth_factor: F::one(),
        }
    }
}

impl<F: RealFloat> CochleagramConfig<F> {
    /// Creates a configuration with the default analysis values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets explicit channel center frequencies in Hz.
    pub fn with_channel_frequencies(mut self, frequencies: Vec<F>) -> Self {
        self.channel_frequencies = Some(frequencies);
        self
    }

    /// Sets the hop size in seconds.
    pub fn with_hop_size(mut self, hop_size: F) -> Self {
        self.hop_size = hop_size;
        self
    }

    /// Sets the bandwidth scale factor.
    pub fn with_bandwidth_factor(mut self, bandwidth_factor: F) -> Self {
        self.bandwidth_factor = bandwidth_factor;
        self
    }
}

/// Fully validated analysis parameters, ready for the pipeline.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedParameters<F: RealFloat> {
    /// Channel center frequencies in Hz.
    pub(crate) channel_frequencies: Array1<F>,
    /// Hop between analysis instants in whole samples (>= 1).
    pub(crate) hop_samples: usize,
    /// Validated bandwidth scale factor.
    pub(crate) bandwidth_factor: F,
}

/// Validates a configuration against a sampling rate and fills defaults.
pub(crate) fn resolve<F: RealFloat>(
    config: &CochleagramConfig<F>,
    sample_rate: F,
) -> CochleagramResult<ResolvedParameters<F>> {
    if !config.hop_size.is_finite() || config.hop_size <= F::zero() {
        return Err(CochleagramError::InvalidParameter(format!(
            "hop_size must be positive and finite, got {}",
            config.hop_size.to_f64().unwrap_or(f64::NAN)
        )));
    }
    let hop_samples = (config.hop_size * sample_rate)
        .round()
        .to_usize()
        .ok_or_else(|| {
            CochleagramError::InvalidParameter(format!(
                "hop_size {} s is not representable in samples at {} Hz",
                config.hop_size.to_f64().unwrap_or(f64::NAN),
                sample_rate.to_f64().unwrap_or(f64::NAN)
            ))
        })?;
    if hop_samples == 0 {
        return Err(CochleagramError::InvalidParameter(format!(
            "hop_size {} s is shorter than one sample period at {} Hz",
            config.hop_size.to_f64().unwrap_or(f64::NAN),
            sample_rate.to_f64().unwrap_or(f64::NAN)
        )));
    }

    if !config.bandwidth_factor.is_finite() || config.bandwidth_factor <= F::zero() {
        return Err(CochleagramError::InvalidParameter(format!(
            "bandwidth_factor must be positive and finite, got {}",
            config.bandwidth_factor.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let channel_frequencies = match &config.channel_frequencies {
        Some(frequencies) => {
            if frequencies.is_empty() {
                return Err(CochleagramError::InvalidParameter(
                    "channel_frequencies must not be empty".to_string(),
                ));
            }
            for (index, &freq) in frequencies.iter().enumerate() {
                if !freq.is_finite() || freq <= F::zero() {
                    return Err(CochleagramError::InvalidParameter(format!(
                        "channel frequencies must be positive and finite, got {} at index {index}",
                        freq.to_f64().unwrap_or(f64::NAN)
                    )));
                }
            }
            Array1::from_vec(frequencies.clone())
        }
        None => default_channel_frequencies(sample_rate)?,
    };

    debug!(
        target: "cochleagram::analysis",
        num_channels = channel_frequencies.len(),
        hop_samples,
        bandwidth_factor = config.bandwidth_factor.to_f64().unwrap_or(f64::NAN),
        "resolved analysis parameters"
    );

    Ok(ResolvedParameters {
        channel_frequencies,
        hop_samples,
        bandwidth_factor: config.bandwidth_factor,
    })
}

/// Builds the default channel layout for a sampling rate.
///
/// Channels are spaced at half-ERB intervals from 30 Hz up to
/// `min(16000, nyquist - ERB(nyquist)/2)`, keeping the highest channel's
/// filter comfortably inside the representable band.
pub(crate) fn default_channel_frequencies<F: RealFloat>(
    sample_rate: F,
) -> CochleagramResult<Array1<F>> {
    let two = to_precision::<F, _>(2.0);
    let low = to_precision::<F, _>(30.0);
    let nyquist = sample_rate / two;
    let high = to_precision::<F, _>(16000.0).min(nyquist - erb(nyquist) / two);

    if high <= low {
        return Err(CochleagramError::InvalidParameter(format!(
            "sample_rate {} Hz is too low for the default channel layout; supply channel_frequencies explicitly",
            sample_rate.to_f64().unwrap_or(f64::NAN)
        )));
    }

    // Half-ERB spacing: two channels per ERB-rate unit across the band.
    let count = (two * (hz_to_erb_rate(high) - hz_to_erb_rate(low)))
        .round()
        .to_usize()
        .unwrap_or(1)
        .max(1);

    Ok(erb_space(low, high, count))
}
