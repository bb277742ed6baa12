//! One-dimensional signal representation for cochleagram analysis.
//!
//! A [`Signal`] pairs a sample vector with a validated sampling rate. The
//! sampling rate is required at construction time; every downstream stage
//! of the analysis derives its timing from it.

use ndarray::{Array1, Array2};

use crate::analysis::{Cochleagram, CochleagramConfig};
use crate::{CochleagramError, CochleagramResult, RealFloat, to_precision};

/// A mono audio signal with a validated sampling rate.
///
/// Construction fails if the sampling rate is not a positive finite
/// number. Genuinely two-dimensional input is rejected; the only
/// accommodation is [`Signal::from_matrix`], which flattens a single-row
/// or single-column matrix.
///
/// # Examples
///
/// ```rust
/// use cochleagram::Signal;
/// use ndarray::array;
///
/// let signal = Signal::new(array![0.0f64, 0.5, -0.5, 0.25], 44100.0).unwrap();
/// assert_eq!(signal.len(), 4);
/// assert!(Signal::new(array![0.0f64], -1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signal<F: RealFloat> {
    samples: Array1<F>,
    sample_rate: F,
}

impl<F: RealFloat> Signal<F> {
    /// Creates a signal from a sample vector and a sampling rate in Hz.
    ///
    /// # Errors
    /// Returns [`CochleagramError::InvalidParameter`] if the sampling rate
    /// is not a positive finite number.
    pub fn new(samples: Array1<F>, sample_rate: F) -> CochleagramResult<Self> {
        if !sample_rate.is_finite() || sample_rate <= F::zero() {
            return Err(CochleagramError::InvalidParameter(format!(
                "sample_rate must be positive and finite, got {}",
                sample_rate.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Creates a signal by flattening a single-row or single-column matrix.
    ///
    /// # Errors
    /// Returns [`CochleagramError::DimensionMismatch`] if the matrix has
    /// more than one row and more than one column, and
    /// [`CochleagramError::InvalidParameter`] if the sampling rate is not
    /// a positive finite number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cochleagram::Signal;
    /// use ndarray::array;
    ///
    /// let column = array![[1.0f64], [2.0], [3.0]];
    /// let signal = Signal::from_matrix(&column, 8000.0).unwrap();
    /// assert_eq!(signal.len(), 3);
    ///
    /// let square = array![[1.0f64, 2.0], [3.0, 4.0]];
    /// assert!(Signal::from_matrix(&square, 8000.0).is_err());
    /// ```
    pub fn from_matrix(matrix: &Array2<F>, sample_rate: F) -> CochleagramResult<Self> {
        let (rows, cols) = matrix.dim();
        let samples = if rows == 1 {
            matrix.row(0).to_owned()
        } else if cols == 1 {
            matrix.column(0).to_owned()
        } else {
            return Err(CochleagramError::DimensionMismatch(format!(
                "signal must be one-dimensional or a single-row/single-column matrix, got {rows}x{cols}"
            )));
        };
        Self::new(samples, sample_rate)
    }

    /// Returns the sample vector.
    pub const fn samples(&self) -> &Array1<F> {
        &self.samples
    }

    /// Returns the sampling rate in Hz.
    pub const fn sample_rate(&self) -> F {
        self.sample_rate
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the duration in seconds.
    pub fn duration(&self) -> F {
        to_precision::<F, _>(self.len()) / self.sample_rate
    }

    /// Computes the cochleagram of this signal.
    ///
    /// This is the main entry point of the crate: the signal is framed,
    /// windowed, transformed to one-sided power spectra, and projected onto
    /// an ERB-spaced gammatone kernel bank. See [`CochleagramConfig`] for
    /// the tunable parameters and their defaults.
    ///
    /// # Errors
    /// Propagates parameter validation errors from the configuration and
    /// bandwidth-domain errors from the kernel bank construction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cochleagram::{CochleagramConfig, Signal};
    /// use cochleagram::utils::generation::sine_wave;
    /// use std::time::Duration;
    ///
    /// let tone = sine_wave::<f64>(1000.0, Duration::from_millis(100), 8000.0, 1.0);
    /// let signal = Signal::new(tone, 8000.0).unwrap();
    /// let result = signal.cochleagram(&CochleagramConfig::default()).unwrap();
    ///
    /// assert_eq!(result.power().nrows(), result.channel_frequencies().len());
    /// assert_eq!(result.power().ncols(), result.times().len());
    /// ```
    pub fn cochleagram(&self, config: &CochleagramConfig<F>) -> CochleagramResult<Cochleagram<F>> {
        crate::analysis::compute(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use ndarray::array;

    #[test]
    fn test_new_accepts_valid_rate() {
        let signal = Signal::new(array![0.0f64, 1.0, -1.0], 44100.0).unwrap();
        assert_eq!(signal.len(), 3);
        assert!(!signal.is_empty());
        assert_eq!(signal.sample_rate(), 44100.0);
    }

    #[test]
    fn test_new_rejects_invalid_rates() {
        for rate in [0.0f64, -44100.0, f64::NAN, f64::INFINITY] {
            let result = Signal::new(array![0.0f64, 1.0], rate);
            assert!(matches!(
                result,
                Err(CochleagramError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_from_matrix_flattens_row_and_column() {
        let row = array![[1.0f64, 2.0, 3.0]];
        let from_row = Signal::from_matrix(&row, 8000.0).unwrap();
        assert_eq!(from_row.samples().to_vec(), vec![1.0, 2.0, 3.0]);

        let column = array![[1.0f64], [2.0], [3.0]];
        let from_column = Signal::from_matrix(&column, 8000.0).unwrap();
        assert_eq!(from_column.samples().to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_matrix_rejects_two_dimensional_input() {
        let square = array![[1.0f64, 2.0], [3.0, 4.0]];
        let result = Signal::from_matrix(&square, 8000.0);
        assert!(matches!(
            result,
            Err(CochleagramError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_duration() {
        let signal = Signal::new(Array1::<f64>::zeros(22050), 44100.0).unwrap();
        assert_approx_eq!(signal.duration(), 0.5, 1e-12);
    }

    #[test]
    fn test_empty_signal_is_allowed() {
        let signal = Signal::new(Array1::<f32>::zeros(0), 8000.0).unwrap();
        assert!(signal.is_empty());
        assert_eq!(signal.duration(), 0.0);
    }
}
