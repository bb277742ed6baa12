//! Windowed one-sided power spectra.
//!
//! Each frame column is weighted by the analysis window, transformed with
//! an FFT, and reduced to its one-sided power spectrum: the squared
//! magnitudes of the first `window_size / 2` bins. The DC bin is kept,
//! the Nyquist bin and the negative-frequency half are discarded; their
//! energy is redundant for the real-valued input the kernel bank weights.

use ndarray::{Array1, Array2, Axis};
use num_complex::Complex;
use rustfft::FftPlanner;

use crate::RealFloat;

/// Consumes the frame matrix and returns the one-sided power spectrum of
/// every windowed frame, `window_size / 2` bins per column.
pub(crate) fn power_spectra<F: RealFloat>(frames: Array2<F>, window: &Array1<F>) -> Array2<F> {
    debug_assert_eq!(frames.nrows(), window.len());

    let window_size = frames.nrows();
    let num_frames = frames.ncols();
    let num_bins = window_size / 2;

    // Broadcast the window down every frame column
    let windowed = frames * &window.view().insert_axis(Axis(1));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(window_size);

    let mut power = Array2::zeros((num_bins, num_frames));

    #[cfg(not(feature = "parallel"))]
    for (frame_idx, frame) in windowed.axis_iter(Axis(1)).enumerate() {
        let mut buffer: Vec<Complex<F>> = frame
            .iter()
            .map(|&value| Complex::new(value, F::zero()))
            .collect();
        fft.process(&mut buffer);

        for (bin, value) in buffer.iter().take(num_bins).enumerate() {
            power[[bin, frame_idx]] = value.norm_sqr();
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let columns: Vec<Vec<F>> = windowed
            .axis_iter(Axis(1))
            .map(|frame| frame.to_vec())
            .collect();
        let spectra: Vec<Vec<F>> = columns
            .par_iter()
            .map(|frame| {
                let mut buffer: Vec<Complex<F>> = frame
                    .iter()
                    .map(|&value| Complex::new(value, F::zero()))
                    .collect();
                fft.process(&mut buffer);
                buffer.iter().take(num_bins).map(Complex::norm_sqr).collect()
            })
            .collect();

        for (frame_idx, column) in spectra.iter().enumerate() {
            for (bin, &value) in column.iter().enumerate() {
                power[[bin, frame_idx]] = value;
            }
        }
    }

    power
}
