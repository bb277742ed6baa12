//! Centroid-aligned framing of the input signal.
//!
//! The signal is zero-padded so that the analysis window's energy
//! centroid falls exactly on each nominal analysis instant: the front pad
//! equals the centroid offset, the back pad fills the window's remainder.
//! With that padding in place, the start index of frame `i` inside the
//! padded signal equals the frame's analysis instant in the original
//! signal, so the start indices double as the output time reference.

use ndarray::{Array1, Array2, s};
use tracing::debug;

use crate::analysis::window::AnalysisWindow;
use crate::utils::audio_math::frame_signal;
use crate::{RealFloat, Signal};

/// Pads the signal around the window's energy centroid and slices it into
/// overlapping frames of the window's length.
///
/// Returns the frame matrix (window length x frame count) and the
/// per-frame analysis instants in samples. A signal of `n` samples always
/// yields `n / hop + 1` frames, including a single all-padding frame for
/// an empty signal.
pub(crate) fn frame_signal_aligned<F: RealFloat>(
    signal: &Signal<F>,
    window: &AnalysisWindow<F>,
    hop: usize,
) -> (Array2<F>, Vec<usize>) {
    let wsize = window.len();
    let offset = window.centroid_offset();

    let mut padded = Array1::zeros(signal.len() + wsize);
    padded
        .slice_mut(s![offset..offset + signal.len()])
        .assign(signal.samples());

    let (frames, starts) = frame_signal(&padded, wsize, hop);
    debug!(
        target: "cochleagram::analysis",
        num_frames = frames.ncols(),
        window_size = wsize,
        hop,
        centroid_offset = offset,
        "framed signal"
    );
    (frames, starts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn test_signal(len: usize, sample_rate: f64) -> Signal<f64> {
        let samples = Array1::from_iter((0..len).map(|i| (i + 1) as f64));
        Signal::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_frame_count_follows_hop() {
        let window = AnalysisWindow::<f64>::design(8000.0).unwrap();
        let hop = 80;

        // floor(n / hop) + 1 frames regardless of the window length
        for n in [0usize, 1, 79, 80, 81, 800] {
            let signal = test_signal(n, 8000.0);
            let (frames, starts) = frame_signal_aligned(&signal, &window, hop);
            let expected = n / hop + 1;
            assert_eq!(frames.ncols(), expected, "n = {n}");
            assert_eq!(starts.len(), expected);
            assert_eq!(frames.nrows(), window.len());
        }
    }

    #[test]
    fn test_starts_are_hop_multiples() {
        let window = AnalysisWindow::<f64>::design(8000.0).unwrap();
        let signal = test_signal(400, 8000.0);
        let (_, starts) = frame_signal_aligned(&signal, &window, 100);
        assert_eq!(starts, vec![0, 100, 200, 300, 400]);
    }

    #[test]
    fn test_first_frame_aligns_signal_on_centroid() {
        let window = AnalysisWindow::<f64>::design(8000.0).unwrap();
        let offset = window.centroid_offset();
        let signal = test_signal(600, 8000.0);
        let (frames, _) = frame_signal_aligned(&signal, &window, 80);

        let first = frames.column(0);
        // Leading pad is zero up to the centroid offset
        assert!(first.iter().take(offset).all(|&v| v == 0.0));
        // The signal starts exactly at the centroid offset
        assert_eq!(first[offset], 1.0);
        assert_eq!(first[offset + 1], 2.0);
    }

    #[test]
    fn test_empty_signal_yields_one_zero_frame() {
        let window = AnalysisWindow::<f64>::design(8000.0).unwrap();
        let signal = Signal::new(Array1::<f64>::zeros(0), 8000.0).unwrap();
        let (frames, starts) = frame_signal_aligned(&signal, &window, 80);

        assert_eq!(frames.dim(), (window.len(), 1));
        assert_eq!(starts, vec![0]);
        assert!(frames.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_trailing_pad_completes_last_frame() {
        let window = AnalysisWindow::<f64>::design(8000.0).unwrap();
        let wsize = window.len();
        let offset = window.centroid_offset();
        let n = 160;
        let signal = test_signal(n, 8000.0);
        let (frames, starts) = frame_signal_aligned(&signal, &window, 80);

        // Last frame starts at n and still spans a full window thanks to
        // the back pad of (wsize - offset) zeros
        let last_start = *starts.last().unwrap();
        assert_eq!(last_start, n);
        let last = frames.column(frames.ncols() - 1);
        assert_eq!(last.len(), wsize);
        // Signal samples remaining in the last frame: the tail past the
        // final analysis instant, shifted by the centroid offset
        assert_eq!(last[offset - 80], 81.0);
    }
}
