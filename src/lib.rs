// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms
// #![warn(clippy::unreachable)] // Detects unreachable code

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::box_collection)] // Warns on boxed `Vec`, `String`, etc.
#![warn(clippy::vec_box)] // Avoids using `Vec<Box<T>>` when unnecessary
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release

//! # Cochleagram
//!
//! An auditory time-frequency transform for Rust: power spectrograms whose
//! channels are spaced and weighted like the frequency analysis of the
//! human cochlea, computed with gammatone windows and kernels over an FFT.
//!
//! ## Overview
//!
//! A cochleagram is the auditory cousin of the spectrogram. Instead of
//! uniformly spaced FFT bins, its channels sit at equal intervals on the
//! ERB-rate scale (ERB: equivalent rectangular bandwidth of the auditory
//! filter), so low frequencies get fine resolution and high frequencies
//! get wide, smooth channels. Each channel is the output power of a
//! 4th-order gammatone filter, the standard model of cochlear frequency
//! selectivity.
//!
//! The implementation runs one short-window FFT analysis and pools bins
//! into channels with a precomputed kernel matrix, which is far cheaper
//! than running a filterbank sample by sample. The analysis window is
//! itself gammatone-shaped and acts as part of every channel's filter;
//! each kernel is narrowed accordingly so that the combination approximates
//! the intended auditory bandwidth.
//!
//! ## Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cochleagram = "0.1.0"
//! ```
//!
//! or more easily with:
//! ```bash
//! cargo add cochleagram
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use cochleagram::{CochleagramConfig, Signal, sine_wave};
//! use std::time::Duration;
//!
//! // 250 ms of a 1 kHz tone at a 16 kHz sample rate
//! let tone = sine_wave(1000.0_f64, Duration::from_millis(250), 16000.0, 1.0);
//! let signal = Signal::new(tone, 16000.0).unwrap();
//!
//! let output = signal.cochleagram(&CochleagramConfig::default()).unwrap();
//!
//! // 63 ERB-spaced channels, one frame every 10 ms
//! assert_eq!(output.num_channels(), 63);
//! assert_eq!(output.power().ncols(), output.times().len());
//!
//! // Log-compressed view for display
//! let db = output.to_db(-80.0);
//! assert_eq!(db.dim(), output.power().dim());
//! ```
//!
//! ## Configuration
//!
//! [`CochleagramConfig`] covers the three knobs of the transform: the
//! channel layout, the hop between analysis instants, and a bandwidth
//! scale factor.
//!
//! ```rust
//! use cochleagram::{CochleagramConfig, Signal, sine_wave};
//! use std::time::Duration;
//!
//! let config = CochleagramConfig::default()
//!     .with_channel_frequencies(vec![250.0, 500.0, 1000.0, 2000.0])
//!     .with_hop_size(0.005);
//!
//! let tone = sine_wave(500.0_f64, Duration::from_millis(100), 16000.0, 0.5);
//! let output = Signal::new(tone, 16000.0)
//!     .unwrap()
//!     .cochleagram(&config)
//!     .unwrap();
//!
//! assert_eq!(output.num_channels(), 4);
//! assert_eq!(output.channel_nearest(500.0), Some(1));
//! ```
//!
//! ## Features
//!
//! - `parallel`: computes the per-frame power spectra in parallel using
//!   `rayon`. Worthwhile for long signals at small hop sizes.
//!
//! ## Error Handling
//!
//! All fallible operations return [`CochleagramResult`]; the variants of
//! [`CochleagramError`] separate parameter problems from shape problems
//! and from bandwidths the analysis window cannot support:
//!
//! ```rust
//! use cochleagram::{CochleagramConfig, CochleagramError, Signal};
//! use ndarray::Array1;
//!
//! let signal = Signal::new(Array1::<f64>::zeros(160), 16000.0).unwrap();
//! let config = CochleagramConfig::default().with_hop_size(-0.01);
//!
//! match signal.cochleagram(&config) {
//!     Err(CochleagramError::InvalidParameter(message)) => {
//!         assert!(message.contains("hop_size"));
//!     }
//!     other => panic!("expected an invalid parameter error, got {other:?}"),
//! }
//! ```
//!
//! ## Precision
//!
//! The whole pipeline is generic over [`RealFloat`], so every operation is
//! available in both `f32` and `f64`. Use `f32` when the cochleagram feeds
//! a model or a display; use `f64` when you care about the last digits of
//! the channel calibration.
//!
//! ## Documentation
//!
//! Full API documentation is available at
//! [docs.rs/cochleagram](https://docs.rs/cochleagram).
//!
//! ## License
//!
//! MIT License
//!
//! ## Contributing
//!
//! Contributions are welcome! Please feel free to submit a Pull Request.

mod error;
mod signal;

pub mod analysis;
pub mod utils;

pub use crate::analysis::{
    AnalysisWindow, Cochleagram, CochleagramConfig, ErbKernelBank,
};
pub use crate::error::{CochleagramError, CochleagramResult};
pub use crate::signal::Signal;
pub use crate::utils::{
    audio_math::{
        db_to_power, erb, erb_rate_to_hz, erb_space, fft_bin_frequencies, gammatone_window,
        hz_to_erb_rate, power_to_db,
    },
    generation::{silence, sine_wave},
};

use ndarray::{LinalgScalar, ScalarOperand};
use num_traits::{Float, FloatConst, NumCast};
use rustfft::FftNum;

/// Marker trait for real floating-point types (f32, f64).
///
/// Bundles the numeric, FFT, and linear-algebra bounds the analysis
/// pipeline relies on, so generic signatures stay short.
pub trait RealFloat: Float + FloatConst + NumCast + FftNum + LinalgScalar + ScalarOperand {}

impl RealFloat for f32 {}
impl RealFloat for f64 {}

/// Casts a numeric value into the target floating-point type `F`.
///
/// This function provides a *transparent* conversion mechanism for numeric
/// values (`T`) into a chosen target type (`F`), typically `f32` or `f64`.
///
/// Internally it uses `num_traits::NumCast::from` and will **panic** if the
/// cast is not representable by the target type (e.g. out-of-range values,
/// or non-finite floats when converting to an integer type).
///
/// The main purpose is to **abstract over floating-point precision**
/// in generic code where the target type `F: RealFloat` may vary.
/// This enables you to write a single numeric implementation that
/// automatically adapts to either `f32` or `f64` precision without
/// explicit `as` conversions.
///
/// # Arguments
/// * `value` - The numeric value to convert to the target floating-point type
///
/// # Returns
/// The input value converted to the target floating-point type `F`.
///
/// # Behaviour
/// - Uses `NumCast::from(value)`.
/// - Panics if the conversion fails.
///
/// In practice, if `F` and `T` are the same type (e.g. `f32 → f32`),
/// this operation is a **compile-time no-op** with no runtime overhead.
///
/// # Examples
/// ```
/// use cochleagram::to_precision;
///
/// let value_i32 = 42i32;
/// let value_f32: f32 = to_precision(value_i32);
/// assert_eq!(value_f32, 42.0);
///
/// let value_f64: f64 = to_precision(value_i32);
/// assert_eq!(value_f64, 42.0);
/// ```
///
/// # Panics
/// Panics if the numeric conversion fails.
#[inline(always)]
pub fn to_precision<F, T>(value: T) -> F
where
    F: RealFloat + NumCast,
    T: NumCast,
{
    NumCast::from(value).expect("safe_cast: valid numeric conversion")
}
