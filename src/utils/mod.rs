//! Utility functions for cochleagram analysis.
//!
//! This module provides a collection of numeric helpers that make the
//! auditory-scale analysis convenient to build and test.
//!
//! # Modules
//!
//! - [`audio_math`] - ERB-scale conversions, window and framing helpers
//! - [`generation`] - Reference signal generation utilities

pub mod audio_math;
pub mod generation;

// Re-export common utilities
pub use audio_math::*;
pub use generation::*;
