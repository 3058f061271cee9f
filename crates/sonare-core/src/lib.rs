//! Sonare Core - FIR design and application for digital audio
//!
//! This crate designs filter coefficients, applies them to sample buffers,
//! converts sample rates by oversampling and decimation, and moves samples
//! between interleaved and per-channel layouts. Everything is a synchronous
//! transform over caller-owned buffers.
//!
//! # Pipeline
//!
//! ```text
//! designer → (window) → coefficients → ConvolutionFilter → filtered buffer
//!                    └──────── Oversampler wraps both ────────┘
//! ```
//!
//! ## Designers
//!
//! - [`LowPass`] - Windowed-sinc low-pass kernel, with [`transition_delta`]
//! - [`Comb`] - Fractional-delay tap comb
//! - [`Resonator`] - Gaussian-enveloped sinusoid bank
//!
//! All implement [`ImpulseResponse`].
//!
//! ## Windows
//!
//! - [`Window`] - Rectangular, Hann, Hamming, Blackman, Nuttall
//! - [`blackman`] - Shortcut used by the oversampler
//!
//! ## Application
//!
//! - [`ConvolutionFilter`] - Streaming FIR convolution, mono or interleaved stereo
//! - [`Oversampler`] - Anti-aliasing low-pass plus decimation
//! - [`expand`] / [`Expansion`] - Zero-stuff or sample-and-hold rate expansion
//!
//! ## Layout
//!
//! - [`channel`] - `split`, `join`, `interleave`, `deinterleave` and friends
//! - [`Channels`] - Mono or stereo interleaving
//! - [`ReverseBytes`] - Conditional byte swapping for binary I/O layers
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sonare-core = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to get debug events whenever a designer,
//! engine or oversampler is configured.
//!
//! # Example
//!
//! ```rust
//! use sonare_core::{Channels, ConvolutionFilter, ImpulseResponse, LowPass, Window};
//!
//! let mut taps = LowPass::new(48000.0, 2000.0).unwrap().generate(64).unwrap();
//! Window::Blackman.apply(&mut taps);
//!
//! let mut filter = ConvolutionFilter::new(Channels::Stereo, &taps).unwrap();
//! let mut buffer = vec![0.0; 256];
//! buffer[0] = 1.0;
//! filter.filtering(&mut buffer).unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod byte_order;
pub mod channel;
pub mod convolution;
pub mod design;
pub mod error;
pub mod oversample;
pub mod window;

// Re-export main types at crate root
pub use byte_order::ReverseBytes;
pub use channel::Channels;
pub use convolution::ConvolutionFilter;
pub use design::{Comb, ImpulseResponse, LowPass, Resonator, transition_delta};
pub use error::{DspError, Result};
pub use oversample::{Expansion, Oversampler, expand};
pub use window::{Window, blackman};
