//! # Pricer Models (L2: Closed-Form Models)
//!
//! Analytical option prices under Black-Scholes dynamics.
//!
//! This crate provides:
//! - European call/put prices and Greeks
//! - Single-barrier options (all eight up/down, in/out, call/put variants)
//! - Floating-strike lookback options
//! - Geometric average Asian options
//! - A single [`analytical::price_closed_form`] entry point
//!
//! ## Design Principles
//!
//! - **Generic formulas** over `num_traits::Float`
//! - **Enum-based instruments** for static dispatch
//! - **Shared error taxonomy** from `pricer_core`
//!
//! The Monte Carlo and lattice engines in `pricer_pricing` are validated
//! against the prices computed here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
