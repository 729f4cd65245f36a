//! # Random Number Generation
//!
//! Seeded pseudo-random number generation for the Monte Carlo engine.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is seeded; a base seed plus a
//!   stream index fully determines the draws of one simulation block
//! - **Independence**: each block owns its [`PricerRng`], derived with
//!   [`stream_seed`], so parallel workers never share generator state
//! - **Efficiency**: batch generation into caller-owned `&mut [f64]` buffers
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! // Generator for block 3 of a run seeded with 12345
//! let mut rng = PricerRng::for_stream(12345, 3);
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::{fresh_seed, stream_seed, PricerRng};
