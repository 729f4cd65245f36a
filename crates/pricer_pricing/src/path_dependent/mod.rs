//! Path-dependent payoffs for the Monte Carlo engine.
//!
//! # Key Components
//!
//! - [`PathObserver`]: streaming statistics accumulated along one path
//! - [`PathDependentPayoff`]: payoff computed from those statistics
//! - [`PathPayoff`]: enum over the barrier, lookback and Asian payoffs
//! - [`Monitoring`]: discrete or continuity-corrected barrier observation
//!
//! Paths are never stored: the simulation core feeds each price into an
//! observer and hands the observer to the payoff once the path is complete.

mod asian;
mod barrier;
mod lookback;
mod observer;
mod payoff;

pub use asian::{AsianPayoff, Averaging};
pub use barrier::BarrierPayoff;
pub use lookback::LookbackPayoff;
pub use observer::PathObserver;
pub use payoff::{Monitoring, PathDependentPayoff, PathPayoff, BGK_BETA};
