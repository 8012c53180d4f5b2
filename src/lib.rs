//! Closed-form damped harmonic oscillator ("spring") simulation.
//!
//! Each step advances position and velocity with four coefficients that solve the
//! spring equation exactly over `dt`, so large time steps never blow up the way
//! explicit integration does.
//!
//! ```
//! use damped_spring::{advance, OscillatorParameters, OscillatorState};
//!
//! let params = OscillatorParameters::new(10., 1., 0.);
//! let mut state = OscillatorState::at_rest(1.);
//! let position = advance(&params, &mut state, 0.1);
//! assert!((position - 0.7358).abs() < 1.0e-4);
//! ```
//!
//! Build with the `python` feature for the `damped_spring` Python extension module.

#[cfg(feature = "python")]
#[macro_use]
extern crate cpython;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

pub mod cache;
pub mod coefficients;
pub mod coordinate;
pub mod oscillator;
pub mod settle;
pub mod spring;
pub mod spring_config;
pub mod trajectory;
pub mod vector_oscillator;

#[cfg(feature = "python")]
mod python;

pub use cache::CoefficientCache;
pub use coefficients::{Regime, SpringCoefficients, EPSILON};
pub use coordinate::Coordinate;
pub use oscillator::Oscillator;
pub use settle::{from_settle_duration, parameters_for_settle_duration};
pub use spring::{advance, is_settled, step, OscillatorParameters, OscillatorState, SETTLE_VELOCITY};
pub use spring_config::SpringConfig;
pub use trajectory::{FramePosition, TrackedObject, Trajectory};
pub use vector_oscillator::VectorOscillator;
