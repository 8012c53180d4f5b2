use std::fmt;

use crate::coefficients::{Regime, SpringCoefficients};

/// Absolute velocity below which an oscillator counts as settled.
pub const SETTLE_VELOCITY: f64 = 0.01;

/// Position and velocity of one animated scalar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OscillatorState {
    pub position: f64,
    pub velocity: f64,
}

impl OscillatorState {
    pub fn new(position: f64, velocity: f64) -> Self {
        OscillatorState { position, velocity }
    }

    pub fn at_rest(position: f64) -> Self {
        Self::new(position, 0.)
    }
}

impl fmt::Display for OscillatorState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "OscillatorState position: {}, velocity: {}",
            self.position, self.velocity
        )
    }
}

/// Physical parameters of a spring and the equilibrium it pulls toward.
///
/// The equilibrium may move between steps; each step measures the offset afresh.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OscillatorParameters {
    pub angular_frequency: f64, // rad/s
    pub damping_ratio: f64,
    pub equilibrium: f64,
}

impl OscillatorParameters {
    /// Negative frequency or damping is clamped to zero.
    pub fn new(angular_frequency: f64, damping_ratio: f64, equilibrium: f64) -> Self {
        OscillatorParameters {
            angular_frequency: angular_frequency.max(0.),
            damping_ratio: damping_ratio.max(0.),
            equilibrium,
        }
    }

    pub fn with_equilibrium(self, equilibrium: f64) -> Self {
        OscillatorParameters {
            equilibrium,
            ..self
        }
    }

    pub fn regime(&self) -> Regime {
        Regime::classify(self.angular_frequency, self.damping_ratio)
    }

    pub fn coefficients(&self, dt: f64) -> SpringCoefficients {
        SpringCoefficients::derive(dt, self.angular_frequency, self.damping_ratio)
    }
}

impl fmt::Display for OscillatorParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "angular frequency: {} rad/s, damping ratio: {} ({}), equilibrium: {}",
            self.angular_frequency,
            self.damping_ratio,
            self.regime(),
            self.equilibrium
        )
    }
}

/// Advance `state` one step toward `equilibrium` using precomputed coefficients.
///
/// The coefficients must come from the same `dt` being simulated.
pub fn step(state: &mut OscillatorState, equilibrium: f64, coeffs: &SpringCoefficients) {
    let (position, velocity) = coeffs.apply(state.position, state.velocity, equilibrium);
    state.position = position;
    state.velocity = velocity;
}

/// Derive coefficients for `dt` and step once. Returns the new position.
pub fn advance(params: &OscillatorParameters, state: &mut OscillatorState, dt: f64) -> f64 {
    let coeffs = params.coefficients(dt);
    step(state, params.equilibrium, &coeffs);
    state.position
}

/// Coarse check on the absolute velocity only. Position error is ignored.
pub fn is_settled(state: &OscillatorState) -> bool {
    state.velocity.abs() <= SETTLE_VELOCITY
}
