use std::fmt;

use crate::coefficients::SpringCoefficients;
use crate::spring::{self, OscillatorParameters, OscillatorState};

/// Oscillator owns one spring state together with its parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    state: OscillatorState,
    params: OscillatorParameters,
}

impl Oscillator {
    /// Start at rest on the equilibrium.
    pub fn new(params: OscillatorParameters) -> Self {
        Oscillator {
            state: OscillatorState::at_rest(params.equilibrium),
            params,
        }
    }

    pub fn with_state(params: OscillatorParameters, state: OscillatorState) -> Self {
        Oscillator { state, params }
    }

    pub fn get_state(&self) -> OscillatorState {
        self.state
    }

    pub fn get_position(&self) -> f64 {
        self.state.position
    }

    pub fn get_velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn get_target(&self) -> f64 {
        self.params.equilibrium
    }

    pub fn get_parameters(&self) -> OscillatorParameters {
        self.params
    }

    pub fn set_state(&mut self, state: OscillatorState) {
        self.state = state;
    }

    pub fn set_target(&mut self, target: f64) {
        self.params.equilibrium = target;
    }

    /// The equilibrium of `params` replaces the current target.
    pub fn set_parameters(&mut self, params: OscillatorParameters) {
        self.params = params;
    }

    pub fn step(&mut self, dt: f64) -> f64 {
        // proceed one step and return the updated position
        spring::advance(&self.params, &mut self.state, dt)
    }

    /// Step with coefficients derived elsewhere for this oscillator's frequency and damping.
    pub fn step_with(&mut self, coeffs: &SpringCoefficients) -> f64 {
        spring::step(&mut self.state, self.params.equilibrium, coeffs);
        self.state.position
    }

    pub fn is_settled(&self) -> bool {
        spring::is_settled(&self.state)
    }
}

impl fmt::Display for Oscillator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Oscillator {} [{}]", self.state, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_new_is_at_rest_on_target() {
        let osc = Oscillator::new(OscillatorParameters::new(10., 1., 4.));
        assert_eq!(osc.get_position(), 4.);
        assert_eq!(osc.get_velocity(), 0.);
        assert!(osc.is_settled());
    }

    #[test_case(0.25 ; "under")]
    #[test_case(1. ; "critical")]
    #[test_case(1.8 ; "over")]
    fn test_follows_target(damping_ratio: f64) {
        let mut osc = Oscillator::new(OscillatorParameters::new(12., damping_ratio, 0.));
        osc.set_target(5.);
        let mut moved = false;
        for _ in 0..600 {
            osc.step(1. / 60.);
            moved |= !osc.is_settled();
        }
        assert!(moved);
        assert!(osc.is_settled());
        assert!((osc.get_position() - 5.).abs() < 1.0e-2);
    }

    #[test]
    fn test_step_with_matches_step() {
        let params = OscillatorParameters::new(8., 0.6, 1.);
        let state = OscillatorState::new(-2., 3.);
        let mut a = Oscillator::with_state(params, state);
        let mut b = a;
        let coeffs = params.coefficients(0.02);
        for _ in 0..20 {
            assert_eq!(a.step(0.02), b.step_with(&coeffs));
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_state_and_parameters() {
        let mut osc = Oscillator::new(OscillatorParameters::new(10., 1., 0.));
        osc.set_state(OscillatorState::new(2., -1.));
        assert_eq!(osc.get_state(), OscillatorState::new(2., -1.));

        // new parameters bring their own target
        let softer = OscillatorParameters::new(3., 0.4, 5.);
        osc.set_parameters(softer);
        assert_eq!(osc.get_parameters(), softer);
        assert_eq!(osc.get_target(), 5.);
        assert_eq!(osc.get_state(), OscillatorState::new(2., -1.));

        let mut expected = OscillatorState::new(2., -1.);
        spring::advance(&softer, &mut expected, 0.1);
        osc.step(0.1);
        assert_eq!(osc.get_state(), expected);
    }

    #[test]
    fn test_display() {
        let osc = Oscillator::new(OscillatorParameters::new(2., 0.5, 0.));
        let s = format!("{}", osc);
        assert!(s.contains("under-damped"));
        assert!(s.contains("velocity: 0"));
    }
}
