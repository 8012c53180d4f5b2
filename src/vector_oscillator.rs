use std::fmt;

use crate::cache::CoefficientCache;
use crate::coefficients::SpringCoefficients;
use crate::coordinate::Coordinate;
use crate::oscillator::Oscillator;
use crate::spring::{OscillatorParameters, OscillatorState};

/// VectorOscillator animates three axes with three independent springs.
///
/// Axes never interact; stepping it is the same as stepping three scalar
/// oscillators with the same inputs.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorOscillator {
    axes: [Oscillator; 3],
}

impl VectorOscillator {
    /// Same frequency and damping on every axis, at rest on `position`.
    pub fn new(angular_frequency: f64, damping_ratio: f64, position: Coordinate) -> Self {
        let params = OscillatorParameters::new(angular_frequency, damping_ratio, 0.);
        Self::with_axes(
            [
                params.with_equilibrium(position.x),
                params.with_equilibrium(position.y),
                params.with_equilibrium(position.z),
            ],
            position,
        )
    }

    /// Per-axis parameters, at rest on `position`. Each axis keeps its own equilibrium.
    pub fn with_axes(params: [OscillatorParameters; 3], position: Coordinate) -> Self {
        let axis = |i: usize| Oscillator::with_state(params[i], OscillatorState::at_rest(position[i]));
        VectorOscillator {
            axes: [axis(0), axis(1), axis(2)],
        }
    }

    /// None when `i` is not 0, 1 or 2.
    pub fn axis(&self, i: usize) -> Option<&Oscillator> {
        self.axes.get(i)
    }

    pub fn axis_mut(&mut self, i: usize) -> Option<&mut Oscillator> {
        self.axes.get_mut(i)
    }

    pub fn get_position(&self) -> Coordinate {
        self.collect(|a| a.get_position())
    }

    pub fn get_velocity(&self) -> Coordinate {
        self.collect(|a| a.get_velocity())
    }

    pub fn get_target(&self) -> Coordinate {
        self.collect(|a| a.get_target())
    }

    pub fn set_target(&mut self, target: Coordinate) {
        for (i, a) in self.axes.iter_mut().enumerate() {
            a.set_target(target[i]);
        }
    }

    pub fn set_position(&mut self, position: Coordinate, velocity: Coordinate) {
        for (i, a) in self.axes.iter_mut().enumerate() {
            a.set_state(OscillatorState::new(position[i], velocity[i]));
        }
    }

    /// Derive coefficients per axis and step once.
    pub fn step(&mut self, dt: f64) -> Coordinate {
        for a in self.axes.iter_mut() {
            a.step(dt);
        }
        self.get_position()
    }

    /// Step every axis with one coefficient set.
    /// Only valid when all axes share frequency and damping.
    pub fn step_with(&mut self, coeffs: &SpringCoefficients) -> Coordinate {
        for a in self.axes.iter_mut() {
            a.step_with(coeffs);
        }
        self.get_position()
    }

    /// Step with coefficients looked up in `cache`, deriving each distinct set once.
    pub fn step_cached(&mut self, cache: &mut CoefficientCache, dt: f64) -> Coordinate {
        for a in self.axes.iter_mut() {
            let params = a.get_parameters();
            let coeffs = cache.get_or_derive(dt, params.angular_frequency, params.damping_ratio);
            a.step_with(&coeffs);
        }
        self.get_position()
    }

    /// True only when every axis is settled.
    pub fn is_settled(&self) -> bool {
        self.axes.iter().all(|a| a.is_settled())
    }

    fn collect<F: Fn(&Oscillator) -> f64>(&self, f: F) -> Coordinate {
        Coordinate::new(f(&self.axes[0]), f(&self.axes[1]), f(&self.axes[2]))
    }
}

impl fmt::Display for VectorOscillator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "VectorOscillator position: {}, velocity: {}, target: {}",
            self.get_position(),
            self.get_velocity(),
            self.get_target()
        )
    }
}
