use std::fmt;

/// Width of the bands separating the damping regimes.
/// Also the threshold below which the angular frequency is treated as zero.
pub const EPSILON: f64 = 1.0e-4;

/// Regime classifies the motion of a damped harmonic oscillator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Regime {
    /// angular frequency is (close to) zero, the spring does not move
    Static,
    OverDamped,
    CriticallyDamped,
    UnderDamped,
}

impl Regime {
    /// Negative inputs are clamped to zero before classification.
    pub fn classify(angular_frequency: f64, damping_ratio: f64) -> Self {
        let angular_frequency = angular_frequency.max(0.);
        let damping_ratio = damping_ratio.max(0.);

        if angular_frequency < EPSILON {
            Regime::Static
        } else if damping_ratio > 1. + EPSILON {
            Regime::OverDamped
        } else if damping_ratio < 1. - EPSILON {
            Regime::UnderDamped
        } else {
            Regime::CriticallyDamped
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Regime::Static => "static",
            Regime::OverDamped => "over-damped",
            Regime::CriticallyDamped => "critically damped",
            Regime::UnderDamped => "under-damped",
        };
        write!(f, "{}", name)
    }
}

/// SpringCoefficients advance an oscillator by exactly one time step.
///
/// With positions measured relative to the equilibrium,
///
/// ```text
/// new_pos = pos_pos * old_pos + pos_vel * old_vel
/// new_vel = vel_pos * old_pos + vel_vel * old_vel
/// ```
///
/// A set is only valid for the `(dt, angular_frequency, damping_ratio)` it was
/// derived from, but any number of oscillators sharing that triple may reuse it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringCoefficients {
    pub pos_pos: f64,
    pub pos_vel: f64,
    pub vel_pos: f64,
    pub vel_vel: f64,
}

impl SpringCoefficients {
    pub const IDENTITY: SpringCoefficients = SpringCoefficients {
        pos_pos: 1.,
        pos_vel: 0.,
        vel_pos: 0.,
        vel_vel: 1.,
    };

    /// Derive the closed form coefficients for one step of length `dt`.
    ///
    /// Negative frequency and damping are clamped to zero. A `dt` of zero or less
    /// does not advance the spring and yields the identity. Never fails and never
    /// returns NaN for finite inputs.
    pub fn derive(dt: f64, angular_frequency: f64, damping_ratio: f64) -> Self {
        if angular_frequency < 0. || damping_ratio < 0. {
            debug!(
                "clamping spring parameters (angular frequency {}, damping ratio {}) to non-negative",
                angular_frequency, damping_ratio
            );
        }
        let angular_frequency = angular_frequency.max(0.);
        let damping_ratio = damping_ratio.max(0.);

        if dt <= 0. {
            return SpringCoefficients::IDENTITY;
        }

        let regime = Regime::classify(angular_frequency, damping_ratio);
        trace!("deriving {} coefficients for dt {}", regime, dt);
        match regime {
            Regime::Static => SpringCoefficients::IDENTITY,
            Regime::OverDamped => over_damped(dt, angular_frequency, damping_ratio),
            Regime::UnderDamped => under_damped(dt, angular_frequency, damping_ratio),
            Regime::CriticallyDamped => critically_damped(dt, angular_frequency),
        }
    }

    /// apply returns the (position, velocity) one step later
    pub fn apply(&self, position: f64, velocity: f64, equilibrium: f64) -> (f64, f64) {
        let old_pos = position - equilibrium;
        let old_vel = velocity;
        (
            old_pos * self.pos_pos + old_vel * self.pos_vel + equilibrium,
            old_pos * self.vel_pos + old_vel * self.vel_vel,
        )
    }
}

impl Default for SpringCoefficients {
    fn default() -> Self {
        SpringCoefficients::IDENTITY
    }
}

impl fmt::Display for SpringCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[[{}, {}], [{}, {}]]",
            self.pos_pos, self.pos_vel, self.vel_pos, self.vel_vel
        )
    }
}

/// Two distinct real roots z1 < z2 < 0.
pub fn over_damped(dt: f64, angular_frequency: f64, damping_ratio: f64) -> SpringCoefficients {
    let za = -angular_frequency * damping_ratio;
    let zb = angular_frequency * (damping_ratio * damping_ratio - 1.).sqrt();
    let z1 = za - zb;
    let z2 = za + zb;

    let e1 = (z1 * dt).exp();
    let e2 = (z2 * dt).exp();

    // partial fractions over 1 / (z2 - z1)
    let inv_two_zb = 1. / (2. * zb);

    let e1_over_two_zb = e1 * inv_two_zb;
    let e2_over_two_zb = e2 * inv_two_zb;
    let z1e1_over_two_zb = z1 * e1_over_two_zb;
    let z2e2_over_two_zb = z2 * e2_over_two_zb;

    // keep the factored form, expanding it cancels catastrophically near zb = 0
    SpringCoefficients {
        pos_pos: e1_over_two_zb * z2 - z2e2_over_two_zb + e2,
        pos_vel: -e1_over_two_zb + e2_over_two_zb,
        vel_pos: (z1e1_over_two_zb - z2e2_over_two_zb + e2) * z2,
        vel_vel: -z1e1_over_two_zb + z2e2_over_two_zb,
    }
}

/// Complex conjugate roots, decaying at `angular_frequency * damping_ratio`.
pub fn under_damped(dt: f64, angular_frequency: f64, damping_ratio: f64) -> SpringCoefficients {
    let omega_zeta = angular_frequency * damping_ratio;
    let alpha = angular_frequency * (1. - damping_ratio * damping_ratio).sqrt();

    let exp_term = (-omega_zeta * dt).exp();
    let cos_term = (alpha * dt).cos();
    let sin_term = (alpha * dt).sin();

    let inv_alpha = 1. / alpha;

    let exp_sin = exp_term * sin_term;
    let exp_cos = exp_term * cos_term;
    let exp_omega_zeta_sin_over_alpha = exp_term * omega_zeta * sin_term * inv_alpha;

    SpringCoefficients {
        pos_pos: exp_cos + exp_omega_zeta_sin_over_alpha,
        pos_vel: exp_sin * inv_alpha,
        vel_pos: -exp_sin * alpha - omega_zeta * exp_omega_zeta_sin_over_alpha,
        vel_vel: exp_cos - exp_omega_zeta_sin_over_alpha,
    }
}

/// Repeated real root at `-angular_frequency`.
pub fn critically_damped(dt: f64, angular_frequency: f64) -> SpringCoefficients {
    let exp_term = (-angular_frequency * dt).exp();
    let time_exp = dt * exp_term;
    let time_exp_freq = time_exp * angular_frequency;

    SpringCoefficients {
        pos_pos: time_exp_freq + exp_term,
        pos_vel: time_exp,
        vel_pos: -angular_frequency * time_exp_freq,
        vel_vel: -time_exp_freq + exp_term,
    }
}
