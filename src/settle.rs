use std::f64::consts::PI;

use crate::coefficients::EPSILON;
use crate::spring::OscillatorParameters;

/// from_settle_duration converts a settle time in seconds into
/// `(damping_ratio, angular_frequency)`.
///
/// This is a closed form approximation, not an exact solve:
///
/// ```text
/// damping_ratio     = -ln(eps) / (duration * sqrt(pi^2 + ln(eps)^2))
/// angular_frequency = sqrt(1 - damping_ratio^2) / (2 pi duration)
/// ```
///
/// Returns an error instead of NaN when `duration` is not a positive finite number,
/// or when it is so short that the damping ratio reaches 1 and the frequency term
/// has no real value.
pub fn from_settle_duration(duration: f64) -> Result<(f64, f64), String> {
    if !duration.is_finite() || duration <= 0. {
        debug!("rejecting settle duration {}", duration);
        return Err(format!(
            "settle duration must be a positive number of seconds, got {}",
            duration
        ));
    }

    let ln_eps = EPSILON.ln();
    let damping_ratio = -ln_eps / (duration * (PI * PI + ln_eps * ln_eps).sqrt());
    if damping_ratio >= 1. {
        debug!(
            "settle duration {} gives damping ratio {}, no real frequency",
            duration, damping_ratio
        );
        return Err(format!(
            "settle duration {} s is too short, damping ratio {} leaves no real frequency",
            duration, damping_ratio
        ));
    }
    let angular_frequency = (1. - damping_ratio * damping_ratio).sqrt() / (2. * PI * duration);

    Ok((damping_ratio, angular_frequency))
}

pub fn parameters_for_settle_duration(
    duration: f64,
    equilibrium: f64,
) -> Result<OscillatorParameters, String> {
    let (damping_ratio, angular_frequency) = from_settle_duration(duration)?;
    Ok(OscillatorParameters::new(
        angular_frequency,
        damping_ratio,
        equilibrium,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::Regime;
    use float_cmp::approx_eq;
    use test_case::test_case;

    #[test]
    fn test_one_second() {
        let (damping_ratio, angular_frequency) = from_settle_duration(1.).unwrap();
        assert!(approx_eq!(f64, damping_ratio, 0.946456, epsilon = 1.0e-4));
        assert!(approx_eq!(f64, angular_frequency, 0.051381, epsilon = 1.0e-4));
    }

    #[test]
    fn test_longer_is_softer() {
        let (z1, w1) = from_settle_duration(2.).unwrap();
        let (z2, w2) = from_settle_duration(4.).unwrap();
        assert!(z2 < z1);
        assert!(w2.is_finite() && w1.is_finite());
    }

    #[test_case(0. ; "zero")]
    #[test_case(-1. ; "negative")]
    #[test_case(f64::NAN ; "nan")]
    #[test_case(f64::INFINITY ; "infinite")]
    #[test_case(0.5 ; "too short")]
    fn test_rejects(duration: f64) {
        assert!(from_settle_duration(duration).is_err());
        assert!(parameters_for_settle_duration(duration, 0.).is_err());
    }

    #[test]
    fn test_parameters() {
        let params = parameters_for_settle_duration(1.5, 3.).unwrap();
        assert_eq!(params.equilibrium, 3.);
        assert_eq!(params.regime(), Regime::UnderDamped);
    }
}
