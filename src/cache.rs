use std::collections::HashMap;

use crate::coefficients::SpringCoefficients;

/// CoefficientCache memoizes derived coefficients per `(dt, angular_frequency, damping_ratio)`.
///
/// Keys are the bit patterns of the clamped inputs, so only bit-identical
/// parameters share an entry.
#[derive(Default)]
pub struct CoefficientCache {
    entries: HashMap<(u64, u64, u64), SpringCoefficients>,
}

impl CoefficientCache {
    pub fn new() -> Self {
        CoefficientCache::default()
    }

    pub fn get_or_derive(
        &mut self,
        dt: f64,
        angular_frequency: f64,
        damping_ratio: f64,
    ) -> SpringCoefficients {
        let angular_frequency = angular_frequency.max(0.);
        let damping_ratio = damping_ratio.max(0.);
        let key = (
            dt.to_bits(),
            angular_frequency.to_bits(),
            damping_ratio.to_bits(),
        );
        *self.entries.entry(key).or_insert_with(|| {
            trace!(
                "coefficient cache miss for dt {}, angular frequency {}, damping ratio {}",
                dt,
                angular_frequency,
                damping_ratio
            );
            SpringCoefficients::derive(dt, angular_frequency, damping_ratio)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
