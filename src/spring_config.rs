use std::default;
use std::fmt;
use std::fs;
use std::io;

use crate::coefficients::SpringCoefficients;
use crate::settle;
use crate::spring::OscillatorParameters;

/// Settings of one spring animation.
///
/// Slider ranges a designer tool may impose (frequency in [0, 100], damping in [0, 2])
/// are not enforced here; negative values are clamped by the math itself.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub time_delta: f64,
    pub angular_frequency: f64,
    pub damping_ratio: f64,
}

impl SpringConfig {
    pub fn new() -> Self {
        SpringConfig::default()
    }

    pub fn set(&mut self, key: &str, val: f64) -> Result<(), String> {
        match key {
            "time_delta" => self.time_delta = val,
            "angular_frequency" => self.angular_frequency = val,
            "damping_ratio" => self.damping_ratio = val,
            _ => return Err(format!("invalid config: {}", key)),
        };
        Ok(())
    }

    pub fn from_settle_duration(duration: f64, time_delta: f64) -> Result<Self, String> {
        let (damping_ratio, angular_frequency) = settle::from_settle_duration(duration)?;
        Ok(SpringConfig {
            time_delta,
            angular_frequency,
            damping_ratio,
        })
    }

    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("failed to parse spring config: {}", e))
    }

    pub fn load(file_path: &str) -> Result<Self, String> {
        let f = fs::File::open(file_path)
            .map_err(|e| format!("failed to open {}: {}", file_path, e))?;
        serde_json::from_reader(io::BufReader::new(f))
            .map_err(|e| format!("failed to parse spring config {}: {}", file_path, e))
    }

    pub fn parameters(&self, equilibrium: f64) -> OscillatorParameters {
        OscillatorParameters::new(self.angular_frequency, self.damping_ratio, equilibrium)
    }

    pub fn coefficients(&self) -> SpringCoefficients {
        SpringCoefficients::derive(self.time_delta, self.angular_frequency, self.damping_ratio)
    }
}

impl default::Default for SpringConfig {
    fn default() -> Self {
        SpringConfig {
            time_delta: 1. / 60.,    // s
            angular_frequency: 10.,  // rad/s
            damping_ratio: 1.,
        }
    }
}

impl fmt::Display for SpringConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Spring Config\n\
             angular frequency: {} rad/s\n\
             damping ratio: {} ({})\n\
             [simulation]\n\
             one time step: {} s",
            self.angular_frequency,
            self.damping_ratio,
            self.parameters(0.).regime(),
            self.time_delta,
        )
    }
}
