use std::cell;

use cpython::{exc, PyErr, PyObject, PyResult, PyString, Python};

use crate::coefficients::SpringCoefficients;
use crate::coordinate::Coordinate;
use crate::oscillator::Oscillator;
use crate::settle;
use crate::spring::{OscillatorParameters, OscillatorState};
use crate::trajectory::{FramePosition, TrackedObject, Trajectory};
use crate::vector_oscillator::VectorOscillator;

const SPRING_ID: &str = "_spring";

py_module_initializer!(damped_spring, |py, m| {
    m.add(
        py,
        "__doc__",
        "Rust implementation of a closed-form damped spring simulator.",
    )?;
    m.add_class::<Spring>(py)?;
    m.add_class::<VectorSpring>(py)?;
    m.add(
        py,
        "settle_parameters",
        py_fn!(py, settle_parameters(duration: f64)),
    )?;
    m.add(
        py,
        "coefficients",
        py_fn!(py, coefficients(dt: f64, angular_frequency: f64, damping_ratio: f64)),
    )?;
    Ok(())
});

fn value_error(py: Python, msg: String) -> PyErr {
    PyErr::new::<exc::ValueError, _>(py, msg)
}

/// returns (damping_ratio, angular_frequency)
fn settle_parameters(py: Python, duration: f64) -> PyResult<(f64, f64)> {
    settle::from_settle_duration(duration).map_err(|e| value_error(py, e))
}

fn coefficients(
    _py: Python,
    dt: f64,
    angular_frequency: f64,
    damping_ratio: f64,
) -> PyResult<(f64, f64, f64, f64)> {
    let c = SpringCoefficients::derive(dt, angular_frequency, damping_ratio);
    Ok((c.pos_pos, c.pos_vel, c.vel_pos, c.vel_vel))
}

py_class!(class Spring |py| {
    data oscillator: cell::RefCell<Oscillator>;
    data trajectory: cell::RefCell<Trajectory>;
    data frame_count: cell::Cell<usize>;
    def __new__(_cls, angular_frequency: f64, damping_ratio: f64, position: f64) -> PyResult<Spring> {
        let params = OscillatorParameters::new(angular_frequency, damping_ratio, position);
        let trajectory = Trajectory::new(vec![TrackedObject {
            id: SPRING_ID.to_string(),
            pos: (position, 0., 0.),
        }]);
        Spring::create_instance(
            py,
            cell::RefCell::new(Oscillator::new(params)),
            cell::RefCell::new(trajectory),
            cell::Cell::new(0),
        )
    }
    def show_state(&self) -> PyResult<PyString> {
        Ok(PyString::new(py, &format!("{}", self.oscillator(py).borrow())))
    }
    def position(&self) -> PyResult<f64> {
        Ok(self.oscillator(py).borrow().get_position())
    }
    def velocity(&self) -> PyResult<f64> {
        Ok(self.oscillator(py).borrow().get_velocity())
    }
    def target(&self) -> PyResult<f64> {
        Ok(self.oscillator(py).borrow().get_target())
    }
    def set_target(&self, target: f64) -> PyResult<PyObject> {
        self.oscillator(py).borrow_mut().set_target(target);
        Ok(py.None())
    }
    def set_state(&self, position: f64, velocity: f64) -> PyResult<PyObject> {
        self.oscillator(py).borrow_mut().set_state(OscillatorState::new(position, velocity));
        Ok(py.None())
    }
    def is_settled(&self) -> PyResult<bool> {
        Ok(self.oscillator(py).borrow().is_settled())
    }
    def step(&self, dt: f64) -> PyResult<f64> {
        let position = self.oscillator(py).borrow_mut().step(dt);
        self.record_frame(py)?;
        Ok(position)
    }
    def save_trajectory(&self, file_path: String) -> PyResult<PyObject> {
        self.trajectory(py)
            .borrow()
            .save(&file_path)
            .map_err(|e| PyErr::new::<exc::IOError, _>(py, e))?;
        Ok(py.None())
    }
});

impl Spring {
    fn record_frame(&self, py: Python) -> PyResult<()> {
        let osc = self.oscillator(py).borrow();
        let frame = vec![FramePosition {
            id: SPRING_ID.to_string(),
            pos: (osc.get_position(), 0., 0.),
            vel: (osc.get_velocity(), 0., 0.),
        }];
        let order = self.frame_count(py).get();
        self.trajectory(py)
            .borrow_mut()
            .add_frame(order, frame)
            .map_err(|e| value_error(py, e))?;
        self.frame_count(py).set(order + 1);
        Ok(())
    }
}

py_class!(class VectorSpring |py| {
    data oscillator: cell::RefCell<VectorOscillator>;
    def __new__(_cls, angular_frequency: f64, damping_ratio: f64, position: (f64, f64, f64)) -> PyResult<VectorSpring> {
        VectorSpring::create_instance(
            py,
            cell::RefCell::new(VectorOscillator::new(
                angular_frequency,
                damping_ratio,
                Coordinate::from_tuple(position),
            )),
        )
    }
    def show_state(&self) -> PyResult<PyString> {
        Ok(PyString::new(py, &format!("{}", self.oscillator(py).borrow())))
    }
    def position(&self) -> PyResult<(f64, f64, f64)> {
        Ok(self.oscillator(py).borrow().get_position().to_tuple())
    }
    def velocity(&self) -> PyResult<(f64, f64, f64)> {
        Ok(self.oscillator(py).borrow().get_velocity().to_tuple())
    }
    def set_target(&self, target: (f64, f64, f64)) -> PyResult<PyObject> {
        self.oscillator(py).borrow_mut().set_target(Coordinate::from_tuple(target));
        Ok(py.None())
    }
    def is_settled(&self) -> PyResult<bool> {
        Ok(self.oscillator(py).borrow().is_settled())
    }
    def step(&self, dt: f64) -> PyResult<(f64, f64, f64)> {
        Ok(self.oscillator(py).borrow_mut().step(dt).to_tuple())
    }
});
