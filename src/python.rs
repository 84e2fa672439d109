use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{SimParams, SimulationConfig};
use crate::core::{InitialState, Simulation, VectorField, DIM};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn points_from_array(name: &str, arr: &PyReadonlyArray2<'_, f64>) -> PyResult<Vec<[f64; DIM]>> {
    let view = arr.as_array();
    if view.shape()[1] != DIM {
        return Err(py_err(format!(
            "{name} must have shape (N, {DIM}), got {:?}",
            view.shape()
        )));
    }
    Ok(view.rows().into_iter().map(|r| [r[0], r[1]]).collect())
}

fn field_to_array(field: &VectorField) -> Array2<f64> {
    let mut arr = Array2::<f64>::zeros((field.len(), DIM));
    for (i, p) in field.to_points().into_iter().enumerate() {
        arr[[i, 0]] = p[0];
        arr[[i, 1]] = p[1];
    }
    arr
}

/// Python-facing wrapper around the Rust `Simulation`.
///
/// API:
/// - __new__(positions, velocities, radii, masses, box_size, acceleration=(0, 0),
///   restitution_bc=1.0, restitution_pc=1.0, dt=1.0, acceleration_dt=1.0)
/// - from_yaml(path) -> ParticleSim
/// - step(frame_index) -> (positions, velocities)
/// - advance(frames)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, 2)
/// - get_radii() -> np.ndarray, shape (N,)
#[pyclass]
pub struct ParticleSim {
    sim: Simulation,
}

impl ParticleSim {
    fn state(&self, py: Python<'_>) -> (Py<PyArray2<f64>>, Py<PyArray2<f64>>) {
        let snap = self.sim.snapshot();
        let pos = field_to_array(snap.position).into_pyarray(py);
        let vel = field_to_array(snap.velocity).into_pyarray(py);
        (pos.to_owned().into(), vel.to_owned().into())
    }
}

#[pymethods]
impl ParticleSim {
    /// Create a simulation from explicit initial conditions.
    ///
    /// Parameters
    /// - positions, velocities: float arrays of shape (N, 2)
    /// - radii (>= 0), masses (> 0): float arrays of shape (N,)
    /// - box_size: (width, height) of the box centered on the origin
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (
        positions,
        velocities,
        radii,
        masses,
        box_size,
        acceleration=(0.0, 0.0),
        restitution_bc=1.0,
        restitution_pc=1.0,
        dt=1.0,
        acceleration_dt=1.0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new<'py>(
        positions: PyReadonlyArray2<'py, f64>,
        velocities: PyReadonlyArray2<'py, f64>,
        radii: PyReadonlyArray1<'py, f64>,
        masses: PyReadonlyArray1<'py, f64>,
        box_size: (f64, f64),
        acceleration: (f64, f64),
        restitution_bc: f64,
        restitution_pc: f64,
        dt: f64,
        acceleration_dt: f64,
    ) -> PyResult<Self> {
        let initial = InitialState {
            positions: points_from_array("positions", &positions)?,
            velocities: points_from_array("velocities", &velocities)?,
            radii: radii.as_array().to_vec(),
            masses: masses.as_array().to_vec(),
        };
        let params = SimParams {
            box_width: box_size.0,
            box_height: box_size.1,
            acceleration: [acceleration.0, acceleration.1],
            restitution_bc,
            restitution_pc,
            dt,
            acceleration_dt,
            ..SimParams::default()
        };
        let sim = Simulation::new(initial, params).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Load a YAML scenario, sample its initial state and build the simulation.
    #[staticmethod]
    fn from_yaml(path: &str) -> PyResult<Self> {
        let sim = SimulationConfig::from_path(path)
            .and_then(|cfg| cfg.build())
            .map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance one frame (releases the GIL) and return (positions, velocities).
    fn step(&mut self, py: Python<'_>, frame_index: u64) -> (Py<PyArray2<f64>>, Py<PyArray2<f64>>) {
        py.detach(|| {
            self.sim.step(frame_index);
        });
        self.state(py)
    }

    /// Advance `frames` frames from the last frame index (releases the GIL).
    fn advance(&mut self, py: Python<'_>, frames: u64) {
        py.detach(|| {
            self.sim.advance(frames);
        });
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        self.state(py).0
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        self.state(py).1
    }

    /// Return radii as a NumPy array of shape (N,), dtype=float64.
    fn get_radii(&self, py: Python<'_>) -> Py<PyArray1<f64>> {
        let radii: Array1<f64> = self.sim.system().radius().iter().copied().collect();
        radii.into_pyarray(py).to_owned().into()
    }

    /// Index of the most recently stepped frame, or None before the first step.
    fn frame(&self) -> Option<u64> {
        self.sim.frame()
    }

    /// Total kinetic energy.
    fn kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }
}

/// The particlebox Python module entry point.
#[pymodule]
fn particlebox(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ParticleSim>()?;
    Ok(())
}
