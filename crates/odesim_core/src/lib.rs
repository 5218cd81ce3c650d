pub mod driver;
pub mod error;
pub mod initial;
pub mod params;
pub mod selection;
pub mod simulation;
pub mod solvers;
pub mod systems;
/// The `odesim_core` crate integrates small physical systems with fixed-step
/// explicit methods.
/// Numerics are generic over `Scalar`, so `f32` and `f64` both work.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `DynamicalSystem` (vector fields), `Steppable` (steppers).
/// - **Systems**: double pendulum, Lotka-Volterra and the 1D heat equation, built from a `ParameterSet`.
/// - **Solvers**: Euler, RK4 and Verlet steppers.
/// - **Driver**: `Solver` owns one run and `solve` records a `Trajectory` up to an exact end time.
/// - **Selection / Simulation**: name-based scenarios, solver compatibility checks and `RunSettings`.
pub mod traits;

pub use driver::{Solver, SolverKind, Trajectory};
pub use error::{OdeError, Result};
pub use params::ParameterSet;
pub use simulation::{simulate, RunSettings, SimulationOutput};
pub use systems::{PhysicalSystem, SystemKind};
