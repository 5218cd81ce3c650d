//! Fixed-step integration driver.
//!
//! A [`Solver`] owns the working time, state and step size of one run and
//! dispatches each step to the stepper selected by [`SolverKind`].
//! [`Solver::solve`] repeats steps until the end time, clamping the last step
//! so the run lands on `t_end`, and records every point into a [`Trajectory`].

use crate::error::{OdeError, Result};
use crate::solvers::{Euler, Verlet, RK4};
use crate::traits::{DynamicalSystem, Scalar, Steppable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    Euler,
    RungeKutta,
    Verlet,
}

impl SolverKind {
    pub const ALL: [SolverKind; 3] = [SolverKind::Euler, SolverKind::RungeKutta, SolverKind::Verlet];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::Euler => "euler",
            SolverKind::RungeKutta => "runge_kutta",
            SolverKind::Verlet => "verlet",
        }
    }

    /// Whether the scheme treats `f` as an acceleration rather than a first derivative.
    pub fn requires_acceleration(self) -> bool {
        matches!(self, SolverKind::Verlet)
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = OdeError;

    fn from_str(s: &str) -> Result<Self> {
        SolverKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| OdeError::UnknownSolver(s.to_string()))
    }
}

enum Stepper<T: Scalar> {
    Euler(Euler<T>),
    RungeKutta(RK4<T>),
    Verlet(Verlet<T>),
}

impl<T: Scalar> Stepper<T> {
    fn build(kind: SolverKind, system: &impl DynamicalSystem<T>, t0: T, y0: &[T], dt: T) -> Self {
        match kind {
            SolverKind::Euler => Stepper::Euler(Euler::new(y0.len())),
            SolverKind::RungeKutta => Stepper::RungeKutta(RK4::new(y0.len())),
            SolverKind::Verlet => Stepper::Verlet(Verlet::new(system, t0, y0, dt)),
        }
    }

    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        match self {
            Stepper::Euler(s) => s.step(system, t, state, dt),
            Stepper::RungeKutta(s) => s.step(system, t, state, dt),
            Stepper::Verlet(s) => s.step(system, t, state, dt),
        }
    }
}

/// Recorded output of a run: parallel sequences of times and state snapshots.
///
/// Index 0 holds the initial condition. Every snapshot is an owned copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory<T> {
    times: Vec<T>,
    states: Vec<Vec<T>>,
}

impl<T: Scalar> Trajectory<T> {
    fn start(t0: T, y0: &[T]) -> Self {
        Self {
            times: vec![t0],
            states: vec![y0.to_vec()],
        }
    }

    /// Rebuilds a trajectory from stored columns, e.g. a loaded CSV file.
    pub fn from_parts(times: Vec<T>, states: Vec<Vec<T>>) -> Result<Self> {
        if times.len() != states.len() {
            return Err(OdeError::invalid(format!(
                "trajectory has {} times but {} states",
                times.len(),
                states.len()
            )));
        }
        if let Some(first) = states.first() {
            let dim = first.len();
            if let Some(idx) = states.iter().position(|s| s.len() != dim) {
                return Err(OdeError::invalid(format!(
                    "state {idx} has dimension {}, expected {dim}",
                    states[idx].len()
                )));
            }
        }
        if times.windows(2).any(|w| w[1] < w[0]) {
            return Err(OdeError::invalid("trajectory times must be non-decreasing"));
        }
        Ok(Self { times, states })
    }

    fn push(&mut self, t: T, y: &[T]) {
        self.times.push(t);
        self.states.push(y.to_vec());
    }

    pub fn times(&self) -> &[T] {
        &self.times
    }

    pub fn states(&self) -> &[Vec<T>] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// State dimension, or zero for an empty trajectory.
    pub fn dimension(&self) -> usize {
        self.states.first().map_or(0, Vec::len)
    }

    pub fn last(&self) -> Option<(T, &[T])> {
        let t = *self.times.last()?;
        let y = self.states.last()?;
        Some((t, y.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (T, &[T])> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.states.iter().map(Vec::as_slice))
    }

    /// Values of one state component over time.
    pub fn component(&self, index: usize) -> Option<Vec<T>> {
        if index >= self.dimension() {
            return None;
        }
        Some(self.states.iter().map(|s| s[index]).collect())
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<Vec<T>>) {
        (self.times, self.states)
    }
}

/// Integration state of a single run.
pub struct Solver<S, T: Scalar> {
    system: S,
    kind: SolverKind,
    stepper: Stepper<T>,
    t: T,
    y: Vec<T>,
    dt: T,
}

impl<S, T> Solver<S, T>
where
    S: DynamicalSystem<T>,
    T: Scalar,
{
    /// Validates the inputs and prepares the stepper.
    ///
    /// Verlet is refused for systems that do not report themselves as
    /// mechanical, before the equations are evaluated.
    pub fn new(system: S, kind: SolverKind, t0: T, y0: &[T], dt: T) -> Result<Self> {
        if !t0.is_finite() {
            return Err(OdeError::invalid(format!(
                "t0 must be a finite number, got {t0:?}"
            )));
        }
        if !dt.is_finite() || dt <= T::zero() {
            return Err(OdeError::invalid(format!(
                "dt must be a positive number, got {dt:?}"
            )));
        }
        if t0 + dt == t0 {
            return Err(OdeError::invalid(format!(
                "dt = {dt:?} is too small to advance t0 = {t0:?}"
            )));
        }
        if kind.requires_acceleration() && !system.is_mechanical() {
            return Err(OdeError::ConfigurationMismatch {
                solver: kind.name().to_string(),
                system: system.name().to_string(),
            });
        }
        if y0.is_empty() {
            return Err(OdeError::invalid("initial state must not be empty"));
        }
        if y0.len() != system.dimension() {
            return Err(OdeError::invalid(format!(
                "initial state has dimension {}, system expects {}",
                y0.len(),
                system.dimension()
            )));
        }
        if let Some(idx) = y0.iter().position(|v| !v.is_finite()) {
            return Err(OdeError::invalid(format!(
                "initial state component {idx} is not finite"
            )));
        }

        let stepper = Stepper::build(kind, &system, t0, y0, dt);
        debug!(solver = %kind, dim = y0.len(), t0 = ?t0, dt = ?dt, "solver initialised");

        Ok(Self {
            system,
            kind,
            stepper,
            t: t0,
            y: y0.to_vec(),
            dt,
        })
    }

    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn t(&self) -> T {
        self.t
    }

    pub fn state(&self) -> &[T] {
        &self.y
    }

    pub fn dt(&self) -> T {
        self.dt
    }

    /// Advances time and state by the current `dt`.
    pub fn step(&mut self) {
        self.stepper
            .step(&self.system, &mut self.t, &mut self.y, self.dt);
        trace!(t = ?self.t, "step");
    }

    /// Integrates up to `t_end` and returns every recorded point.
    ///
    /// The first point is the current `(t, y)`. When the next step would pass
    /// `t_end`, `dt` is shrunk to the remaining interval and the clock is set
    /// to `t_end` after that step, so the last recorded time is exactly
    /// `t_end`. An end time at or before the current time records just the
    /// starting point. Fails if a full step would no longer move the clock,
    /// which happens once `t` is large enough that `t + dt` rounds to `t`.
    pub fn solve(&mut self, t_end: T) -> Result<Trajectory<T>> {
        if !t_end.is_finite() {
            return Err(OdeError::invalid(format!(
                "t_end must be a finite number, got {t_end:?}"
            )));
        }

        let mut trajectory = Trajectory::start(self.t, &self.y);
        while self.t < t_end {
            let next = self.t + self.dt;
            let clamped = next > t_end;
            if clamped {
                self.dt = t_end - self.t;
            } else if next <= self.t {
                return Err(OdeError::invalid(format!(
                    "dt = {:?} no longer advances t = {:?}",
                    self.dt, self.t
                )));
            }
            self.step();
            if clamped {
                self.t = t_end;
            }
            trajectory.push(self.t, &self.y);
        }

        debug!(
            solver = %self.kind,
            points = trajectory.len(),
            t_end = ?t_end,
            "integration finished"
        );
        Ok(trajectory)
    }
}
