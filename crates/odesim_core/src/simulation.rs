use crate::driver::{Solver, SolverKind, Trajectory};
use crate::error::{OdeError, Result};
use crate::selection::{scenario, select_solver, DEFAULT_HEAT_POINTS};
use crate::systems::SystemKind;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    pub t0: f64,
    pub t_end: f64,
    pub dt: f64,
    pub heat_points: usize,
    pub seed: Option<u64>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            t0: 0.0,
            t_end: 10.0,
            dt: 0.01,
            heat_points: DEFAULT_HEAT_POINTS,
            seed: None,
        }
    }
}

impl RunSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.t0.is_finite() || !self.t_end.is_finite() {
            return Err(OdeError::invalid("t0 and t_end must be finite."));
        }
        if self.dt <= 0.0 || !self.dt.is_finite() {
            return Err(OdeError::invalid("dt must be a positive number."));
        }
        if self.heat_points == 0 {
            return Err(OdeError::invalid("heat_points must be at least 1."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutput {
    pub system: SystemKind,
    pub solver: SolverKind,
    pub labels: Vec<String>,
    pub trajectory: Trajectory<f64>,
}

/// Runs one named system with one named solver from its default scenario.
///
/// Solver/system compatibility is checked before anything is constructed,
/// so a mismatched pairing never evaluates the equations.
pub fn simulate(
    system: SystemKind,
    solver: SolverKind,
    settings: &RunSettings,
) -> Result<SimulationOutput> {
    settings.validate()?;
    let solver = select_solver(solver, system)?;
    let scenario = scenario(system, settings.heat_points, settings.seed)?;

    let mut integrator = Solver::new(
        scenario.system,
        solver,
        settings.t0,
        &scenario.initial_state,
        settings.dt,
    )?;
    let trajectory = integrator.solve(settings.t_end)?;
    info!(
        system = %system,
        solver = %solver,
        points = trajectory.len(),
        "simulation complete"
    );

    Ok(SimulationOutput {
        system,
        solver,
        labels: scenario.labels,
        trajectory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(t_end: f64, dt: f64) -> RunSettings {
        RunSettings {
            t_end,
            dt,
            seed: Some(42),
            heat_points: 20,
            ..RunSettings::default()
        }
    }

    #[test]
    fn default_settings_are_valid() {
        assert!(RunSettings::default().validate().is_ok());
    }

    #[test]
    fn invalid_settings_are_rejected_before_running() {
        for dt in [0.0, -1.0] {
            assert!(matches!(
                simulate(SystemKind::LotkaVolterra, SolverKind::Euler, &settings(1.0, dt)),
                Err(OdeError::InvalidArgument(_))
            ));
        }
        let mut bad = settings(1.0, 0.1);
        bad.heat_points = 0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn verlet_with_lotka_volterra_is_a_configuration_mismatch() {
        let result = simulate(SystemKind::LotkaVolterra, SolverKind::Verlet, &settings(1.0, 0.1));
        assert_eq!(
            result,
            Err(OdeError::ConfigurationMismatch {
                solver: "verlet".to_string(),
                system: "lotka_volterra".to_string(),
            })
        );
    }

    #[test]
    fn lotka_volterra_euler_stays_non_negative() {
        let output = simulate(SystemKind::LotkaVolterra, SolverKind::Euler, &settings(100.0, 0.01))
            .expect("simulation");
        let trajectory = &output.trajectory;
        assert!((trajectory.times()[trajectory.len() - 1] - 100.0).abs() < 1e-9);
        for state in trajectory.states() {
            assert!(state[0] >= 0.0, "prey went negative: {}", state[0]);
            assert!(state[1] >= 0.0, "predators went negative: {}", state[1]);
        }
    }

    #[test]
    fn heat_boundaries_never_change() {
        for solver in [SolverKind::Euler, SolverKind::RungeKutta] {
            let output = simulate(SystemKind::HeatEquation1D, solver, &settings(5.0, 0.05))
                .expect("simulation");
            let states = output.trajectory.states();
            let (first, last) = (states[0][0], states[0][19]);
            for state in states {
                assert_eq!(state[0], first);
                assert_eq!(state[19], last);
            }
            assert_eq!(output.labels.len(), 20);
        }
    }

    #[test]
    fn pendulum_runs_with_every_solver() {
        for solver in SolverKind::ALL {
            let output = simulate(SystemKind::DoublePendulum, solver, &settings(1.0, 0.01))
                .expect("simulation");
            assert_eq!(output.trajectory.dimension(), 4);
            assert!((output.trajectory.times()[output.trajectory.len() - 1] - 1.0).abs() < 1e-9);
            assert!(output
                .trajectory
                .states()
                .iter()
                .all(|s| s.iter().all(|v| v.is_finite())));
        }
    }

    #[test]
    fn seeded_heat_runs_are_reproducible() {
        let a = simulate(SystemKind::HeatEquation1D, SolverKind::RungeKutta, &settings(0.5, 0.1))
            .expect("simulation");
        let b = simulate(SystemKind::HeatEquation1D, SolverKind::RungeKutta, &settings(0.5, 0.1))
            .expect("simulation");
        assert_eq!(a, b);
    }
}
