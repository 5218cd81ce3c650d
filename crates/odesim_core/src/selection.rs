//! Maps system and solver names to ready-to-run configurations.

use crate::driver::SolverKind;
use crate::error::{OdeError, Result};
use crate::initial::InitialCondition;
use crate::systems::{
    create_double_pendulum, create_heat_equation_1d, create_lotka_volterra, PhysicalSystem,
    SystemKind,
};

/// Grid size used for the heat equation when none is given.
pub const DEFAULT_HEAT_POINTS: usize = 100;

/// A system with its canonical initial state and one label per state component.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub system: PhysicalSystem,
    pub initial_state: Vec<f64>,
    pub labels: Vec<String>,
}

/// Builds the default scenario for `kind`.
///
/// The heat equation starts from `heat_points` temperatures drawn uniformly
/// from `[0, 100)`; pass a `seed` to make that draw reproducible.
// The pendulum starts from 3.14/4 and 3.14/2, not the exact fractions of pi.
#[allow(clippy::approx_constant)]
pub fn scenario(kind: SystemKind, heat_points: usize, seed: Option<u64>) -> Result<Scenario> {
    let scenario = match kind {
        SystemKind::DoublePendulum => Scenario {
            system: create_double_pendulum(),
            initial_state: vec![3.14 / 4.0, 3.14 / 2.0, 0.0, 0.0],
            labels: ["θ1", "θ2", "ω1", "ω2"].map(String::from).to_vec(),
        },
        SystemKind::LotkaVolterra => Scenario {
            system: create_lotka_volterra(),
            initial_state: vec![40.0, 9.0],
            labels: ["Prey", "Predators"].map(String::from).to_vec(),
        },
        SystemKind::HeatEquation1D => {
            let system = create_heat_equation_1d(heat_points)?;
            let initial_state = InitialCondition::Random {
                low: 0.0,
                high: 100.0,
            }
            .generate_seeded(heat_points, seed)?;
            let labels = (0..heat_points).map(|i| format!("T(x{i})")).collect();
            Scenario {
                system,
                initial_state,
                labels,
            }
        }
    };
    Ok(scenario)
}

/// Checks that `solver` can integrate `system`.
/// Verlet needs an acceleration-driven system; only the double pendulum is one.
pub fn select_solver(solver: SolverKind, system: SystemKind) -> Result<SolverKind> {
    if solver.requires_acceleration() && !system.is_mechanical() {
        return Err(OdeError::ConfigurationMismatch {
            solver: solver.name().to_string(),
            system: system.name().to_string(),
        });
    }
    Ok(solver)
}

/// Name-based front door: parses both names and validates the pairing.
pub fn select_by_name(system: &str, solver: &str) -> Result<(SystemKind, SolverKind)> {
    let system: SystemKind = system.parse()?;
    let solver: SolverKind = solver.parse()?;
    Ok((system, select_solver(solver, system)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DynamicalSystem;

    #[test]
    fn scenarios_have_one_label_per_component() {
        for kind in SystemKind::ALL {
            let scenario = scenario(kind, 12, Some(3)).expect("scenario");
            assert_eq!(scenario.system.kind(), kind);
            assert_eq!(scenario.initial_state.len(), scenario.labels.len());
            assert_eq!(
                DynamicalSystem::<f64>::dimension(&scenario.system),
                scenario.initial_state.len()
            );
        }
    }

    #[test]
    fn heat_scenario_uses_requested_grid() {
        let scenario =
            scenario(SystemKind::HeatEquation1D, DEFAULT_HEAT_POINTS, Some(11)).expect("scenario");
        assert_eq!(scenario.initial_state.len(), 100);
        assert_eq!(scenario.labels[0], "T(x0)");
        assert_eq!(scenario.labels[99], "T(x99)");
        assert!(scenario
            .initial_state
            .iter()
            .all(|v| (0.0..100.0).contains(v)));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn fixed_scenarios_match_reference_initial_states() {
        let pendulum = scenario(SystemKind::DoublePendulum, 0, None).expect("scenario");
        assert_eq!(pendulum.initial_state, vec![0.785, 1.57, 0.0, 0.0]);
        assert_eq!(pendulum.labels, vec!["θ1", "θ2", "ω1", "ω2"]);

        let lv = scenario(SystemKind::LotkaVolterra, 0, None).expect("scenario");
        assert_eq!(lv.initial_state, vec![40.0, 9.0]);
        assert_eq!(lv.labels, vec!["Prey", "Predators"]);
    }

    #[test]
    fn verlet_only_pairs_with_mechanical_systems() {
        assert_eq!(
            select_solver(SolverKind::Verlet, SystemKind::DoublePendulum),
            Ok(SolverKind::Verlet)
        );
        for system in [SystemKind::LotkaVolterra, SystemKind::HeatEquation1D] {
            assert_eq!(
                select_solver(SolverKind::Verlet, system),
                Err(OdeError::ConfigurationMismatch {
                    solver: "verlet".to_string(),
                    system: system.name().to_string(),
                })
            );
        }
        for solver in [SolverKind::Euler, SolverKind::RungeKutta] {
            for system in SystemKind::ALL {
                assert_eq!(select_solver(solver, system), Ok(solver));
            }
        }
    }

    #[test]
    fn select_by_name_reports_unknown_names() {
        assert_eq!(
            select_by_name("lotka_volterra", "runge_kutta"),
            Ok((SystemKind::LotkaVolterra, SolverKind::RungeKutta))
        );
        assert!(matches!(
            select_by_name("pendulum", "euler"),
            Err(OdeError::UnknownSystem(_))
        ));
        assert!(matches!(
            select_by_name("double_pendulum", "midpoint"),
            Err(OdeError::UnknownSolver(_))
        ));
        assert!(matches!(
            select_by_name("lotka_volterra", "verlet"),
            Err(OdeError::ConfigurationMismatch { .. })
        ));
    }
}
