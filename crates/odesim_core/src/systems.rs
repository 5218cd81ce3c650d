//! Toy physical systems expressed as `DynamicalSystem`s.
//!
//! Each system is a [`ParameterSet`] plus a [`SystemKind`] that selects the
//! governing equations. Parameters are validated and resolved into plain
//! coefficients once, when the system is built, so evaluating the vector
//! field never touches the map.

use crate::error::{OdeError, Result};
use crate::params::ParameterSet;
use crate::traits::{lit, DynamicalSystem, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemKind {
    #[serde(rename = "double_pendulum")]
    DoublePendulum,
    #[serde(rename = "lotka_volterra")]
    LotkaVolterra,
    #[serde(rename = "heat_equation_1d")]
    HeatEquation1D,
}

impl SystemKind {
    pub const ALL: [SystemKind; 3] = [
        SystemKind::DoublePendulum,
        SystemKind::LotkaVolterra,
        SystemKind::HeatEquation1D,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SystemKind::DoublePendulum => "double_pendulum",
            SystemKind::LotkaVolterra => "lotka_volterra",
            SystemKind::HeatEquation1D => "heat_equation_1d",
        }
    }

    pub fn required_parameters(self) -> &'static [&'static str] {
        match self {
            SystemKind::DoublePendulum => &["g", "l1", "l2", "m1", "m2"],
            SystemKind::LotkaVolterra => &["a", "b", "c", "d"],
            SystemKind::HeatEquation1D => &["alpha", "dx"],
        }
    }

    /// Whether the system is acceleration-driven, i.e. usable with Verlet.
    pub fn is_mechanical(self) -> bool {
        matches!(self, SystemKind::DoublePendulum)
    }

    /// State length for systems whose dimension is fixed by the equations.
    pub fn fixed_dimension(self) -> Option<usize> {
        match self {
            SystemKind::DoublePendulum => Some(4),
            SystemKind::LotkaVolterra => Some(2),
            SystemKind::HeatEquation1D => None,
        }
    }

    pub fn default_parameters(self) -> ParameterSet {
        Coefficients::defaults(self).to_parameters()
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SystemKind {
    type Err = OdeError;

    fn from_str(s: &str) -> Result<Self> {
        SystemKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| OdeError::UnknownSystem(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendulumCoefficients {
    g: f64,
    l1: f64,
    l2: f64,
    m1: f64,
    m2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PredatorPreyCoefficients {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DiffusionCoefficients {
    alpha: f64,
    dx: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Coefficients {
    DoublePendulum(PendulumCoefficients),
    LotkaVolterra(PredatorPreyCoefficients),
    HeatEquation1D(DiffusionCoefficients),
}

impl Coefficients {
    fn defaults(kind: SystemKind) -> Self {
        match kind {
            SystemKind::DoublePendulum => Coefficients::DoublePendulum(PendulumCoefficients {
                g: 9.81,
                l1: 1.0,
                l2: 1.0,
                m1: 1.0,
                m2: 1.0,
            }),
            SystemKind::LotkaVolterra => Coefficients::LotkaVolterra(PredatorPreyCoefficients {
                a: 0.1,
                b: 0.02,
                c: 0.01,
                d: 0.1,
            }),
            SystemKind::HeatEquation1D => Coefficients::HeatEquation1D(DiffusionCoefficients {
                alpha: 0.01,
                dx: 0.1,
            }),
        }
    }

    fn to_parameters(self) -> ParameterSet {
        match self {
            Coefficients::DoublePendulum(c) => ParameterSet::new([
                ("g", c.g),
                ("l1", c.l1),
                ("l2", c.l2),
                ("m1", c.m1),
                ("m2", c.m2),
            ]),
            Coefficients::LotkaVolterra(c) => {
                ParameterSet::new([("a", c.a), ("b", c.b), ("c", c.c), ("d", c.d)])
            }
            Coefficients::HeatEquation1D(c) => {
                ParameterSet::new([("alpha", c.alpha), ("dx", c.dx)])
            }
        }
    }

    fn resolve(kind: SystemKind, params: &ParameterSet) -> Result<Self> {
        let name = kind.name();
        params.validate(name, kind.required_parameters())?;
        let p = |key: &str| params.require(name, key);
        Ok(match kind {
            SystemKind::DoublePendulum => Coefficients::DoublePendulum(PendulumCoefficients {
                g: p("g")?,
                l1: p("l1")?,
                l2: p("l2")?,
                m1: p("m1")?,
                m2: p("m2")?,
            }),
            SystemKind::LotkaVolterra => Coefficients::LotkaVolterra(PredatorPreyCoefficients {
                a: p("a")?,
                b: p("b")?,
                c: p("c")?,
                d: p("d")?,
            }),
            SystemKind::HeatEquation1D => Coefficients::HeatEquation1D(DiffusionCoefficients {
                alpha: p("alpha")?,
                dx: p("dx")?,
            }),
        })
    }
}

/// A physical system: governing equations bound to a frozen parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalSystem {
    kind: SystemKind,
    params: ParameterSet,
    coefficients: Coefficients,
    dimension: usize,
}

impl PhysicalSystem {
    /// Builds a system from explicit parameters.
    ///
    /// `dimension` is the state length. It must equal the fixed dimension for
    /// the pendulum (4) and Lotka-Volterra (2); for the heat equation it is the
    /// number of grid points and must be at least one.
    pub fn new(kind: SystemKind, params: ParameterSet, dimension: usize) -> Result<Self> {
        match kind.fixed_dimension() {
            Some(expected) if expected != dimension => {
                return Err(OdeError::invalid(format!(
                    "{kind} has state dimension {expected}, got {dimension}"
                )));
            }
            None if dimension == 0 => {
                return Err(OdeError::invalid(format!(
                    "{kind} needs at least one grid point"
                )));
            }
            _ => {}
        }
        let coefficients = Coefficients::resolve(kind, &params)?;
        Ok(Self {
            kind,
            params,
            coefficients,
            dimension,
        })
    }

    pub fn kind(&self) -> SystemKind {
        self.kind
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Evaluates the governing equations at `(t, y)` into a fresh vector.
    ///
    /// `y` must have exactly the system's state dimension.
    pub fn get_derivative<T: Scalar>(&self, t: T, y: &[T]) -> Result<Vec<T>> {
        if y.len() != self.dimension {
            return Err(OdeError::invalid(format!(
                "{} expects a state of length {}, got {}",
                self.kind,
                self.dimension,
                y.len()
            )));
        }
        let mut out = vec![T::zero(); y.len()];
        self.apply(t, y, &mut out);
        Ok(out)
    }
}

/// Double pendulum with literature defaults (`g = 9.81`, unit lengths and masses).
pub fn create_double_pendulum() -> PhysicalSystem {
    default_system(SystemKind::DoublePendulum, 4)
}

/// Lotka-Volterra predator-prey model with `a = 0.1, b = 0.02, c = 0.01, d = 0.1`.
pub fn create_lotka_volterra() -> PhysicalSystem {
    default_system(SystemKind::LotkaVolterra, 2)
}

/// 1D heat equation on `points` grid nodes with `alpha = 0.01, dx = 0.1`.
pub fn create_heat_equation_1d(points: usize) -> Result<PhysicalSystem> {
    PhysicalSystem::new(
        SystemKind::HeatEquation1D,
        SystemKind::HeatEquation1D.default_parameters(),
        points,
    )
}

fn default_system(kind: SystemKind, dimension: usize) -> PhysicalSystem {
    let coefficients = Coefficients::defaults(kind);
    PhysicalSystem {
        kind,
        params: coefficients.to_parameters(),
        coefficients,
        dimension,
    }
}

impl<T: Scalar> DynamicalSystem<T> for PhysicalSystem {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn apply(&self, _t: T, x: &[T], out: &mut [T]) {
        match &self.coefficients {
            Coefficients::DoublePendulum(c) => double_pendulum(c, x, out),
            Coefficients::LotkaVolterra(c) => lotka_volterra(c, x, out),
            Coefficients::HeatEquation1D(c) => heat_equation_1d(c, x, out),
        }
    }

    fn is_mechanical(&self) -> bool {
        self.kind.is_mechanical()
    }

    fn name(&self) -> &str {
        self.kind.name()
    }
}

// State: [θ1, θ2, ω1, ω2]
fn double_pendulum<T: Scalar>(c: &PendulumCoefficients, x: &[T], out: &mut [T]) {
    let g = lit::<T>(c.g);
    let (l1, l2) = (lit::<T>(c.l1), lit::<T>(c.l2));
    let (m1, m2) = (lit::<T>(c.m1), lit::<T>(c.m2));
    let (theta1, theta2, omega1, omega2) = (x[0], x[1], x[2], x[3]);
    let m = m1 + m2;

    let delta = theta2 - theta1;
    let (sin_d, cos_d) = (delta.sin(), delta.cos());

    let den1 = m * l1 - m2 * l1 * cos_d * cos_d;
    let den2 = (l2 / l1) * den1;

    let domega1 = (m2 * l1 * omega1 * omega1 * sin_d * cos_d
        + m2 * g * theta2.sin() * cos_d
        + m2 * l2 * omega2 * omega2 * sin_d
        - m * g * theta1.sin())
        / den1;

    let domega2 = (-m2 * l2 * omega2 * omega2 * sin_d * cos_d
        + m * g * theta1.sin() * cos_d
        - m * l1 * omega1 * omega1 * sin_d
        - m * g * theta2.sin())
        / den2;

    out[0] = omega1;
    out[1] = omega2;
    out[2] = domega1;
    out[3] = domega2;
}

// State: [prey, predator]
fn lotka_volterra<T: Scalar>(c: &PredatorPreyCoefficients, x: &[T], out: &mut [T]) {
    let (a, b) = (lit::<T>(c.a), lit::<T>(c.b));
    let (gain, d) = (lit::<T>(c.c), lit::<T>(c.d));
    let (prey, predator) = (x[0], x[1]);
    out[0] = a * prey - b * prey * predator;
    out[1] = gain * prey * predator - d * predator;
}

// Second-order central differences on the interior; both ends have zero
// derivative, so boundary temperatures never change.
fn heat_equation_1d<T: Scalar>(c: &DiffusionCoefficients, x: &[T], out: &mut [T]) {
    let alpha = lit::<T>(c.alpha);
    let dx = lit::<T>(c.dx);
    let two = lit::<T>(2.0);
    let scale = alpha / (dx * dx);

    for value in out.iter_mut() {
        *value = T::zero();
    }
    let n = x.len();
    if n < 3 {
        return;
    }
    for i in 1..n - 1 {
        out[i] = scale * (x[i - 1] - two * x[i] + x[i + 1]);
    }
}
