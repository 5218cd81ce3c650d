use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Floating-point type the equations and steppers are written against.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Converts an `f64` literal into the scalar type.
/// Types that cannot represent the value yield NaN, which the solver's
/// finiteness checks then reject.
pub fn lit<T: Scalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

/// Right-hand side `f(t, y)` of an ODE system `dy/dt = f(t, y)`.
pub trait DynamicalSystem<T: Scalar> {
    /// Length of the state vector.
    fn dimension(&self) -> usize;

    /// Writes `f(t, x)` into `out`; `x` and `out` both have `dimension()` entries.
    fn apply(&self, t: T, x: &[T], out: &mut [T]);

    /// Whether `f` may be read as an acceleration, as position-only schemes
    /// such as Verlet require.
    fn is_mechanical(&self) -> bool {
        true
    }

    /// Name used in error messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Fixed-step scheme advancing `(t, state)` in place.
pub trait Steppable<T: Scalar> {
    /// Moves `state` from `t` to `t + dt` and updates `t`.
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}
