use crate::traits::{lit, DynamicalSystem, Scalar, Steppable};

/// Forward Euler: `y += dt * f(t, y)`.
pub struct Euler<T: Scalar> {
    k: Vec<T>,
}

impl<T: Scalar> Euler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            k: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Euler<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        system.apply(*t, state, &mut self.k);
        for i in 0..state.len() {
            state[i] = state[i] + dt * self.k[i];
        }
        *t = *t + dt;
    }
}

/// Fourth-order Runge-Kutta with the 1/6, 1/3, 1/3, 1/6 weights.
///
/// The four slopes and the trial state live in buffers sized once at
/// construction, so stepping does not allocate.
pub struct RK4<T: Scalar> {
    slopes: [Vec<T>; 4],
    trial: Vec<T>,
}

impl<T: Scalar> RK4<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            slopes: std::array::from_fn(|_| vec![T::zero(); dim]),
            trial: vec![T::zero(); dim],
        }
    }
}

// trial = y + h * k
fn offset<T: Scalar>(trial: &mut [T], y: &[T], k: &[T], h: T) {
    for ((out, &yi), &ki) in trial.iter_mut().zip(y).zip(k) {
        *out = yi + h * ki;
    }
}

impl<T: Scalar> Steppable<T> for RK4<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        let half_dt = dt * lit::<T>(0.5);
        let two = lit::<T>(2.0);
        let t0 = *t;
        let [k1, k2, k3, k4] = &mut self.slopes;

        system.apply(t0, state, k1);
        offset(&mut self.trial, state, k1, half_dt);
        system.apply(t0 + half_dt, &self.trial, k2);
        offset(&mut self.trial, state, k2, half_dt);
        system.apply(t0 + half_dt, &self.trial, k3);
        offset(&mut self.trial, state, k3, dt);
        system.apply(t0 + dt, &self.trial, k4);

        let weight = dt / lit::<T>(6.0);
        for (i, y) in state.iter_mut().enumerate() {
            *y = *y + weight * (k1[i] + two * (k2[i] + k3[i]) + k4[i]);
        }
        *t = t0 + dt;
    }
}

/// Position Verlet Solver
///
/// Two-point scheme y_{n+1} = 2 y_n - y_{n-1} + dt^2 f(t_n, y_n), where f is an
/// acceleration. The first history point is a one-step backward estimate
/// y_{-1} = y_0 - dt f(t_0, y_0).
pub struct Verlet<T: Scalar> {
    prev: Vec<T>,
    accel: Vec<T>,
}

impl<T: Scalar> Verlet<T> {
    pub fn new(system: &impl DynamicalSystem<T>, t0: T, y0: &[T], dt: T) -> Self {
        let mut accel = vec![T::zero(); y0.len()];
        system.apply(t0, y0, &mut accel);
        let prev = y0
            .iter()
            .zip(&accel)
            .map(|(&y, &a)| y - dt * a)
            .collect();
        Self { prev, accel }
    }

    /// The state one step behind the current one.
    pub fn previous(&self) -> &[T] {
        &self.prev
    }
}

impl<T: Scalar> Steppable<T> for Verlet<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        let two = lit::<T>(2.0);
        let dt2 = dt * dt;

        system.apply(*t, state, &mut self.accel);

        for i in 0..state.len() {
            let next = two * state[i] - self.prev[i] + dt2 * self.accel[i];
            self.prev[i] = state[i];
            state[i] = next;
        }

        *t = *t + dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // dy/dt = -y, or read as an acceleration: x'' = -x.
    struct Decay;

    impl DynamicalSystem<f64> for Decay {
        fn dimension(&self) -> usize {
            1
        }

        fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
            out[0] = -x[0];
        }
    }

    #[test]
    fn euler_single_step_on_decay() {
        let mut stepper = Euler::<f64>::new(1);
        let mut t = 0.0_f64;
        let mut y = [1.0_f64];
        stepper.step(&Decay, &mut t, &mut y, 0.1);
        assert!((y[0] - 0.9).abs() < 1e-15);
        assert!((t - 0.1).abs() < 1e-15);
    }

    #[test]
    fn rk4_single_step_on_decay() {
        let mut stepper = RK4::<f64>::new(1);
        let mut t = 0.0_f64;
        let mut y = [1.0_f64];
        stepper.step(&Decay, &mut t, &mut y, 0.1);
        let exact = (-0.1_f64).exp();
        assert!((y[0] - 0.904837).abs() < 1e-6);
        assert!((y[0] - exact).abs() < 1e-6);
    }

    #[test]
    fn rk4_beats_euler_for_same_step() {
        let exact = (-0.1_f64).exp();

        let mut euler = Euler::<f64>::new(1);
        let (mut te, mut ye) = (0.0_f64, [1.0_f64]);
        euler.step(&Decay, &mut te, &mut ye, 0.1);

        let mut rk4 = RK4::<f64>::new(1);
        let (mut tr, mut yr) = (0.0_f64, [1.0_f64]);
        rk4.step(&Decay, &mut tr, &mut yr, 0.1);

        assert!((yr[0] - exact).abs() < (ye[0] - exact).abs());
    }

    #[test]
    fn verlet_seeds_backward_history() {
        let stepper = Verlet::<f64>::new(&Decay, 0.0, &[1.0], 0.1);
        // prev = 1 - 0.1 * (-1)
        assert!((stepper.previous()[0] - 1.1).abs() < 1e-15);
    }

    #[test]
    fn verlet_step_uses_two_point_recurrence() {
        let mut stepper = Verlet::<f64>::new(&Decay, 0.0, &[1.0], 0.1);
        let mut t = 0.0_f64;
        let mut y = [1.0_f64];
        stepper.step(&Decay, &mut t, &mut y, 0.1);
        // 2 * 1 - 1.1 + 0.01 * (-1)
        assert!((y[0] - 0.89).abs() < 1e-12);
        assert!((stepper.previous()[0] - 1.0).abs() < 1e-15);
        assert!((t - 0.1).abs() < 1e-15);
    }

    #[test]
    fn verlet_tracks_harmonic_oscillator_with_consistent_history() {
        // With exact history the scheme is second order on x'' = -x.
        let dt: f64 = 0.01;
        let mut stepper = Verlet::<f64>::new(&Decay, 0.0, &[1.0], dt);
        stepper.prev[0] = (-dt).cos();
        let mut t = 0.0_f64;
        let mut y = [1.0_f64];
        for _ in 0..100 {
            stepper.step(&Decay, &mut t, &mut y, dt);
        }
        assert!((y[0] - t.cos()).abs() < 1e-4);
    }
}
