//! Explicit-Euler integration of linear time-invariant state-space systems
//!
//! A system is described by `dx/dt = A x + B u`, `y = C x` with a scalar input
//! and a scalar output. The integrator is a pure function: the caller owns the
//! state and receives the advanced copy back.

use nalgebra::{RowSVector, SMatrix, SVector};

/// State-space matrices of a single-input single-output system of order `N`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LtiSystem<const N: usize> {
    /// Feedback matrix
    pub a: SMatrix<f64, N, N>,
    /// Input matrix
    pub b: SVector<f64, N>,
    /// Output matrix
    pub c: RowSVector<f64, N>,
}

impl<const N: usize> LtiSystem<N> {
    /// Create a system from its matrices
    pub fn new(a: SMatrix<f64, N, N>, b: SVector<f64, N>, c: RowSVector<f64, N>) -> Self {
        Self { a, b, c }
    }

    /// Scale the dynamics (`A` and `B`) by `1 / tau`, leaving the output gain untouched
    pub fn with_time_constant(self, tau: f64) -> Self {
        Self {
            a: self.a / tau,
            b: self.b / tau,
            c: self.c,
        }
    }

    /// Advance `x` by one Euler step of size `dt` under input `u`
    #[inline]
    pub fn step(&self, dt: f64, x: SVector<f64, N>, u: f64) -> (SVector<f64, N>, f64) {
        integrate(dt, &self.a, &self.b, &self.c, x, u)
    }
}

/// Single Euler step: `x' = x + dt (A x + B u)`, `y = C x'`
#[inline]
pub fn integrate<const N: usize>(
    dt: f64,
    a: &SMatrix<f64, N, N>,
    b: &SVector<f64, N>,
    c: &RowSVector<f64, N>,
    x: SVector<f64, N>,
    u: f64,
) -> (SVector<f64, N>, f64) {
    let dxdt = a * x + b * u;
    let x = x + dxdt * dt;
    let y = (c * x)[(0, 0)];
    (x, y)
}
