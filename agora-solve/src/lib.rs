//! Root-finding building blocks for the Agora models.
//!
//! Two solvers are provided: [`bisection`] for scalar equations with a
//! sign-changing bracket, and [`newton`] for square systems of equations
//! with a Jacobian. Systems describe themselves through the
//! [`ScalarSystem`] and [`VectorSystem`] traits.

pub mod bisection;
pub mod newton;

mod observe;
mod system;

pub use observe::Observer;
pub use system::{ScalarSystem, VectorSystem};
