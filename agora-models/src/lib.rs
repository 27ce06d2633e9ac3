//! Numerical microeconomic models built on the `agora-solve` root finders.
//!
//! Each module is a self-contained exercise: [`cournot`] solves the N-firm
//! simultaneous-quantity game, [`exchange`] clears an Edgeworth-box economy,
//! [`production`] clears a two-firm production economy with a
//! worker-consumer, and [`interpolation`] approximates a function over a
//! random point cloud by barycentric coordinates.

pub mod cournot;
pub mod exchange;
pub mod interpolation;
pub mod production;
