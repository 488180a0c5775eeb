//! Stochastic Runge-Kutta tableaus.

pub mod srid2;
