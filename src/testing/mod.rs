//! Testing utilities and mock implementations
//!
//! Mock providers for exercising the request path without external
//! dependencies.

pub mod mocks;

pub use mocks::*;
