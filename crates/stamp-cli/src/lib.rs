//! Library side of the `stamp` binary.

pub mod args;
pub mod driver;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
