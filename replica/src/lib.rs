#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

// lets the derive's `::replica` paths resolve inside this crate
extern crate self as replica;

mod tracing_macros;

pub use replica_core::*;

pub use replica_macros::Reflect;

mod error;
pub use error::*;

mod copy;
pub use copy::*;
