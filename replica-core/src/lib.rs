#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod bitflags;

mod def;
pub use def::*;

mod shape;
pub use shape::*;

mod reflect;
pub use reflect::*;

mod impls;
pub use impls::convert_key;

mod stream;
pub use stream::*;
