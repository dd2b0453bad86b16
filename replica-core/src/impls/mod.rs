//! [`Reflect`](crate::Reflect) implementations for std types.

/// Implements the `Reflect` methods that only depend on `Self: Default`
/// and on which view the type exposes.
macro_rules! reflect_methods {
    ($variant:ident) => {
        fn shape(&self) -> &'static $crate::Shape {
            <Self as $crate::Typed>::SHAPE
        }

        fn peek(&self) -> $crate::Peek<'_> {
            $crate::Peek::$variant(self)
        }

        fn poke(&mut self) -> $crate::Poke<'_> {
            $crate::Poke::$variant(self)
        }

        fn reset(&mut self) {
            *self = <Self as ::core::default::Default>::default();
        }

        fn zeroed(&self) -> Box<dyn $crate::Reflect> {
            Box::new(<Self as ::core::default::Default>::default())
        }
    };
}

pub(crate) use reflect_methods;

mod scalar;
pub use scalar::convert_key;

mod pointer;

mod list;

mod map;
