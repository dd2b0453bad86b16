use core::any::Any;
use core::time::Duration;
use std::path::PathBuf;

use super::reflect_methods;
use crate::{Poke, Reflect, ReflectScalar, Shape, Typed};

/// Implements `Reflect`, `Typed` and `ReflectScalar` for a leaf type.
///
/// `from [..]` lists the types that convert into `$ty` through `From`, i.e.
/// without loss. Any other source type is refused.
macro_rules! impl_scalar {
    ($ty:ty => $ident:literal $(, from [$($src:ty),* $(,)?])?) => {
        impl Reflect for $ty {
            reflect_methods!(Scalar);
        }

        impl Typed for $ty {
            const SHAPE: &'static Shape = &const { Shape::scalar($ident) };
        }

        impl ReflectScalar for $ty {
            fn assign_from(&mut self, src: &dyn Reflect) -> bool {
                let src: &dyn Any = src;
                if let Some(value) = src.downcast_ref::<$ty>() {
                    self.clone_from(value);
                    return true;
                }
                $($(
                    if let Some(value) = src.downcast_ref::<$src>() {
                        *self = <$ty as From<$src>>::from(value.clone());
                        return true;
                    }
                )*)?
                false
            }
        }
    };
}

impl_scalar!(() => "()");
impl_scalar!(bool => "bool");
impl_scalar!(char => "char", from [u8]);

impl_scalar!(u8 => "u8", from [bool]);
impl_scalar!(u16 => "u16", from [bool, u8]);
impl_scalar!(u32 => "u32", from [bool, u8, u16, char]);
impl_scalar!(u64 => "u64", from [bool, u8, u16, u32, char]);
impl_scalar!(u128 => "u128", from [bool, u8, u16, u32, u64, char]);
impl_scalar!(usize => "usize", from [bool, u8, u16]);

impl_scalar!(i8 => "i8", from [bool]);
impl_scalar!(i16 => "i16", from [bool, i8, u8]);
impl_scalar!(i32 => "i32", from [bool, i8, i16, u8, u16]);
impl_scalar!(i64 => "i64", from [bool, i8, i16, i32, u8, u16, u32]);
impl_scalar!(i128 => "i128", from [bool, i8, i16, i32, i64, u8, u16, u32, u64]);
impl_scalar!(isize => "isize", from [bool, i8, i16, u8]);

impl_scalar!(f32 => "f32", from [i8, i16, u8, u16]);
impl_scalar!(f64 => "f64", from [f32, i8, i16, i32, u8, u16, u32]);

impl_scalar!(String => "String", from [char, &'static str]);
impl_scalar!(&'static str => "&str");
impl_scalar!(PathBuf => "PathBuf", from [String]);
impl_scalar!(Duration => "Duration");

/// Produce a map key of type `K` from a reflected key.
///
/// Keys are not deep-copied: a key of type `K` is cloned, a key of another
/// leaf type is converted with [`ReflectScalar::assign_from`]. Returns `None`
/// when neither applies.
pub fn convert_key<K: Typed + Clone>(key: &dyn Reflect) -> Option<K> {
    let any: &dyn Any = key;
    if let Some(key) = any.downcast_ref::<K>() {
        return Some(key.clone());
    }

    let mut converted = K::default();
    let assigned = match converted.poke() {
        Poke::Scalar(scalar) => scalar.assign_from(key),
        _ => false,
    };
    assigned.then_some(converted)
}
