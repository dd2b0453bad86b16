//! A small bitflags macro for the flag sets carried by shapes.

/// Defines a bitflags struct with the given flags.
///
/// ```ignore
/// bitflags! {
///     /// Documentation for the flags struct
///     pub struct MyFlags: u8 {
///         /// First flag
///         const FLAG_A = 1 << 0;
///     }
/// }
/// ```
///
/// The generated struct is `Copy`, `Eq`, `Hash`, has an `empty()` constructor,
/// `contains`, `union`, `is_empty`, and a `Debug` impl that lists the set
/// flags by name.
macro_rules! bitflags {
    (
        $(#[$outer:meta])*
        $vis:vis struct $Name:ident : $T:ty {
            $(
                $(#[$inner:meta])*
                const $FLAG:ident = $value:expr;
            )*
        }
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        $vis struct $Name($T);

        impl $Name {
            $(
                $(#[$inner])*
                pub const $FLAG: Self = Self($value);
            )*

            /// An empty set of flags.
            #[inline]
            pub const fn empty() -> Self {
                Self(0)
            }

            /// Returns `true` if no flags are set.
            #[inline]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Returns `true` if all flags in `other` are contained in `self`.
            #[inline]
            pub const fn contains(self, other: Self) -> bool {
                (self.0 & other.0) == other.0
            }

            /// Returns the union of `self` and `other`.
            #[inline]
            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }
        }

        impl ::core::fmt::Debug for $Name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                let mut first = true;
                $(
                    if self.0 & $value != 0 {
                        if !first {
                            write!(f, " | ")?;
                        }
                        write!(f, stringify!($FLAG))?;
                        first = false;
                    }
                )*
                if first {
                    write!(f, "(empty)")?;
                }
                Ok(())
            }
        }
    };
}

pub(crate) use bitflags;
