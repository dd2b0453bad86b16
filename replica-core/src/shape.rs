use crate::{Def, Field, Kind, bitflags::bitflags};

bitflags! {
    /// Bit flags for shape-level attributes.
    pub struct ShapeFlags: u16 {
        /// The value is a handle onto an external byte source (a reader, a
        /// socket, a request body). Such values cannot be duplicated: copies
        /// that reach them through a shared pointer share the pointer instead.
        ///
        /// Set by `#[replica(stream)]`.
        const STREAM = 1 << 0;
    }
}

/// Schema for reflection of a type.
///
/// Shapes live in static memory: every [`Typed`](crate::Typed) type exposes one
/// through its `SHAPE` constant, and every reflected value returns its own
/// through [`Reflect::shape`](crate::Reflect::shape).
#[derive(Clone, Copy)]
pub struct Shape {
    /// Name of the type without its generic parameters, e.g. `Vec` or `Request`.
    pub type_identifier: &'static str,

    /// What the type is made of
    pub def: Def,

    /// Shape-level attributes
    pub flags: ShapeFlags,
}

impl Shape {
    /// A leaf shape with no flags.
    pub const fn scalar(type_identifier: &'static str) -> Self {
        Self {
            type_identifier,
            def: Def::Scalar,
            flags: ShapeFlags::empty(),
        }
    }

    /// A shape with the given definition and no flags.
    pub const fn new(type_identifier: &'static str, def: Def) -> Self {
        Self {
            type_identifier,
            def,
            flags: ShapeFlags::empty(),
        }
    }

    /// Returns a copy of this shape with `flags` added.
    pub const fn with_flags(self, flags: ShapeFlags) -> Self {
        Self {
            flags: self.flags.union(flags),
            ..self
        }
    }

    /// Shape category, see [`Kind`].
    #[inline]
    pub const fn kind(&self) -> Kind {
        self.def.kind()
    }

    /// Whether values of this shape are stream handles that must be shared.
    #[inline]
    pub const fn is_stream(&self) -> bool {
        self.flags.contains(ShapeFlags::STREAM)
    }

    /// The fields of a struct shape, or an empty slice for every other shape.
    pub const fn fields(&self) -> &'static [Field] {
        match self.def {
            Def::Struct(struct_def) => struct_def.fields,
            _ => &[],
        }
    }

    /// The item shape of a list or array shape.
    pub const fn item_shape(&self) -> Option<&'static Shape> {
        match self.def {
            Def::List(list_def) => Some(list_def.t),
            Def::Array(array_def) => Some(array_def.t),
            _ => None,
        }
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.def {
            Def::Array(array_def) => write!(f, "[{}; {}]", array_def.t, array_def.n),
            Def::List(list_def) => write!(f, "{}<{}>", self.type_identifier, list_def.t),
            Def::Map(map_def) => {
                write!(f, "{}<{}, {}>", self.type_identifier, map_def.k, map_def.v)
            }
            Def::Pointer(ptr_def) => write!(f, "{}<{}>", self.type_identifier, ptr_def.pointee),
            Def::Scalar | Def::Struct(_) => write!(f, "{}", self.type_identifier),
        }
    }
}

impl core::fmt::Debug for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shape")
            .field("type_identifier", &self.type_identifier)
            .field("def", &self.def)
            .field("flags", &self.flags)
            .finish()
    }
}
