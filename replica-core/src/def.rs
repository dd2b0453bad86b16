use crate::{Shape, bitflags::bitflags};

/// The semantic definition of a shape: is it a struct, a list, a map, a
/// pointer, or a leaf?
#[derive(Clone, Copy)]
#[non_exhaustive]
pub enum Def {
    /// Leaf values that are not composed of other reflected values.
    ///
    /// e.g. `u32`, `String`, `bool`, unit-like enums
    Scalar,

    /// Aggregate with named fields
    ///
    /// e.g. `struct Request { id: u64, tags: Vec<String> }`
    Struct(StructDef),

    /// Ordered list of homogeneous values, variable size
    ///
    /// e.g. `Vec<T>`, `VecDeque<T>`
    List(ListDef),

    /// Fixed-size array of homogeneous values
    ///
    /// e.g. `[T; 3]`
    Array(ArrayDef),

    /// Map from keys to homogeneous values
    ///
    /// e.g. `HashMap<String, T>`, `BTreeMap<u32, T>`
    Map(MapDef),

    /// Indirections: nullable (`Option<T>`), owning (`Box<T>`) or shared
    /// (`Rc<T>`, `Arc<T>`)
    Pointer(PointerDef),
}

impl core::fmt::Debug for Def {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Def::Scalar => write!(f, "Scalar"),
            Def::Struct(struct_def) => write!(f, "Struct({} fields)", struct_def.fields.len()),
            Def::List(list_def) => write!(f, "List<{}>", list_def.t),
            Def::Array(array_def) => write!(f, "Array<{}; {}>", array_def.t, array_def.n),
            Def::Map(map_def) => write!(f, "Map<{}, {}>", map_def.k, map_def.v),
            Def::Pointer(ptr_def) => write!(f, "{:?}<{}>", ptr_def.known, ptr_def.pointee),
        }
    }
}

impl Def {
    /// Returns the shape category used to decide whether two values can be
    /// copied into one another.
    pub const fn kind(&self) -> Kind {
        match self {
            Def::Scalar => Kind::Scalar,
            Def::Struct(_) => Kind::Struct,
            Def::List(_) | Def::Array(_) => Kind::List,
            Def::Map(_) => Kind::Map,
            Def::Pointer(_) => Kind::Pointer,
        }
    }

    /// Returns the `PointerDef` wrapped in an `Ok` if this is a [`Def::Pointer`].
    pub const fn into_pointer(self) -> Result<PointerDef, Self> {
        match self {
            Self::Pointer(def) => Ok(def),
            _ => Err(self),
        }
    }
}

/// Coarse shape category of a value.
///
/// Two values whose kinds differ are never copied into one another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `Option`, `Box`, `Rc`, `Arc`
    Pointer,
    /// Aggregates with named fields
    Struct,
    /// Lists and fixed-size arrays
    List,
    /// Keyed maps
    Map,
    /// Everything else
    Scalar,
}

/// Fields of a struct, in declaration order.
#[derive(Clone, Copy, Debug)]
pub struct StructDef {
    /// the fields visible to reflection
    pub fields: &'static [Field],
}

impl StructDef {
    /// Construct a `StructDef` from its fields.
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// Look up a field by the name it is reflected under.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Describes a field of a struct.
#[derive(Clone, Copy)]
pub struct Field {
    /// name the field is reflected (and matched) under
    ///
    /// For tuple structs this is the 0-based index.
    pub name: &'static str,

    /// shape of the field's type
    ///
    /// the layer of indirection allows for recursive type definitions
    pub shape: fn() -> &'static Shape,
}

impl Field {
    /// Returns the shape of the field's type.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

impl core::fmt::Debug for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.name, self.shape())
    }
}

/// Fields for list types
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// shape of the items in the list
    pub t: &'static Shape,
}

impl ListDef {
    /// Construct a `ListDef` from its item shape.
    pub const fn new(t: &'static Shape) -> Self {
        Self { t }
    }
}

/// Fields for fixed-size array types
#[derive(Clone, Copy, Debug)]
pub struct ArrayDef {
    /// shape of the items in the array
    pub t: &'static Shape,
    /// length of the array
    pub n: usize,
}

impl ArrayDef {
    /// Construct an `ArrayDef` from its item shape and length.
    pub const fn new(t: &'static Shape, n: usize) -> Self {
        Self { t, n }
    }
}

/// Fields for map types
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// shape of the keys in the map
    pub k: &'static Shape,
    /// shape of the values in the map
    pub v: &'static Shape,
}

impl MapDef {
    /// Construct a `MapDef` from its key and value shapes.
    pub const fn new(k: &'static Shape, v: &'static Shape) -> Self {
        Self { k, v }
    }
}

/// Describes a pointer: which kind it is and what it points to.
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// shape of the pointee
    pub pointee: &'static Shape,

    /// which std pointer this is
    pub known: KnownPointer,

    /// characteristics of the pointer
    pub flags: PointerFlags,
}

impl PointerDef {
    /// Construct a `PointerDef` for a known pointer.
    pub const fn new(pointee: &'static Shape, known: KnownPointer) -> Self {
        let flags = match known {
            KnownPointer::Option => PointerFlags::NULLABLE,
            KnownPointer::Box => PointerFlags::empty(),
            KnownPointer::Rc | KnownPointer::Arc => PointerFlags::SHARED,
        };
        Self {
            pointee,
            known,
            flags,
        }
    }

    /// Whether the pointer can be null.
    pub const fn is_nullable(&self) -> bool {
        self.flags.contains(PointerFlags::NULLABLE)
    }

    /// Whether several pointers can refer to the same pointee.
    pub const fn is_shared(&self) -> bool {
        self.flags.contains(PointerFlags::SHARED)
    }
}

bitflags! {
    /// Flags to represent various characteristics of pointers
    pub struct PointerFlags: u8 {
        /// The pointer may hold no pointee (`None`)
        const NULLABLE = 1 << 0;
        /// The pointee may be shared by several pointers
        const SHARED = 1 << 1;
    }
}

/// Std pointers known to the reflection facility
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnownPointer {
    /// [`Option<T>`], a nullable inline value
    Option,
    /// [`Box<T>`](std::boxed::Box), heap-allocated values with single ownership
    Box,
    /// [`Rc<T>`](std::rc::Rc), reference-counted values with multiple ownership
    Rc,
    /// [`Arc<T>`](std::sync::Arc), thread-safe reference-counted values with multiple ownership
    Arc,
}
