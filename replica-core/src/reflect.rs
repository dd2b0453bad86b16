use core::any::Any;

use crate::{Field, Kind, Shape};

/// A value whose structure can be inspected and rebuilt at runtime.
///
/// This trait is dyn-compatible: the copier and every other consumer walk
/// values as `&dyn Reflect` / `&mut dyn Reflect`. Because `Reflect: Any`, a
/// `&dyn Reflect` upcasts to `&dyn Any` for downcasting to a concrete type.
///
/// Implemented for std types by this crate and for user types by
/// `#[derive(Reflect)]`.
pub trait Reflect: Any {
    /// The static description of this value's type.
    fn shape(&self) -> &'static Shape;

    /// Read-only view of the value, by shape category.
    fn peek(&self) -> Peek<'_>;

    /// Mutable view of the value, by shape category.
    fn poke(&mut self) -> Poke<'_>;

    /// Replace the value with its zero value, dropping what it held.
    fn reset(&mut self);

    /// Allocate a fresh zero value of the same type.
    fn zeroed(&self) -> Box<dyn Reflect>;
}

/// Types with a statically known shape and a zero value.
///
/// `Default` is the zero value: it is what nested structs are reset to before
/// a copy, and what freshly allocated pointees, list items and map values
/// start as.
pub trait Typed: Reflect + Default {
    /// The shape of `Self`.
    const SHAPE: &'static Shape;
}

/// Returns `T::SHAPE`.
///
/// Used as a function pointer by [`Field::shape`], which keeps the shapes of
/// recursive types free of cycles.
pub fn shape_of<T: Typed>() -> &'static Shape {
    T::SHAPE
}

/// Read/write access to the pointee of a pointer-like value.
pub trait ReflectPointer: Reflect {
    /// The pointee, or `None` if the pointer is null.
    fn pointee(&self) -> Option<&dyn Reflect>;

    /// Mutable access to the pointee.
    ///
    /// `None` if the pointer is null, or if the pointee is shared with other
    /// pointers and therefore not uniquely writable.
    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Bind the pointer to a freshly allocated zero pointee.
    fn allocate(&mut self);

    /// Make this pointer refer to the same pointee as `src`.
    ///
    /// Only shared pointers can alias. Returns `false`, leaving `self`
    /// untouched, when `src` is not the same pointer type or when this pointer
    /// cannot share its pointee.
    fn alias_from(&mut self, src: &dyn Reflect) -> bool;
}

/// Access to the named fields of an aggregate.
pub trait ReflectStruct: Reflect {
    /// The field reflected under `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Mutable access to the field reflected under `name`.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// The fields visible to reflection, in declaration order.
    fn fields(&self) -> &'static [Field] {
        self.shape().fields()
    }
}

/// Access to the items of an ordered sequence.
pub trait ReflectList: Reflect {
    /// Number of items.
    fn len(&self) -> usize;

    /// Whether the sequence has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of items the sequence can hold without reallocating.
    fn capacity(&self) -> usize {
        self.len()
    }

    /// The item at `index`.
    fn item(&self, index: usize) -> Option<&dyn Reflect>;

    /// Mutable access to the item at `index`.
    fn item_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Replace the sequence with a fresh one of `len` zero items, reserving
    /// room for `capacity` items when that much can be allocated. Fixed-size
    /// sequences keep their length and only reset their items.
    fn rebuild(&mut self, len: usize, capacity: usize);
}

/// Access to the entries of a keyed map.
pub trait ReflectMap: Reflect {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the map has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the entries.
    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Replace the map with a fresh empty one.
    fn rebuild(&mut self);

    /// Insert an entry under `key`, whose value starts as the zero value and
    /// is then populated by `fill`.
    ///
    /// The key is cloned when it has the map's key type, and converted with
    /// [`ReflectScalar::assign_from`] otherwise. Returns `false` without
    /// calling `fill` when the key does not convert.
    fn insert_with(&mut self, key: &dyn Reflect, fill: &mut dyn FnMut(&mut dyn Reflect)) -> bool;
}

/// Assignment between leaf values.
pub trait ReflectScalar: Reflect {
    /// Overwrite `self` with `src` if `src` is of the same type, or of a type
    /// that converts into `Self` without loss (`From`). Returns `false`,
    /// leaving `self` untouched, otherwise.
    fn assign_from(&mut self, src: &dyn Reflect) -> bool;
}

/// A read-only view into a value, by shape category.
#[derive(Clone, Copy)]
pub enum Peek<'mem> {
    /// See [`ReflectPointer`]
    Pointer(&'mem dyn ReflectPointer),
    /// See [`ReflectStruct`]
    Struct(&'mem dyn ReflectStruct),
    /// See [`ReflectList`]
    List(&'mem dyn ReflectList),
    /// See [`ReflectMap`]
    Map(&'mem dyn ReflectMap),
    /// See [`ReflectScalar`]
    Scalar(&'mem dyn ReflectScalar),
}

impl<'mem> Peek<'mem> {
    /// The shape category of the viewed value.
    pub fn kind(&self) -> Kind {
        match self {
            Peek::Pointer(_) => Kind::Pointer,
            Peek::Struct(_) => Kind::Struct,
            Peek::List(_) => Kind::List,
            Peek::Map(_) => Kind::Map,
            Peek::Scalar(_) => Kind::Scalar,
        }
    }

    /// The viewed value.
    pub fn value(self) -> &'mem dyn Reflect {
        match self {
            Peek::Pointer(value) => value,
            Peek::Struct(value) => value,
            Peek::List(value) => value,
            Peek::Map(value) => value,
            Peek::Scalar(value) => value,
        }
    }

    /// The shape of the viewed value.
    pub fn shape(&self) -> &'static Shape {
        self.value().shape()
    }

    /// Downcast the viewed value to a concrete type.
    pub fn get<T: Reflect>(self) -> Option<&'mem T> {
        let any: &dyn Any = self.value();
        any.downcast_ref::<T>()
    }
}

impl core::fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Peek<{}>", self.shape())
    }
}

/// A mutable view into a value, by shape category.
pub enum Poke<'mem> {
    /// See [`ReflectPointer`]
    Pointer(&'mem mut dyn ReflectPointer),
    /// See [`ReflectStruct`]
    Struct(&'mem mut dyn ReflectStruct),
    /// See [`ReflectList`]
    List(&'mem mut dyn ReflectList),
    /// See [`ReflectMap`]
    Map(&'mem mut dyn ReflectMap),
    /// See [`ReflectScalar`]
    Scalar(&'mem mut dyn ReflectScalar),
}

impl<'mem> Poke<'mem> {
    /// The shape category of the viewed value.
    pub fn kind(&self) -> Kind {
        match self {
            Poke::Pointer(_) => Kind::Pointer,
            Poke::Struct(_) => Kind::Struct,
            Poke::List(_) => Kind::List,
            Poke::Map(_) => Kind::Map,
            Poke::Scalar(_) => Kind::Scalar,
        }
    }

    /// The viewed value.
    pub fn into_value(self) -> &'mem mut dyn Reflect {
        match self {
            Poke::Pointer(value) => value,
            Poke::Struct(value) => value,
            Poke::List(value) => value,
            Poke::Map(value) => value,
            Poke::Scalar(value) => value,
        }
    }

    /// Downcast the viewed value to a concrete type.
    pub fn get_mut<T: Reflect>(self) -> Option<&'mem mut T> {
        let any: &mut dyn Any = self.into_value();
        any.downcast_mut::<T>()
    }
}

impl core::fmt::Debug for Poke<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Poke<{:?}>", self.kind())
    }
}
