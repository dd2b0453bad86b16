use core::any::Any;
use std::sync::Arc;

use crate::tracing_macros::{debug, trace};
use crate::{
    CopyError, Peek, Poke, Reflect, ReflectList, ReflectMap, ReflectPointer, ReflectScalar,
    ReflectStruct, Shape, Typed,
};

type AliasPredicate = dyn Fn(&'static Shape) -> bool + Send + Sync;

/// Deep-copies reflected values, including between different types.
///
/// The copy walks source and destination side by side:
///
/// - pointers: a non-null source gets a freshly allocated pointee in the
///   destination, which is then copied into; a null source leaves the
///   destination untouched;
/// - structs: every destination field is copied from the source field with the
///   same name, if there is one. Nested structs are reset to their zero value
///   first, the root is not;
/// - lists: the destination is rebuilt with the source's length, then copied
///   item by item;
/// - maps: the destination is rebuilt empty, then every source entry is copied
///   into a fresh value;
/// - leaves: assigned when the source converts into the destination without
///   loss.
///
/// Anything that does not line up (different shape categories, a field with no
/// counterpart, a leaf that does not convert) is skipped silently, so related
/// but different types can be copied into one another.
///
/// Pointers whose pointee matches the alias predicate are shared instead of
/// copied: by default, pointers to [`Stream`](crate::Stream)s and other
/// `#[replica(stream)]` types.
#[derive(Clone, Default)]
pub struct Copier {
    alias: Option<Arc<AliasPredicate>>,
}

impl core::fmt::Debug for Copier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Copier")
            .field("custom_alias", &self.alias.is_some())
            .finish()
    }
}

impl Copier {
    /// A copier that shares pointers to stream shapes and deep-copies
    /// everything else.
    pub const fn new() -> Self {
        Self { alias: None }
    }

    /// Replace the predicate deciding which pointers are shared rather than
    /// deep-copied. It is called with the shape of the pointee.
    ///
    /// Only shared pointers (`Rc`, `Arc`) can be shared into the destination;
    /// other pointers accepted by the predicate are left untouched.
    pub fn alias_when(
        mut self,
        predicate: impl Fn(&'static Shape) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.alias = Some(Arc::new(predicate));
        self
    }

    /// Copy `src` into `dst`.
    ///
    /// Fields of the root `dst` that have no counterpart in `src` keep their
    /// current value.
    pub fn copy_into(&self, dst: &mut dyn Reflect, src: &dyn Reflect) {
        debug!("copy_into: {} <- {}", dst.shape(), src.shape());
        self.copy_value(dst, src, true);
    }

    /// Copy `src` into a type-erased destination.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is `None`. See [`Copier::try_copy_into`] for the
    /// non-panicking form.
    pub fn copy_into_dyn(&self, dst: Option<&mut dyn Reflect>, src: &dyn Reflect) {
        if let Err(err) = self.try_copy_into(dst, src) {
            panic!("{err}");
        }
    }

    /// Copy `src` into a type-erased destination, failing if there is none.
    pub fn try_copy_into(
        &self,
        dst: Option<&mut dyn Reflect>,
        src: &dyn Reflect,
    ) -> Result<(), CopyError> {
        let dst = dst.ok_or(CopyError::NullDestination)?;
        self.copy_into(dst, src);
        Ok(())
    }

    /// Allocate a new `T` and copy `src` into it.
    pub fn copy_of<T: Typed>(&self, src: &T) -> Box<T> {
        debug!("copy_of: {}", T::SHAPE);
        let mut dst = Box::<T>::default();
        self.copy_value(&mut *dst, src, true);
        dst
    }

    /// Allocate a new pointer of the same type as `src`, bound to a fresh
    /// pointee, and copy `src` into it.
    ///
    /// # Panics
    ///
    /// Panics if `src` is not a pointer. See [`Copier::try_copy_of`] for the
    /// non-panicking form.
    pub fn copy_of_dyn(&self, src: &dyn Reflect) -> Box<dyn Reflect> {
        self.try_copy_of(src).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Allocate a new pointer of the same type as `src`, bound to a fresh
    /// pointee, and copy `src` into it, failing if `src` is not a pointer.
    pub fn try_copy_of(&self, src: &dyn Reflect) -> Result<Box<dyn Reflect>, CopyError> {
        let shape = src.shape();
        let Peek::Pointer(_) = src.peek() else {
            return Err(CopyError::NotAPointer { shape });
        };

        debug!("copy_of: {shape}");
        let mut dst = src.zeroed();
        if let Poke::Pointer(ptr) = (*dst).poke() {
            ptr.allocate();
        }
        self.copy_value(&mut *dst, src, true);
        Ok(dst)
    }

    fn should_alias(&self, pointee: &'static Shape) -> bool {
        match &self.alias {
            Some(predicate) => predicate(pointee),
            None => pointee.is_stream(),
        }
    }

    /// `root` is set for the outermost value, and stays set through pointers
    /// until the first struct.
    fn copy_value(&self, dst: &mut dyn Reflect, src: &dyn Reflect, root: bool) {
        if dst.shape().kind() != src.shape().kind() {
            trace!("kinds differ, skipping {} <- {}", dst.shape(), src.shape());
            return;
        }

        match (dst.poke(), src.peek()) {
            (Poke::Pointer(dst), Peek::Pointer(src)) => self.copy_pointer(dst, src, root),
            (Poke::Struct(dst), Peek::Struct(src)) => self.copy_struct(dst, src, root),
            (Poke::List(dst), Peek::List(src)) => self.copy_list(dst, src),
            (Poke::Map(dst), Peek::Map(src)) => self.copy_map(dst, src),
            (Poke::Scalar(dst), Peek::Scalar(src)) => self.copy_scalar(dst, src),
            _ => {}
        }
    }

    fn copy_pointer(&self, dst: &mut dyn ReflectPointer, src: &dyn ReflectPointer, root: bool) {
        let Ok(def) = src.shape().def.into_pointer() else {
            return;
        };
        if self.should_alias(def.pointee) {
            self.alias_pointer(dst, src);
            return;
        }

        let Some(src_pointee) = src.pointee() else {
            trace!("{} is null, leaving {} untouched", src.shape(), dst.shape());
            return;
        };
        dst.allocate();
        if let Some(dst_pointee) = dst.pointee_mut() {
            self.copy_value(dst_pointee, src_pointee, root);
        }
    }

    fn alias_pointer(&self, dst: &mut dyn ReflectPointer, src: &dyn ReflectPointer) {
        // through one level of indirection first
        if let Some(inner) = dst.pointee_mut()
            && let Poke::Pointer(inner) = inner.poke()
            && inner.alias_from(src)
        {
            return;
        }

        if !dst.alias_from(src) {
            trace!("{} cannot share {}, skipping", dst.shape(), src.shape());
        }
    }

    fn copy_struct(&self, dst: &mut dyn ReflectStruct, src: &dyn ReflectStruct, root: bool) {
        if !root {
            dst.reset();
        }

        for field in dst.fields() {
            let Some(src_field) = src.field(field.name) else {
                trace!("{} has no field `{}`, skipping", src.shape(), field.name);
                continue;
            };
            if let Some(dst_field) = dst.field_mut(field.name) {
                self.copy_value(dst_field, src_field, false);
            }
        }
    }

    fn copy_list(&self, dst: &mut dyn ReflectList, src: &dyn ReflectList) {
        // capacity counts source items, which only size the destination when
        // both lists hold the same item type
        let capacity = if holds_same_items(&*dst, src) {
            src.capacity()
        } else {
            src.len()
        };
        dst.rebuild(src.len(), capacity);

        for index in 0..src.len() {
            let (Some(dst_item), Some(src_item)) = (dst.item_mut(index), src.item(index)) else {
                trace!("{} holds fewer than {} items", dst.shape(), src.len());
                break;
            };
            self.copy_value(dst_item, src_item, false);
        }
    }

    fn copy_map(&self, dst: &mut dyn ReflectMap, src: &dyn ReflectMap) {
        dst.rebuild();

        for (key, value) in src.entries() {
            let inserted = dst.insert_with(key, &mut |slot| self.copy_value(slot, value, false));
            if !inserted {
                trace!("key {} does not convert into {}, skipping", key.shape(), dst.shape());
            }
        }
    }

    fn copy_scalar(&self, dst: &mut dyn ReflectScalar, src: &dyn ReflectScalar) {
        if !dst.assign_from(src) {
            trace!("{} does not convert into {}, skipping", src.shape(), dst.shape());
        }
    }
}

fn holds_same_items(dst: &dyn ReflectList, src: &dyn ReflectList) -> bool {
    let (dst_any, src_any): (&dyn Any, &dyn Any) = (dst, src);
    if Any::type_id(dst_any) == Any::type_id(src_any) {
        return true;
    }
    match (dst.shape().item_shape(), src.shape().item_shape()) {
        (Some(dst_item), Some(src_item)) => core::ptr::eq(dst_item, src_item),
        _ => false,
    }
}

/// Copy `src` into `dst` with the default [`Copier`].
///
/// ```
/// use replica::Reflect;
///
/// #[derive(Default, Reflect)]
/// struct Request {
///     id: u64,
///     tags: Vec<String>,
/// }
///
/// #[derive(Default, Reflect)]
/// struct Summary {
///     id: u64,
///     retries: u32,
/// }
///
/// let request = Request { id: 7, tags: vec!["a".into()] };
/// let mut summary = Summary::default();
/// replica::copy_into(&mut summary, &request);
/// assert_eq!(summary.id, 7);
/// assert_eq!(summary.retries, 0);
/// ```
pub fn copy_into(dst: &mut dyn Reflect, src: &dyn Reflect) {
    Copier::new().copy_into(dst, src);
}

/// Allocate a deep copy of `src` with the default [`Copier`].
///
/// ```
/// use replica::Reflect;
///
/// #[derive(Default, Reflect)]
/// struct Request {
///     tags: Vec<String>,
/// }
///
/// let original = Request { tags: vec!["a".into()] };
/// let mut copy = replica::copy_of(&original);
/// copy.tags.push("b".into());
/// assert_eq!(original.tags.len(), 1);
/// ```
pub fn copy_of<T: Typed>(src: &T) -> Box<T> {
    Copier::new().copy_of(src)
}
