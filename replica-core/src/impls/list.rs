use std::collections::VecDeque;

use super::reflect_methods;
use crate::{ArrayDef, Def, ListDef, Reflect, ReflectList, Shape, Typed};

impl<T: Typed> Reflect for Vec<T> {
    reflect_methods!(List);
}

impl<T: Typed> Typed for Vec<T> {
    const SHAPE: &'static Shape = &const { Shape::new("Vec", Def::List(ListDef::new(T::SHAPE))) };
}

impl<T: Typed> ReflectList for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    fn item(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|item| item as &dyn Reflect)
    }

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|item| item as &mut dyn Reflect)
    }

    fn rebuild(&mut self, len: usize, capacity: usize) {
        let mut fresh = Vec::new();
        // best effort: `resize_with` allocates `len` items regardless
        let _ = fresh.try_reserve(capacity.max(len));
        fresh.resize_with(len, T::default);
        *self = fresh;
    }
}

impl<T: Typed> Reflect for VecDeque<T> {
    reflect_methods!(List);
}

impl<T: Typed> Typed for VecDeque<T> {
    const SHAPE: &'static Shape =
        &const { Shape::new("VecDeque", Def::List(ListDef::new(T::SHAPE))) };
}

impl<T: Typed> ReflectList for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn capacity(&self) -> usize {
        VecDeque::capacity(self)
    }

    fn item(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|item| item as &dyn Reflect)
    }

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|item| item as &mut dyn Reflect)
    }

    fn rebuild(&mut self, len: usize, capacity: usize) {
        let mut fresh = VecDeque::new();
        // best effort: `resize_with` allocates `len` items regardless
        let _ = fresh.try_reserve(capacity.max(len));
        fresh.resize_with(len, T::default);
        *self = fresh;
    }
}

impl<T: Typed, const N: usize> Reflect for [T; N]
where
    [T; N]: Default,
{
    reflect_methods!(List);
}

impl<T: Typed, const N: usize> Typed for [T; N]
where
    [T; N]: Default,
{
    const SHAPE: &'static Shape = &const { Shape::new("Array", Def::Array(ArrayDef::new(T::SHAPE, N))) };
}

impl<T: Typed, const N: usize> ReflectList for [T; N]
where
    [T; N]: Default,
{
    fn len(&self) -> usize {
        N
    }

    fn item(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|item| item as &dyn Reflect)
    }

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|item| item as &mut dyn Reflect)
    }

    fn rebuild(&mut self, _len: usize, _capacity: usize) {
        for item in self.iter_mut() {
            item.reset();
        }
    }
}
