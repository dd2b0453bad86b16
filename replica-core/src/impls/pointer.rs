use core::any::Any;
use std::rc::Rc;
use std::sync::Arc;

use super::reflect_methods;
use crate::{Def, KnownPointer, PointerDef, Poke, Reflect, ReflectPointer, Shape, Typed};

impl<T: Typed> Reflect for Option<T> {
    reflect_methods!(Pointer);
}

impl<T: Typed> Typed for Option<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "Option",
            Def::Pointer(PointerDef::new(T::SHAPE, KnownPointer::Option)),
        )
    };
}

impl<T: Typed> ReflectPointer for Option<T> {
    fn pointee(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    fn allocate(&mut self) {
        *self = Some(T::default());
    }

    fn alias_from(&mut self, src: &dyn Reflect) -> bool {
        let any: &dyn Any = src;
        let Some(src) = any.downcast_ref::<Self>() else {
            return false;
        };

        let Some(inner) = src else {
            *self = None;
            return true;
        };

        // an `Option` aliases when the pointer it holds does
        let mut slot = T::default();
        let aliased = match slot.poke() {
            Poke::Pointer(ptr) => ptr.alias_from(inner),
            _ => false,
        };
        if aliased {
            *self = Some(slot);
        }
        aliased
    }
}

impl<T: Typed> Reflect for Box<T> {
    reflect_methods!(Pointer);
}

impl<T: Typed> Typed for Box<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "Box",
            Def::Pointer(PointerDef::new(T::SHAPE, KnownPointer::Box)),
        )
    };
}

impl<T: Typed> ReflectPointer for Box<T> {
    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(&**self as &dyn Reflect)
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self as &mut dyn Reflect)
    }

    fn allocate(&mut self) {
        *self = Box::default();
    }

    fn alias_from(&mut self, _src: &dyn Reflect) -> bool {
        false
    }
}

macro_rules! impl_shared_pointer {
    ($ptr:ident) => {
        impl<T: Typed> Reflect for $ptr<T> {
            reflect_methods!(Pointer);
        }

        impl<T: Typed> Typed for $ptr<T> {
            const SHAPE: &'static Shape = &const {
                Shape::new(
                    stringify!($ptr),
                    Def::Pointer(PointerDef::new(T::SHAPE, KnownPointer::$ptr)),
                )
            };
        }

        impl<T: Typed> ReflectPointer for $ptr<T> {
            fn pointee(&self) -> Option<&dyn Reflect> {
                Some(&**self as &dyn Reflect)
            }

            fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
                $ptr::get_mut(self).map(|value| value as &mut dyn Reflect)
            }

            fn allocate(&mut self) {
                *self = $ptr::new(T::default());
            }

            fn alias_from(&mut self, src: &dyn Reflect) -> bool {
                let any: &dyn Any = src;
                match any.downcast_ref::<Self>() {
                    Some(src) => {
                        *self = $ptr::clone(src);
                        true
                    }
                    None => false,
                }
            }
        }
    };
}

impl_shared_pointer!(Rc);
impl_shared_pointer!(Arc);
