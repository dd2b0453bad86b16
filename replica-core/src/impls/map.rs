use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap};

use super::{convert_key, reflect_methods};
use crate::{Def, MapDef, Reflect, ReflectMap, Shape, Typed};

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Typed + Clone + Eq + Hash,
    V: Typed,
    S: BuildHasher + Default + 'static,
{
    reflect_methods!(Map);
}

impl<K, V, S> Typed for HashMap<K, V, S>
where
    K: Typed + Clone + Eq + Hash,
    V: Typed,
    S: BuildHasher + Default + 'static,
{
    const SHAPE: &'static Shape =
        &const { Shape::new("HashMap", Def::Map(MapDef::new(K::SHAPE, V::SHAPE))) };
}

impl<K, V, S> ReflectMap for HashMap<K, V, S>
where
    K: Typed + Clone + Eq + Hash,
    V: Typed,
    S: BuildHasher + Default + 'static,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
        )
    }

    fn rebuild(&mut self) {
        *self = HashMap::default();
    }

    fn insert_with(&mut self, key: &dyn Reflect, fill: &mut dyn FnMut(&mut dyn Reflect)) -> bool {
        let Some(key) = convert_key::<K>(key) else {
            return false;
        };
        let mut value = V::default();
        fill(&mut value);
        self.insert(key, value);
        true
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Typed + Clone + Ord,
    V: Typed,
{
    reflect_methods!(Map);
}

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Typed + Clone + Ord,
    V: Typed,
{
    const SHAPE: &'static Shape =
        &const { Shape::new("BTreeMap", Def::Map(MapDef::new(K::SHAPE, V::SHAPE))) };
}

impl<K, V> ReflectMap for BTreeMap<K, V>
where
    K: Typed + Clone + Ord,
    V: Typed,
{
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
        )
    }

    fn rebuild(&mut self) {
        *self = BTreeMap::new();
    }

    fn insert_with(&mut self, key: &dyn Reflect, fill: &mut dyn FnMut(&mut dyn Reflect)) -> bool {
        let Some(key) = convert_key::<K>(key) else {
            return false;
        };
        let mut value = V::default();
        fill(&mut value);
        self.insert(key, value);
        true
    }
}
