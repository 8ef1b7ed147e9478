//! Общий контракт упорядоченного отображения.
//!
//! Обе структуры (skip list и отображение на красно-чёрном дереве) реализуют
//! [`OrderedMap`] и взаимозаменяемы для вызывающего кода: уникальные ключи,
//! упорядоченный обход, логарифмические поиск, вставка и удаление.

use super::{
    Comparator, LevelSource, RbTreeMap, SkipList, ValidationError,
};

/// Упорядоченное отображение ключ → значение.
///
/// Трейт объектно-безопасен и используется через `&dyn OrderedMap<K, V>`.
pub trait OrderedMap<K, V> {
    /// Короткое имя реализации (`"skiplist"`, `"rbtree"`).
    fn engine_name(&self) -> &'static str;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// Вставляет пару; для существующего ключа возвращает прежнее значение.
    fn insert(
        &mut self,
        key: K,
        value: V,
    ) -> Option<V>;

    fn get(
        &self,
        key: &K,
    ) -> Option<&V>;

    fn contains_key(
        &self,
        key: &K,
    ) -> bool {
        self.get(key).is_some()
    }

    fn remove(
        &mut self,
        key: &K,
    ) -> Option<V>;

    /// Первая пара с ключом `>= key`.
    fn lower_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)>;

    /// Первая пара с ключом `> key`.
    fn upper_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)>;

    fn first(&self) -> Option<(&K, &V)>;

    fn last(&self) -> Option<(&K, &V)>;

    /// Все пары в порядке возрастания ключа.
    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;

    /// Пары с ключами из `[start, end)`.
    fn range<'a>(
        &'a self,
        start: &K,
        end: &'a K,
    ) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>;

    /// Проверяет структурные инварианты реализации.
    fn check(&self) -> Result<(), ValidationError>;
}

impl<K, V, C, L> OrderedMap<K, V> for SkipList<K, V, C, L>
where
    C: Comparator<K>,
    L: LevelSource,
{
    fn engine_name(&self) -> &'static str {
        "skiplist"
    }

    fn len(&self) -> usize {
        SkipList::len(self)
    }

    fn clear(&mut self) {
        SkipList::clear(self)
    }

    fn insert(
        &mut self,
        key: K,
        value: V,
    ) -> Option<V> {
        SkipList::insert(self, key, value)
    }

    fn get(
        &self,
        key: &K,
    ) -> Option<&V> {
        SkipList::get(self, key)
    }

    fn remove(
        &mut self,
        key: &K,
    ) -> Option<V> {
        SkipList::remove(self, key)
    }

    fn lower_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)> {
        SkipList::lower_bound(self, key)
    }

    fn upper_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)> {
        SkipList::upper_bound(self, key)
    }

    fn first(&self) -> Option<(&K, &V)> {
        SkipList::first(self)
    }

    fn last(&self) -> Option<(&K, &V)> {
        SkipList::last(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }

    fn range<'a>(
        &'a self,
        start: &K,
        end: &'a K,
    ) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a> {
        Box::new(SkipList::range(self, start, end))
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.validate_invariants()
    }
}

impl<K, V, C> OrderedMap<K, V> for RbTreeMap<K, V, C>
where
    C: Comparator<K>,
{
    fn engine_name(&self) -> &'static str {
        "rbtree"
    }

    fn len(&self) -> usize {
        RbTreeMap::len(self)
    }

    fn clear(&mut self) {
        RbTreeMap::clear(self)
    }

    fn insert(
        &mut self,
        key: K,
        value: V,
    ) -> Option<V> {
        RbTreeMap::insert(self, key, value)
    }

    fn get(
        &self,
        key: &K,
    ) -> Option<&V> {
        RbTreeMap::get(self, key)
    }

    fn remove(
        &mut self,
        key: &K,
    ) -> Option<V> {
        RbTreeMap::remove(self, key)
    }

    fn lower_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)> {
        RbTreeMap::lower_bound(self, key)
    }

    fn upper_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)> {
        RbTreeMap::upper_bound(self, key)
    }

    fn first(&self) -> Option<(&K, &V)> {
        RbTreeMap::first(self)
    }

    fn last(&self) -> Option<(&K, &V)> {
        RbTreeMap::last(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }

    fn range<'a>(
        &'a self,
        start: &K,
        end: &'a K,
    ) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a> {
        Box::new(RbTreeMap::range(self, start, end))
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.validate_invariants().map(|_| ())
    }
}
