//! Отображение ключ → значение поверх [`RbTree`].
//!
//! Дерево хранит пары `(K, V)` и сравнивает их только по ключу через
//! [`KeyOrder`], поэтому значение можно менять на месте, не нарушая порядок.

use std::{cmp::Ordering, fmt, mem};

use super::{NodeId, RbTree, RbTreeIter, RbTreeStatistics};
use crate::database::{Comparator, NaturalOrder, ValidationError};

/// Сравнивает пары по первому элементу компаратором `C`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOrder<C>(pub C);

/// Упорядоченное отображение на красно-чёрном дереве.
#[derive(Clone)]
pub struct RbTreeMap<K, V, C = NaturalOrder> {
    tree: RbTree<(K, V), KeyOrder<C>>,
}

/// Итератор по парам `(&K, &V)` в порядке возрастания ключа.
pub struct RbTreeMapIter<'a, K, V, C> {
    inner: RbTreeIter<'a, (K, V), KeyOrder<C>>,
}

impl<K, V, C: Comparator<K>> Comparator<(K, V)> for KeyOrder<C> {
    #[inline]
    fn compare(
        &self,
        a: &(K, V),
        b: &(K, V),
    ) -> Ordering {
        self.0.compare(&a.0, &b.0)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<K: Ord, V> RbTreeMap<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> RbTreeMap<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: RbTree::with_comparator(KeyOrder(cmp)),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Дерево, на котором построено отображение.
    pub fn tree(&self) -> &RbTree<(K, V), KeyOrder<C>> {
        &self.tree
    }

    pub fn iter(&self) -> RbTreeMapIter<'_, K, V, C> {
        RbTreeMapIter {
            inner: self.tree.iter(),
        }
    }

    /// Пара с минимальным ключом.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.min().ok().map(|(k, v)| (k, v))
    }

    /// Пара с максимальным ключом.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.max().ok().map(|(k, v)| (k, v))
    }

    pub fn statistics(&self) -> RbTreeStatistics {
        self.tree.statistics()
    }

    fn entry(
        &self,
        id: NodeId,
    ) -> Option<(&K, &V)> {
        self.tree.value(id).map(|(k, v)| (k, v))
    }
}

impl<K, V, C> RbTreeMap<K, V, C>
where
    C: Comparator<K>,
{
    fn locate(
        &self,
        key: &K,
    ) -> Option<NodeId> {
        let cmp = &self.tree.comparator().0;
        self.tree.search_by(|(probe, _)| cmp.compare(probe, key))
    }

    /// Вставляет пару. Для существующего ключа заменяет значение на месте и
    /// возвращает прежнее.
    pub fn insert(
        &mut self,
        key: K,
        value: V,
    ) -> Option<V> {
        match self.tree.try_insert((key, value)) {
            Ok(_) => None,
            Err((id, (_, value))) => self
                .tree
                .value_mut(id)
                .map(|(_, slot)| mem::replace(slot, value)),
        }
    }

    pub fn get(
        &self,
        key: &K,
    ) -> Option<&V> {
        self.locate(key)
            .and_then(|id| self.tree.value(id))
            .map(|(_, v)| v)
    }

    pub fn get_mut(
        &mut self,
        key: &K,
    ) -> Option<&mut V> {
        let id = self.locate(key)?;
        self.tree.value_mut(id).map(|(_, v)| v)
    }

    pub fn contains_key(
        &self,
        key: &K,
    ) -> bool {
        self.locate(key).is_some()
    }

    /// Удаляет ключ и возвращает его значение.
    pub fn remove(
        &mut self,
        key: &K,
    ) -> Option<V> {
        let id = self.locate(key)?;
        self.tree.delete_at(id).map(|(_, v)| v)
    }

    /// Первая пара с ключом, не меньшим `key`.
    pub fn lower_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)> {
        self.entry(self.lower_bound_node(key)?)
    }

    /// Первая пара с ключом, строго большим `key`.
    pub fn upper_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)> {
        let cmp = &self.tree.comparator().0;
        let id = self
            .tree
            .upper_bound_by(|(probe, _)| cmp.compare(probe, key))?;
        self.entry(id)
    }

    /// Пары с ключами из полуинтервала `[start, end)`.
    pub fn range<'a>(
        &'a self,
        start: &K,
        end: &'a K,
    ) -> impl Iterator<Item = (&'a K, &'a V)> + 'a {
        let cmp = &self.tree.comparator().0;
        self.tree
            .iter_from(self.lower_bound_node(start))
            .take_while(move |(k, _)| cmp.less(k, end))
            .map(|(k, v)| (k, v))
    }

    /// Проверяет инварианты дерева и возвращает его чёрную высоту.
    pub fn validate_invariants(&self) -> Result<usize, ValidationError> {
        self.tree.validate_invariants()
    }

    fn lower_bound_node(
        &self,
        key: &K,
    ) -> Option<NodeId> {
        let cmp = &self.tree.comparator().0;
        self.tree
            .lower_bound_by(|(probe, _)| cmp.compare(probe, key))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl<K: Ord, V> Default for RbTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RbTreeMap<K, V, C> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RbTreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(
        &mut self,
        iter: I,
    ) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RbTreeMap<K, V, C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = RbTreeMapIter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> Iterator for RbTreeMapIter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

impl<K, V, C> DoubleEndedIterator for RbTreeMapIter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
