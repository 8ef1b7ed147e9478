use std::{fmt, iter::FusedIterator, mem};

use tracing::trace;

use super::{cap_level, GeometricLevels, LevelSource, SkipListStatistics, MAX_LEVEL};
use crate::{
    database::{Arena, Comparator, NaturalOrder, ValidationError},
    debug_assert_invariant, validate,
};

/// Ссылка на следующий узел уровня (`None`: конец уровня).
type Link = Option<usize>;

/// Позиция при спуске по уровням: голова или узел арены.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Head,
    Node(usize),
}

/// Узел пропускного списка.
///
/// Длина `forward` равна уровню узла.
#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    forward: Vec<Link>,
}

/// SkipList: упорядоченное отображение на вероятностно сбалансированных
/// уровнях.
///
/// Порядок ключей задаётся компаратором `C`, а уровни новых узлов задаёт источник
/// `L`. Узлы лежат в арене; голова хранится отдельно как массив ссылок
/// фиксированной длины и не содержит ни ключа, ни значения.
#[derive(Clone)]
pub struct SkipList<K, V, C = NaturalOrder, L = GeometricLevels> {
    head: [Link; MAX_LEVEL],
    nodes: Arena<Node<K, V>>,
    level: usize,
    length: usize,
    cmp: C,
    levels: L,
}

/// Итератор по узлам списка в порядке возрастания ключа.
pub struct SkipListIter<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    current: Link,
    remaining: usize,
}

/// Итератор по полуинтервалу ключей `[start, end)`.
pub struct RangeIter<'a, K, V, C> {
    nodes: &'a Arena<Node<K, V>>,
    current: Link,
    end: &'a K,
    cmp: &'a C,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<K: Ord, V> SkipList<K, V> {
    /// Создаёт пустой список с естественным порядком ключей.
    pub fn new() -> Self {
        Self::with_parts(NaturalOrder, GeometricLevels::from_entropy())
    }

    /// Создаёт пустой список с детерминированным генератором уровней.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_parts(NaturalOrder, GeometricLevels::seeded(seed))
    }
}

impl<K, V, C> SkipList<K, V, C> {
    /// Создаёт пустой список с пользовательским компаратором.
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_parts(cmp, GeometricLevels::from_entropy())
    }
}

impl<K, V, C, L> SkipList<K, V, C, L> {
    /// Создаёт пустой список с заданными компаратором и источником уровней.
    pub fn with_parts(
        cmp: C,
        levels: L,
    ) -> Self {
        Self {
            head: [None; MAX_LEVEL],
            nodes: Arena::new(),
            level: 1,
            length: 0,
            cmp,
            levels,
        }
    }

    /// Возвращает текущее число элементов в списке.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Проверяет на пустоту.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Текущий максимальный уровень (не меньше 1).
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Удаляет все элементы и сбрасывает уровень в 1.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = [None; MAX_LEVEL];
        self.level = 1;
        self.length = 0;
    }

    /// Возвращает итератор по (&K, &V) в порядке возрастания ключа.
    pub fn iter(&self) -> SkipListIter<'_, K, V> {
        SkipListIter {
            nodes: &self.nodes,
            current: self.head[0],
            remaining: self.length,
        }
    }

    /// Возвращает первый элемент (минимальный ключ) списка.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.head[0].map(|idx| self.entry(idx))
    }

    /// Возвращает последний элемент (максимальный ключ) списка.
    pub fn last(&self) -> Option<(&K, &V)> {
        match self.descend(|_| true) {
            Cursor::Head => None,
            Cursor::Node(idx) => Some(self.entry(idx)),
        }
    }

    /// Собирает статистику распределения узлов по уровням.
    pub fn statistics(&self) -> SkipListStatistics {
        let mut stats = SkipListStatistics::new(self.level);

        let mut current = self.head[0];
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            stats.record_node(node.forward.len());
            current = node.forward[0];
        }

        stats
    }

    #[inline]
    fn entry(
        &self,
        idx: usize,
    ) -> (&K, &V) {
        let node = &self.nodes[idx];
        (&node.key, &node.value)
    }

    #[inline]
    fn forward(
        &self,
        cursor: Cursor,
        level: usize,
    ) -> Link {
        match cursor {
            Cursor::Head => self.head[level],
            Cursor::Node(idx) => self.nodes[idx].forward[level],
        }
    }

    #[inline]
    fn set_forward(
        &mut self,
        cursor: Cursor,
        level: usize,
        link: Link,
    ) {
        match cursor {
            Cursor::Head => self.head[level] = link,
            Cursor::Node(idx) => self.nodes[idx].forward[level] = link,
        }
    }

    /// Спускается от головы по уровням, продвигаясь вперёд, пока `advance`
    /// истинно для следующего ключа. Возвращает последнюю позицию на уровне 0.
    fn descend<F>(
        &self,
        mut advance: F,
    ) -> Cursor
    where
        F: FnMut(&K) -> bool,
    {
        let mut current = Cursor::Head;

        for i in (0..self.level).rev() {
            while let Some(next) = self.forward(current, i) {
                if !advance(&self.nodes[next].key) {
                    break;
                }
                current = Cursor::Node(next);
            }
        }

        current
    }
}

impl<K, V, C, L> SkipList<K, V, C, L>
where
    C: Comparator<K>,
{
    /// Поиск предшествующих узлов для каждого уровня.
    ///
    /// Уровни выше текущего остаются равными `Cursor::Head`.
    fn find_update(
        &self,
        key: &K,
    ) -> [Cursor; MAX_LEVEL] {
        let mut update = [Cursor::Head; MAX_LEVEL];
        let mut current = Cursor::Head;

        for i in (0..self.level).rev() {
            while let Some(next) = self.forward(current, i) {
                if self.cmp.less(&self.nodes[next].key, key) {
                    current = Cursor::Node(next);
                } else {
                    break;
                }
            }
            update[i] = current;
        }

        update
    }

    /// Первый узел с ключом `>= key`.
    fn lower_bound_node(
        &self,
        key: &K,
    ) -> Link {
        let pred = self.descend(|k| self.cmp.less(k, key));
        self.forward(pred, 0)
    }

    /// Первый узел с ключом `> key`.
    fn upper_bound_node(
        &self,
        key: &K,
    ) -> Link {
        let pred = self.descend(|k| !self.cmp.less(key, k));
        self.forward(pred, 0)
    }

    fn find_node(
        &self,
        key: &K,
    ) -> Option<usize> {
        self.lower_bound_node(key)
            .filter(|&idx| self.cmp.equal(&self.nodes[idx].key, key))
    }

    /// Ищет узел с заданным ключом и возвращает ссылку на значение, если
    /// найден.
    pub fn get(
        &self,
        key: &K,
    ) -> Option<&V> {
        self.find_node(key).map(|idx| &self.nodes[idx].value)
    }

    /// Изменяемая ссылка на значение по ключу.
    pub fn get_mut(
        &mut self,
        key: &K,
    ) -> Option<&mut V> {
        let idx = self.find_node(key)?;
        Some(&mut self.nodes[idx].value)
    }

    /// Проверяет, содержится ли ключ в списке.
    pub fn contains_key(
        &self,
        key: &K,
    ) -> bool {
        self.find_node(key).is_some()
    }

    /// Первый элемент с ключом, не меньшим `key`.
    pub fn lower_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)> {
        self.lower_bound_node(key).map(|idx| self.entry(idx))
    }

    /// Первый элемент с ключом, строго большим `key`.
    pub fn upper_bound(
        &self,
        key: &K,
    ) -> Option<(&K, &V)> {
        self.upper_bound_node(key).map(|idx| self.entry(idx))
    }

    /// Возвращает итератор по диапазону: от ключа `start` до ключа `end` (не
    /// включая end).
    pub fn range<'a>(
        &'a self,
        start: &K,
        end: &'a K,
    ) -> RangeIter<'a, K, V, C> {
        RangeIter {
            nodes: &self.nodes,
            current: self.lower_bound_node(start),
            end,
            cmp: &self.cmp,
        }
    }

    /// Удаляет узел с заданным ключом и возвращает его значение.
    pub fn remove(
        &mut self,
        key: &K,
    ) -> Option<V> {
        let update = self.find_update(key);

        let idx = self.forward(update[0], 0)?;
        if !self.cmp.equal(&self.nodes[idx].key, key) {
            return None;
        }

        // перепривязываем forward для всех уровней, где узел участвует
        for (i, &cursor) in update.iter().enumerate().take(self.level) {
            if self.forward(cursor, i) == Some(idx) {
                let next = self.nodes[idx].forward[i];
                self.set_forward(cursor, i, next);
            }
        }

        let previous = self.level;
        while self.level > 1 && self.head[self.level - 1].is_none() {
            self.level -= 1;
        }
        if self.level < previous {
            trace!(from = previous, to = self.level, "skiplist level shrank");
        }

        self.length -= 1;
        Some(self.nodes.remove(idx).value)
    }

    /// Проверяет структурные инварианты списка.
    ///
    /// - голова не ссылается ни на что выше текущего уровня, верхний уровень
    ///   непуст (кроме уровня 1);
    /// - уровень 0 строго возрастает и содержит ровно `len()` узлов;
    /// - каждый уровень является подпоследовательностью нижележащего, и на
    ///   нём присутствуют все узлы соответствующей высоты.
    pub fn validate_invariants(&self) -> Result<(), ValidationError> {
        validate!(
            (1..=MAX_LEVEL).contains(&self.level),
            ValidationError::InvalidLevel {
                node_level: self.level,
                max_level: MAX_LEVEL
            }
        );
        validate!(
            self.head[self.level..].iter().all(Option::is_none),
            ValidationError::HeadAboveLevel { level: self.level }
        );
        validate!(
            self.level == 1 || self.head[self.level - 1].is_some(),
            ValidationError::LevelInclusion {
                level: self.level - 1,
                message: "top level is empty".to_string()
            }
        );

        let mut heights = [0usize; MAX_LEVEL];
        let mut count = 0;
        let mut prev: Option<usize> = None;
        let mut current = self.head[0];

        while let Some(idx) = current {
            let node = self
                .nodes
                .get(idx)
                .ok_or(ValidationError::DanglingLink { index: idx })?;

            validate!(
                count < self.nodes.len(),
                ValidationError::CyclicReference {
                    message: format!("level 0 revisits slot {idx}")
                }
            );
            validate!(
                (1..=self.level).contains(&node.forward.len()),
                ValidationError::InvalidLevel {
                    node_level: node.forward.len(),
                    max_level: self.level
                }
            );
            if let Some(p) = prev {
                validate!(
                    self.cmp.less(&self.nodes[p].key, &node.key),
                    ValidationError::SortOrderViolation {
                        message: format!("level 0 positions {} and {}", count - 1, count)
                    }
                );
            }

            heights[node.forward.len() - 1] += 1;
            prev = Some(idx);
            count += 1;
            current = node.forward[0];
        }

        validate!(
            count == self.length && self.nodes.len() == self.length,
            ValidationError::LengthMismatch {
                expected: self.length,
                actual: count
            }
        );

        for level in 1..self.level {
            self.validate_level(level, &heights)?;
        }

        Ok(())
    }

    /// Проверяет, что уровень `level`: подпоследовательность уровня ниже и
    /// содержит все узлы высоты больше `level`.
    fn validate_level(
        &self,
        level: usize,
        heights: &[usize; MAX_LEVEL],
    ) -> Result<(), ValidationError> {
        let expected: usize = heights[level..].iter().sum();
        let mut below = self.head[level - 1];
        let mut current = self.head[level];
        let mut count = 0;

        while let Some(idx) = current {
            let node = self
                .nodes
                .get(idx)
                .ok_or(ValidationError::DanglingLink { index: idx })?;

            validate!(
                node.forward.len() > level && count < expected,
                ValidationError::LevelInclusion {
                    level,
                    message: format!("slot {idx} is linked above its height")
                }
            );

            while let Some(b) = below {
                if b == idx {
                    break;
                }
                below = self
                    .nodes
                    .get(b)
                    .and_then(|n| n.forward.get(level - 1).copied())
                    .flatten();
            }
            validate!(
                below == Some(idx),
                ValidationError::LevelInclusion {
                    level,
                    message: format!("slot {idx} missing from level {}", level - 1)
                }
            );

            count += 1;
            current = node.forward[level];
        }

        validate!(
            count == expected,
            ValidationError::LevelInclusion {
                level,
                message: format!("expected {expected} nodes, found {count}")
            }
        );

        Ok(())
    }
}

impl<K, V, C, L> SkipList<K, V, C, L>
where
    C: Comparator<K>,
    L: LevelSource,
{
    /// Вставляет ключ и значение в пропускной список.
    ///
    /// Если ключ уже есть, значение заменяется на месте и возвращается
    /// прежнее; иначе создаётся новый узел и возвращается `None`.
    pub fn insert(
        &mut self,
        key: K,
        value: V,
    ) -> Option<V> {
        let update = self.find_update(&key);

        // Проверяем наличие узла с тем же ключом в уровне 0.
        if let Some(idx) = self.forward(update[0], 0) {
            let node = &mut self.nodes[idx];
            if self.cmp.equal(&node.key, &key) {
                return Some(mem::replace(&mut node.value, value));
            }
        }

        let level = cap_level(self.levels.draw(), self.length);
        if level > self.level {
            // update[self.level..level] уже указывают на голову.
            trace!(from = self.level, to = level, "skiplist level grew");
            self.level = level;
        }

        let forward = update
            .iter()
            .enumerate()
            .take(level)
            .map(|(i, &cursor)| self.forward(cursor, i))
            .collect();
        let idx = self.nodes.insert(Node {
            key,
            value,
            forward,
        });

        for (i, &cursor) in update.iter().enumerate().take(level) {
            self.set_forward(cursor, i, Some(idx));
        }

        debug_assert_invariant!(
            self.nodes.len() == self.length + 1,
            "arena holds {} nodes for length {}",
            self.nodes.len(),
            self.length + 1
        );
        self.length += 1;
        None
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для SkipList
////////////////////////////////////////////////////////////////////////////////

impl<K: Ord, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, L> fmt::Debug for SkipList<K, V, C, L> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<K, V, C, L> Extend<(K, V)> for SkipList<K, V, C, L>
where
    C: Comparator<K>,
    L: LevelSource,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(
        &mut self,
        iter: I,
    ) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C, L> IntoIterator for &'a SkipList<K, V, C, L> {
    type Item = (&'a K, &'a V);
    type IntoIter = SkipListIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C, L> PartialEq for SkipList<K, V, C, L>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a, K, V> Iterator for SkipListIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.current?];

        self.current = node.forward[0];
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for SkipListIter<'_, K, V> {}

impl<K, V> FusedIterator for SkipListIter<'_, K, V> {}

impl<'a, K, V, C> Iterator for RangeIter<'a, K, V, C>
where
    C: Comparator<K>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.current?];

        if !self.cmp.less(&node.key, self.end) {
            self.current = None;
            return None;
        }

        self.current = node.forward[0];
        Some((&node.key, &node.value))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
