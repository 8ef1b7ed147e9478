use std::{cmp::Ordering, fmt, mem};

use ordix_error::CollectionError;

use super::RbTreeStatistics;
use crate::{
    database::{Arena, Comparator, NaturalOrder, ValidationError},
    debug_assert_invariant, validate,
};

/// Цвет узла. Отсутствующий потомок считается чёрным.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Стабильный идентификатор узла дерева.
///
/// Остаётся валидным до ближайшего удаления из дерева: удаление узла с двумя
/// потомками переносит значение преемника в другой слот.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Ссылка на узел; `None` играет роль общего чёрного листа.
type Link = Option<NodeId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct RbNode<T> {
    left: Link,
    right: Link,
    parent: Link,
    color: Color,
    value: T,
}

/// Красно-чёрное дерево уникальных значений, упорядоченных компаратором `C`.
///
/// Узлы хранятся в арене и связаны индексами, включая ссылку на родителя.
/// После каждой публичной мутации выполняются пять свойств красно-чёрного
/// дерева, см. [`RbTree::validate_invariants`].
#[derive(Clone)]
pub struct RbTree<T, C = NaturalOrder> {
    root: Link,
    nodes: Arena<RbNode<T>>,
    cmp: C,
}

/// Двусторонний итератор по значениям в порядке возрастания.
pub struct RbTreeIter<'a, T, C> {
    tree: &'a RbTree<T, C>,
    front: Link,
    back: Link,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Side {
    #[inline]
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl<T: Ord> RbTree<T> {
    /// Создаёт пустое дерево с естественным порядком.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> RbTree<T, C> {
    /// Создаёт пустое дерево с пользовательским компаратором.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            root: None,
            nodes: Arena::new(),
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Удаляет все значения.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Корень дерева.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Цвет узла или `None` для недействительного идентификатора.
    pub fn color(
        &self,
        id: NodeId,
    ) -> Option<Color> {
        self.nodes.get(id.0).map(|node| node.color)
    }

    /// Значение узла или `None` для недействительного идентификатора.
    pub fn value(
        &self,
        id: NodeId,
    ) -> Option<&T> {
        self.nodes.get(id.0).map(|node| &node.value)
    }

    /// Изменяемая ссылка на значение.
    ///
    /// Изменение не должно затрагивать части значения, участвующие в
    /// сравнении.
    pub(crate) fn value_mut(
        &mut self,
        id: NodeId,
    ) -> Option<&mut T> {
        self.nodes.get_mut(id.0).map(|node| &mut node.value)
    }

    /// Минимальное значение.
    pub fn min(&self) -> Result<&T, CollectionError> {
        self.root
            .map(|root| &self.node(self.min_subtree(root)).value)
            .ok_or(CollectionError::EmptyStructure { operation: "min" })
    }

    /// Максимальное значение.
    pub fn max(&self) -> Result<&T, CollectionError> {
        self.root
            .map(|root| &self.node(self.max_subtree(root)).value)
            .ok_or(CollectionError::EmptyStructure { operation: "max" })
    }

    /// Самый левый узел поддерева с корнем `id`.
    ///
    /// # Panics
    ///
    /// Паникует, если `id` недействителен.
    pub fn min_subtree(
        &self,
        id: NodeId,
    ) -> NodeId {
        self.extreme(id, Side::Left)
    }

    /// Самый правый узел поддерева с корнем `id`.
    ///
    /// # Panics
    ///
    /// Паникует, если `id` недействителен.
    pub fn max_subtree(
        &self,
        id: NodeId,
    ) -> NodeId {
        self.extreme(id, Side::Right)
    }

    /// Следующий узел в порядке обхода.
    pub fn successor(
        &self,
        id: NodeId,
    ) -> Option<NodeId> {
        self.neighbor(id, Side::Right)
    }

    /// Предыдущий узел в порядке обхода.
    pub fn predecessor(
        &self,
        id: NodeId,
    ) -> Option<NodeId> {
        self.neighbor(id, Side::Left)
    }

    /// Итератор по значениям в порядке возрастания.
    pub fn iter(&self) -> RbTreeIter<'_, T, C> {
        RbTreeIter {
            tree: self,
            front: self.root.map(|root| self.min_subtree(root)),
            back: self.root.map(|root| self.max_subtree(root)),
        }
    }

    /// Итератор от узла `start` (включительно) до максимума.
    pub fn iter_from(
        &self,
        start: Option<NodeId>,
    ) -> RbTreeIter<'_, T, C> {
        let start = start.filter(|id| self.nodes.contains(id.0));
        RbTreeIter {
            tree: self,
            front: start,
            back: start.and(self.root.map(|root| self.max_subtree(root))),
        }
    }

    /// Собирает статистику формы дерева.
    pub fn statistics(&self) -> RbTreeStatistics {
        let mut stats = RbTreeStatistics::default();
        let mut stack: Vec<(NodeId, usize, usize)> = self.root.map(|r| (r, 1, 0)).into_iter().collect();

        while let Some((id, depth, blacks)) = stack.pop() {
            let node = self.node(id);
            let blacks = blacks + usize::from(node.color == Color::Black);
            stats.record_node(node.color, depth);

            if node.left.is_none() || node.right.is_none() {
                stats.black_height = stats.black_height.max(blacks);
            }
            stack.extend(node.left.map(|l| (l, depth + 1, blacks)));
            stack.extend(node.right.map(|r| (r, depth + 1, blacks)));
        }

        stats
    }

    #[inline]
    fn node(
        &self,
        id: NodeId,
    ) -> &RbNode<T> {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(
        &mut self,
        id: NodeId,
    ) -> &mut RbNode<T> {
        &mut self.nodes[id.0]
    }

    #[inline]
    fn child(
        &self,
        id: NodeId,
        side: Side,
    ) -> Link {
        let node = self.node(id);
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    #[inline]
    fn set_child(
        &mut self,
        id: NodeId,
        side: Side,
        link: Link,
    ) {
        let node = self.node_mut(id);
        match side {
            Side::Left => node.left = link,
            Side::Right => node.right = link,
        }
    }

    #[inline]
    fn parent(
        &self,
        id: NodeId,
    ) -> Link {
        self.node(id).parent
    }

    #[inline]
    fn color_of(
        &self,
        link: Link,
    ) -> Color {
        link.and_then(|id| self.nodes.get(id.0))
            .map_or(Color::Black, |node| node.color)
    }

    #[inline]
    fn set_color(
        &mut self,
        id: NodeId,
        color: Color,
    ) {
        self.node_mut(id).color = color;
    }

    /// С какой стороны `parent` висит `child`.
    #[inline]
    fn side_of(
        &self,
        parent: NodeId,
        child: Link,
    ) -> Side {
        if self.node(parent).left == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn extreme(
        &self,
        mut id: NodeId,
        side: Side,
    ) -> NodeId {
        while let Some(next) = self.child(id, side) {
            id = next;
        }
        id
    }

    fn neighbor(
        &self,
        id: NodeId,
        side: Side,
    ) -> Option<NodeId> {
        if !self.nodes.contains(id.0) {
            return None;
        }
        if let Some(child) = self.child(id, side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if self.side_of(parent, Some(current)) != side {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Заменяет ссылку `parent -> old` на `parent -> new`; для корня
    /// обновляет `root`.
    fn replace_child(
        &mut self,
        parent: Link,
        old: NodeId,
        new: Link,
    ) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(p, Some(old));
                self.set_child(p, side, new);
            }
        }
    }

    /// Поворот вокруг `x`: `x` опускается в сторону `side`, его потомок с
    /// противоположной стороны поднимается на место `x`.
    ///
    /// Без потомка с противоположной стороны поворот ничего не делает.
    fn rotate(
        &mut self,
        x: NodeId,
        side: Side,
    ) {
        let rising = side.opposite();
        let Some(y) = self.child(x, rising) else {
            return;
        };

        let inner = self.child(y, side);
        self.set_child(x, rising, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(x);
        }

        let parent = self.parent(x);
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, Some(y));

        self.set_child(y, side, Some(x));
        self.node_mut(x).parent = Some(y);
    }

    fn insert_fixup(
        &mut self,
        mut z: NodeId,
    ) {
        while let Some(mut p) = self.parent(z) {
            if self.node(p).color == Color::Black {
                break;
            }
            // Красный родитель не может быть корнем.
            let Some(g) = self.parent(p) else {
                break;
            };

            let side = self.side_of(g, Some(p));
            let uncle = self.child(g, side.opposite());

            if self.color_of(uncle) == Color::Red {
                self.set_color(p, Color::Black);
                if let Some(u) = uncle {
                    self.set_color(u, Color::Black);
                }
                self.set_color(g, Color::Red);
                z = g;
                continue;
            }

            if self.side_of(p, Some(z)) != side {
                // внутренний потомок: выпрямляем путь
                self.rotate(p, side);
                mem::swap(&mut z, &mut p);
            }

            self.set_color(p, Color::Black);
            self.set_color(g, Color::Red);
            self.rotate(g, side.opposite());
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Вырезает узел `z` и возвращает его значение.
    fn delete_node(
        &mut self,
        z: NodeId,
    ) -> T {
        let y = match (self.node(z).left, self.node(z).right) {
            (Some(_), Some(right)) => self.min_subtree(right),
            _ => z,
        };

        let x = self.node(y).left.or(self.node(y).right);
        let x_parent = self.parent(y);

        if let Some(x) = x {
            self.node_mut(x).parent = x_parent;
        }
        self.replace_child(x_parent, y, x);

        let removed = self.nodes.remove(y.0);
        let mut value = removed.value;
        if y != z {
            // Значение преемника переезжает в слот удаляемого узла.
            mem::swap(&mut self.node_mut(z).value, &mut value);
        }

        if removed.color == Color::Black {
            self.delete_fixup(x, x_parent);
        }

        value
    }

    /// Восстанавливает свойства после удаления чёрного узла.
    ///
    /// `x`: узел, занявший место удалённого (возможно, отсутствующий),
    /// `parent`: его родитель.
    fn delete_fixup(
        &mut self,
        mut x: Link,
        mut parent: Link,
    ) {
        while x != self.root && self.color_of(x) == Color::Black {
            let Some(p) = parent else {
                break;
            };
            let side = self.side_of(p, x);
            let far = side.opposite();

            let Some(mut w) = self.child(p, far) else {
                break;
            };

            if self.node(w).color == Color::Red {
                self.set_color(w, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                match self.child(p, far) {
                    Some(sibling) => w = sibling,
                    None => break,
                }
            }

            let near_child = self.child(w, side);
            let far_child = self.child(w, far);

            if self.color_of(near_child) == Color::Black && self.color_of(far_child) == Color::Black {
                self.set_color(w, Color::Red);
                x = Some(p);
                parent = self.parent(p);
                continue;
            }

            if self.color_of(far_child) == Color::Black {
                if let Some(near) = near_child {
                    self.set_color(near, Color::Black);
                }
                self.set_color(w, Color::Red);
                self.rotate(w, far);
                match self.child(p, far) {
                    Some(sibling) => w = sibling,
                    None => break,
                }
            }

            let parent_color = self.node(p).color;
            self.set_color(w, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far_child) = self.child(w, far) {
                self.set_color(far_child, Color::Black);
            }
            self.rotate(p, side);

            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }
}

impl<T, C> RbTree<T, C>
where
    C: Comparator<T>,
{
    /// Вставляет значение.
    ///
    /// Если равное значение уже есть, дерево не меняется, а новое значение
    /// возвращается вместе с узлом существующего.
    pub fn try_insert(
        &mut self,
        value: T,
    ) -> Result<NodeId, (NodeId, T)> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(id) = current {
            side = match self.cmp.compare(&value, &self.node(id).value) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Err((id, value)),
            };
            parent = Some(id);
            current = self.child(id, side);
        }

        let id = NodeId(self.nodes.insert(RbNode {
            left: None,
            right: None,
            parent,
            color: Color::Red,
            value,
        }));

        match parent {
            None => self.root = Some(id),
            Some(p) => self.set_child(p, side, Some(id)),
        }

        self.insert_fixup(id);
        debug_assert_invariant!(
            self.color_of(self.root) == Color::Black,
            "root is red after inserting slot {}",
            id.0
        );

        Ok(id)
    }

    /// Вставляет значение. Возвращает `false`, если равное значение уже
    /// было в дереве (новое значение при этом отбрасывается).
    pub fn insert(
        &mut self,
        value: T,
    ) -> bool {
        self.try_insert(value).is_ok()
    }

    /// Вставляет значение, если равного нет, и возвращает ссылку на
    /// значение, хранящееся в дереве.
    pub fn insert_or_get(
        &mut self,
        value: T,
    ) -> &T {
        let id = match self.try_insert(value) {
            Ok(id) => id,
            Err((id, _)) => id,
        };
        &self.node(id).value
    }

    /// Ищет узел по функции, сравнивающей значение узла с искомым.
    pub fn search_by<F>(
        &self,
        mut f: F,
    ) -> Option<NodeId>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = self.root;

        while let Some(id) = current {
            current = match f(&self.node(id).value) {
                Ordering::Less => self.node(id).right,
                Ordering::Greater => self.node(id).left,
                Ordering::Equal => return Some(id),
            };
        }

        None
    }

    /// Ищет узел, равный `value`.
    pub fn search(
        &self,
        value: &T,
    ) -> Option<NodeId> {
        self.search_by(|probe| self.cmp.compare(probe, value))
    }

    pub fn get(
        &self,
        value: &T,
    ) -> Option<&T> {
        self.search(value).map(|id| &self.node(id).value)
    }

    pub fn contains(
        &self,
        value: &T,
    ) -> bool {
        self.search(value).is_some()
    }

    /// Первый узел, для которого `f` не возвращает `Less`.
    pub fn lower_bound_by<F>(
        &self,
        mut f: F,
    ) -> Option<NodeId>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.bound_by(|probe| f(probe) != Ordering::Less)
    }

    /// Первый узел, для которого `f` возвращает `Greater`.
    pub fn upper_bound_by<F>(
        &self,
        mut f: F,
    ) -> Option<NodeId>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.bound_by(|probe| f(probe) == Ordering::Greater)
    }

    /// Первое значение, не меньшее `value`.
    pub fn lower_bound(
        &self,
        value: &T,
    ) -> Option<&T> {
        self.lower_bound_by(|probe| self.cmp.compare(probe, value))
            .map(|id| &self.node(id).value)
    }

    /// Первое значение, строго большее `value`.
    pub fn upper_bound(
        &self,
        value: &T,
    ) -> Option<&T> {
        self.upper_bound_by(|probe| self.cmp.compare(probe, value))
            .map(|id| &self.node(id).value)
    }

    /// Удаляет значение, равное `value`.
    pub fn delete(
        &mut self,
        value: &T,
    ) -> Option<T> {
        let id = self.search(value)?;
        Some(self.delete_node(id))
    }

    /// Удаляет узел, найденный функцией сравнения (см. [`RbTree::search_by`]).
    pub fn delete_by<F>(
        &mut self,
        f: F,
    ) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let id = self.search_by(f)?;
        Some(self.delete_node(id))
    }

    /// Удаляет узел по идентификатору.
    pub fn delete_at(
        &mut self,
        id: NodeId,
    ) -> Option<T> {
        if !self.nodes.contains(id.0) {
            return None;
        }
        Some(self.delete_node(id))
    }

    /// Проверяет пять свойств красно-чёрного дерева, связность ссылок на
    /// родителя и порядок значений.
    ///
    /// Возвращает чёрную высоту корня (число чёрных узлов на пути от корня
    /// до отсутствующего потомка).
    pub fn validate_invariants(&self) -> Result<usize, ValidationError> {
        validate!(
            self.color_of(self.root) == Color::Black,
            ValidationError::RedRoot
        );

        let mut count = 0;
        let mut prev = None;
        let black_height = self.validate_subtree(self.root, None, &mut count, &mut prev)?;

        validate!(
            count == self.nodes.len(),
            ValidationError::LengthMismatch {
                expected: self.nodes.len(),
                actual: count
            }
        );

        Ok(black_height)
    }

    fn validate_subtree(
        &self,
        link: Link,
        parent: Link,
        count: &mut usize,
        prev: &mut Option<NodeId>,
    ) -> Result<usize, ValidationError> {
        let Some(id) = link else {
            return Ok(0);
        };

        validate!(
            *count < self.nodes.len(),
            ValidationError::CyclicReference {
                message: format!("slot {} reached after {} nodes", id.0, count)
            }
        );
        *count += 1;

        let node = self
            .nodes
            .get(id.0)
            .ok_or(ValidationError::DanglingLink { index: id.0 })?;

        validate!(
            node.parent == parent,
            ValidationError::InvalidParentLink {
                message: format!(
                    "slot {} points to {:?}, expected {:?}",
                    id.0, node.parent, parent
                )
            }
        );
        if node.color == Color::Red {
            validate!(
                self.color_of(node.left) == Color::Black && self.color_of(node.right) == Color::Black,
                ValidationError::RedRedViolation {
                    message: format!("slot {}", id.0)
                }
            );
        }

        let left = self.validate_subtree(node.left, Some(id), count, prev)?;

        if let Some(p) = *prev {
            validate!(
                self.cmp.less(&self.node(p).value, &node.value),
                ValidationError::SortOrderViolation {
                    message: format!("slot {} is not less than slot {}", p.0, id.0)
                }
            );
        }
        *prev = Some(id);

        let right = self.validate_subtree(node.right, Some(id), count, prev)?;

        validate!(
            left == right,
            ValidationError::BlackHeightMismatch { left, right }
        );

        Ok(left + usize::from(node.color == Color::Black))
    }

    /// Самый левый узел, удовлетворяющий монотонному предикату `pred`.
    fn bound_by<P>(
        &self,
        mut pred: P,
    ) -> Option<NodeId>
    where
        P: FnMut(&T) -> bool,
    {
        let mut best = None;
        let mut current = self.root;

        while let Some(id) = current {
            if pred(&self.node(id).value) {
                best = Some(id);
                current = self.node(id).left;
            } else {
                current = self.node(id).right;
            }
        }

        best
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для RbTree
////////////////////////////////////////////////////////////////////////////////

impl<T: Ord> Default for RbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RbTree<T, C> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for RbTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Comparator<T>> Extend<T> for RbTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(
        &mut self,
        iter: I,
    ) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RbTree<T, C> {
    type Item = &'a T;
    type IntoIter = RbTreeIter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, C> Iterator for RbTreeIter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.front?;

        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.tree.successor(id);
        }

        Some(&self.tree.node(id).value)
    }
}

impl<T, C> DoubleEndedIterator for RbTreeIter<'_, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.back?;

        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.tree.predecessor(id);
        }

        Some(&self.tree.node(id).value)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
