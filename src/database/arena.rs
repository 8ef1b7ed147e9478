//! Арена узлов со стабильными индексами.
//!
//! Обе упорядоченные структуры (skip list и красно-чёрное дерево) хранят узлы
//! в арене и ссылаются друг на друга индексами, а не указателями. Индекс
//! остаётся валидным до явного удаления; освобождённые слоты переиспользуются
//! следующими вставками.

use std::{
    mem,
    ops::{Index, IndexMut},
};

/// Слот арены.
#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Хранилище значений с O(1) вставкой, удалением и доступом по индексу.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<T> Arena<T> {
    /// Создаёт пустую арену.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Создаёт пустую арену с заранее выделенной ёмкостью.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Кладёт значение в арену и возвращает его индекс.
    pub fn insert(
        &mut self,
        value: T,
    ) -> usize {
        self.len += 1;

        match self.free_head {
            Some(idx) => {
                if let Slot::Vacant { next_free } = self.slots[idx] {
                    self.free_head = next_free;
                }
                self.slots[idx] = Slot::Occupied(value);
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(value));
                self.slots.len() - 1
            }
        }
    }

    /// Забирает значение из слота, освобождая его.
    ///
    /// Возвращает `None`, если слот уже свободен или индекс вне арены.
    pub fn try_remove(
        &mut self,
        idx: usize,
    ) -> Option<T> {
        match self.slots.get(idx)? {
            Slot::Occupied(_) => {}
            Slot::Vacant { .. } => return None,
        }

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };

        match mem::replace(&mut self.slots[idx], vacant) {
            Slot::Occupied(value) => {
                self.free_head = Some(idx);
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant { .. } => None,
        }
    }

    /// Забирает значение из занятого слота.
    ///
    /// # Panics
    ///
    /// Паникует, если слот свободен: структуры над ареной никогда не хранят
    /// индекс освобождённого узла.
    pub fn remove(
        &mut self,
        idx: usize,
    ) -> T {
        match self.try_remove(idx) {
            Some(value) => value,
            None => panic!("arena slot {idx} is vacant"),
        }
    }

    pub fn get(
        &self,
        idx: usize,
    ) -> Option<&T> {
        match self.slots.get(idx)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(
        &mut self,
        idx: usize,
    ) -> Option<&mut T> {
        match self.slots.get_mut(idx)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Проверяет, занят ли слот.
    pub fn contains(
        &self,
        idx: usize,
    ) -> bool {
        self.get(idx).is_some()
    }

    /// Количество занятых слотов.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Освобождает все слоты. Выделенная память сохраняется.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для Arena
////////////////////////////////////////////////////////////////////////////////

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = T;

    fn index(
        &self,
        idx: usize,
    ) -> &T {
        match self.get(idx) {
            Some(value) => value,
            None => panic!("arena slot {idx} is vacant"),
        }
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    fn index_mut(
        &mut self,
        idx: usize,
    ) -> &mut T {
        match self.get_mut(idx) {
            Some(value) => value,
            None => panic!("arena slot {idx} is vacant"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
