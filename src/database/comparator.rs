//! Стратегии сравнения ключей.
//!
//! Обе упорядоченные структуры параметризованы [`Comparator`] и вызывают
//! только его, никогда не используя операторы сравнения напрямую. Поэтому
//! «естественный» порядок и пользовательская функция проходят через один и
//! тот же код обхода.
//!
//! Компаратор обязан задавать строгий полный порядок (транзитивный и
//! согласованный). Нарушение этого условия не обнаруживается и приводит к
//! неопределённому (но memory-safe) поведению структур.

use std::{cmp::Ordering, fmt};

/// Стратегия упорядочивания значений типа `T`.
pub trait Comparator<T: ?Sized> {
    /// Трёхстороннее сравнение `a` с `b`.
    fn compare(
        &self,
        a: &T,
        b: &T,
    ) -> Ordering;

    /// `a < b` в терминах компаратора.
    #[inline]
    fn less(
        &self,
        a: &T,
        b: &T,
    ) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// `a == b` в терминах компаратора.
    #[inline]
    fn equal(
        &self,
        a: &T,
        b: &T,
    ) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Естественный порядок типа, реализующего [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

/// Пользовательская трёхсторонняя функция сравнения.
#[derive(Clone, Copy)]
pub struct CompareFn<F>(pub F);

/// Пользовательская функция «меньше».
///
/// Равенство выводится как `!less(a, b) && !less(b, a)`, поэтому на каждое
/// равное сравнение приходится два вызова функции.
#[derive(Clone, Copy)]
pub struct LessFn<F>(pub F);

/// Обращает порядок вложенного компаратора.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

/// Компаратор, выбираемый во время выполнения.
pub type DynComparator<T> = CompareFn<Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>>;

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<F> CompareFn<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> LessFn<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T: 'static> CompareFn<Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>> {
    /// Упаковывает произвольный компаратор в [`DynComparator`].
    pub fn boxed<C>(cmp: C) -> DynComparator<T>
    where
        C: Comparator<T> + Send + Sync + 'static,
    {
        CompareFn(Box::new(move |a: &T, b: &T| cmp.compare(a, b)))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Реализации Comparator
////////////////////////////////////////////////////////////////////////////////

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(
        &self,
        a: &T,
        b: &T,
    ) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for CompareFn<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(
        &self,
        a: &T,
        b: &T,
    ) -> Ordering {
        (self.0)(a, b)
    }
}

impl<T: ?Sized, F> Comparator<T> for LessFn<F>
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn compare(
        &self,
        a: &T,
        b: &T,
    ) -> Ordering {
        if (self.0)(a, b) {
            Ordering::Less
        } else if (self.0)(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    #[inline]
    fn less(
        &self,
        a: &T,
        b: &T,
    ) -> bool {
        (self.0)(a, b)
    }
}

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline]
    fn compare(
        &self,
        a: &T,
        b: &T,
    ) -> Ordering {
        self.0.compare(b, a)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl<F> fmt::Debug for CompareFn<F> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("CompareFn(..)")
    }
}

impl<F> fmt::Debug for LessFn<F> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("LessFn(..)")
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
