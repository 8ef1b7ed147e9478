//! Выбор уровня для новых узлов.
//!
//! Источник уровня ([`LevelSource`]) только предлагает «сырое» значение;
//! окончательный уровень вычисляет [`cap_level`]: ограничение диапазоном
//! `1..=MAX_LEVEL` и адаптивное понижение для маленьких списков.

use std::collections::VecDeque;

use ordix_error::CollectionError;
use rand::{rngs::StdRng, RngCore, SeedableRng};

/// Максимальный уровень пропускного списка.
pub const MAX_LEVEL: usize = 40;

/// Маска младших `MAX_LEVEL` бит случайного числа.
const LEVEL_MASK: u64 = (1 << MAX_LEVEL) - 1;

/// Уровни, начиная с которых действует адаптивное ограничение.
const CAP_FLOOR: usize = 3;

/// Источник уровней для новых узлов.
pub trait LevelSource {
    /// Возвращает предлагаемый уровень нового узла.
    fn draw(&mut self) -> usize;
}

/// Геометрическое распределение: P(level = k) = 2^-k.
#[derive(Debug, Clone)]
pub struct GeometricLevels<R = StdRng> {
    rng: R,
}

/// Всегда возвращает один и тот же уровень.
///
/// С `FixedLevels(1)` список вырождается в обычный отсортированный
/// связный список.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLevels(pub usize);

/// Возвращает уровни из заданной последовательности, затем `1`.
#[derive(Debug, Clone, Default)]
pub struct SequenceLevels {
    queue: VecDeque<usize>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl GeometricLevels<StdRng> {
    /// Источник, инициализированный энтропией ОС.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Детерминированный источник для воспроизводимых прогонов.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> GeometricLevels<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl FixedLevels {
    /// Проверенный конструктор: уровень должен лежать в `1..=MAX_LEVEL`.
    pub fn checked(level: usize) -> Result<Self, CollectionError> {
        if (1..=MAX_LEVEL).contains(&level) {
            Ok(Self(level))
        } else {
            Err(CollectionError::InvalidLevel {
                level,
                max: MAX_LEVEL,
            })
        }
    }
}

impl SequenceLevels {
    pub fn new<I: IntoIterator<Item = usize>>(levels: I) -> Self {
        Self {
            queue: levels.into_iter().collect(),
        }
    }
}

/// Вычисляет итоговый уровень нового узла.
///
/// `len`: количество элементов до вставки. Пока уровень больше 3 и
/// `2^(level-3)` превышает `len`, уровень понижается.
pub fn cap_level(
    drawn: usize,
    len: usize,
) -> usize {
    let mut level = drawn.clamp(1, MAX_LEVEL);

    while level > CAP_FLOOR && (1usize << (level - CAP_FLOOR)) > len {
        level -= 1;
    }

    level
}

////////////////////////////////////////////////////////////////////////////////
// Реализации LevelSource
////////////////////////////////////////////////////////////////////////////////

impl<R: RngCore> LevelSource for GeometricLevels<R> {
    fn draw(&mut self) -> usize {
        let bits = self.rng.next_u64() & LEVEL_MASK;
        let bit_len = (u64::BITS - bits.leading_zeros()) as usize;
        // bits == 0 даёт MAX_LEVEL + 1, что обрезается в cap_level.
        MAX_LEVEL - bit_len + 1
    }
}

impl LevelSource for FixedLevels {
    fn draw(&mut self) -> usize {
        self.0
    }
}

impl LevelSource for SequenceLevels {
    fn draw(&mut self) -> usize {
        self.queue.pop_front().unwrap_or(1)
    }
}

impl Default for GeometricLevels<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, 0, 1)]
    #[case(3, 0, 3)]
    #[case(4, 0, 3)]
    #[case(4, 2, 4)]
    #[case(10, 7, 5)]
    #[case(10, 8, 6)]
    #[case(0, 100, 1)]
    #[case(41, usize::MAX, MAX_LEVEL)]
    fn test_cap_level(
        #[case] drawn: usize,
        #[case] len: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(cap_level(drawn, len), expected);
    }

    #[test]
    fn test_geometric_extremes() {
        // Все младшие биты выставлены: минимальный уровень.
        let mut all_ones = GeometricLevels::new(StepRng::new(LEVEL_MASK, 0));
        assert_eq!(all_ones.draw(), 1);

        // Ноль: уровень выходит за потолок и будет обрезан.
        let mut zero = GeometricLevels::new(StepRng::new(0, 0));
        assert_eq!(zero.draw(), MAX_LEVEL + 1);

        // Только бит 0: длина 1, уровень MAX_LEVEL.
        let mut one = GeometricLevels::new(StepRng::new(1, 0));
        assert_eq!(one.draw(), MAX_LEVEL);
    }

    #[test]
    fn test_geometric_distribution_is_roughly_halving() {
        let mut source = GeometricLevels::seeded(42);
        let mut counts = [0usize; 4];

        for _ in 0..10_000 {
            let level = source.draw();
            if level <= counts.len() {
                counts[level - 1] += 1;
            }
        }

        // Около 5000 / 2500 / 1250 / 625.
        assert!(counts[0] > 4_500 && counts[0] < 5_500);
        assert!(counts[1] > 2_000 && counts[1] < 3_000);
        assert!(counts[0] > counts[1] && counts[1] > counts[2] && counts[2] > counts[3]);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = GeometricLevels::seeded(7);
        let mut b = GeometricLevels::seeded(7);

        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[rstest]
    #[case(1, true)]
    #[case(MAX_LEVEL, true)]
    #[case(0, false)]
    #[case(MAX_LEVEL + 1, false)]
    fn test_fixed_levels_checked(
        #[case] level: usize,
        #[case] ok: bool,
    ) {
        match FixedLevels::checked(level) {
            Ok(source) => {
                assert!(ok);
                assert_eq!(source, FixedLevels(level));
            }
            Err(err) => {
                assert!(!ok);
                assert_eq!(
                    err,
                    CollectionError::InvalidLevel {
                        level,
                        max: MAX_LEVEL
                    }
                );
            }
        }
    }

    #[test]
    fn test_sequence_levels() {
        let mut source = SequenceLevels::new([3, 5]);
        assert_eq!(source.draw(), 3);
        assert_eq!(source.draw(), 5);
        assert_eq!(source.draw(), 1);
    }
}
