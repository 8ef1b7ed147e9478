use std::cmp::Ordering;

use tracing::debug;

use crate::{
    CompareFn, DynComparator, EngineKind, GeometricLevels, KeyOrderKind, NaturalOrder,
    OrderedMap, RbTreeMap, Reverse, Settings, SkipList, ValidationError,
};

/// Skip list с компаратором, выбранным во время выполнения.
pub type SkipListIndex = SkipList<String, String, DynComparator<String>>;

/// Отображение на красно-чёрном дереве с компаратором, выбранным во время
/// выполнения.
pub type RbTreeIndex = RbTreeMap<String, String, DynComparator<String>>;

pub enum IndexEngine {
    SkipList(SkipListIndex),
    RbTree(RbTreeIndex),
}

impl IndexEngine {
    /// Initialize index engine based on the passed settings.
    pub fn initialize(settings: &Settings) -> Self {
        let cmp = key_comparator(settings.order);

        let engine = match settings.engine {
            EngineKind::SkipList => {
                let levels = match settings.seed {
                    Some(seed) => GeometricLevels::seeded(seed),
                    None => GeometricLevels::from_entropy(),
                };
                Self::SkipList(SkipList::with_parts(cmp, levels))
            }
            EngineKind::RbTree => Self::RbTree(RbTreeMap::with_comparator(cmp)),
        };

        debug!(
            engine = engine.name(),
            order = %settings.order,
            seed = ?settings.seed,
            "Index engine initialized"
        );
        engine
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            Self::SkipList(_) => EngineKind::SkipList,
            Self::RbTree(_) => EngineKind::RbTree,
        }
    }

    pub fn name(&self) -> &'static str {
        self.get_store().engine_name()
    }

    /// Gets a reference to the index via the common `OrderedMap` trait.
    pub fn get_store(&self) -> &dyn OrderedMap<String, String> {
        match self {
            Self::SkipList(index) => index,
            Self::RbTree(index) => index,
        }
    }

    pub fn get_store_mut(&mut self) -> &mut dyn OrderedMap<String, String> {
        match self {
            Self::SkipList(index) => index,
            Self::RbTree(index) => index,
        }
    }

    /// Сводка о форме структуры (узлы, уровни или высоты).
    pub fn summary(&self) -> String {
        match self {
            Self::SkipList(index) => index.statistics().to_string(),
            Self::RbTree(index) => index.statistics().to_string(),
        }
    }

    pub fn check(&self) -> Result<(), ValidationError> {
        self.get_store().check()
    }
}

/// Строит компаратор строковых ключей для заданного порядка.
pub fn key_comparator(order: KeyOrderKind) -> DynComparator<String> {
    match order {
        KeyOrderKind::Natural => CompareFn::boxed(NaturalOrder),
        KeyOrderKind::Reverse => CompareFn::boxed(Reverse(NaturalOrder)),
    }
}

/// Сравнение ключей в порядке, заданном настройками.
pub fn compare_keys(
    order: KeyOrderKind,
    a: &str,
    b: &str,
) -> Ordering {
    match order {
        KeyOrderKind::Natural => a.cmp(b),
        KeyOrderKind::Reverse => b.cmp(a),
    }
}
