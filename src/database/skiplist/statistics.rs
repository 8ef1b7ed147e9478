use std::fmt::{self, Write as _};

use super::MAX_LEVEL;

/// Статистика структуры SkipList.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipListStatistics {
    /// Количество узлов
    pub node_count: usize,
    /// `height_histogram[h - 1]`: число узлов высоты `h`
    pub height_histogram: Vec<usize>,
    /// Текущий максимальный уровень списка
    pub current_level: usize,
    /// Максимально возможный уровень
    pub max_level: usize,
    /// Средняя высота узла
    pub average_height: f64,
}

impl SkipListStatistics {
    /// Создает пустую статистику для списка с уровнем `current_level`.
    pub fn new(current_level: usize) -> Self {
        Self {
            node_count: 0,
            height_histogram: vec![0; MAX_LEVEL],
            current_level,
            max_level: MAX_LEVEL,
            average_height: 0.0,
        }
    }

    /// Учитывает узел высоты `height` и пересчитывает среднюю высоту.
    pub fn record_node(
        &mut self,
        height: usize,
    ) {
        let total = self.average_height * self.node_count as f64 + height as f64;

        self.height_histogram[height - 1] += 1;
        self.node_count += 1;
        self.average_height = total / self.node_count as f64;
    }

    /// Число узлов, связанных на уровне `level` (с нуля).
    pub fn nodes_at_level(
        &self,
        level: usize,
    ) -> usize {
        self.height_histogram.iter().skip(level).sum()
    }
}

impl fmt::Display for SkipListStatistics {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut report = String::new();
        writeln!(report, "skiplist: {} nodes", self.node_count)?;
        writeln!(
            report,
            "  level: {} of {}",
            self.current_level, self.max_level
        )?;
        writeln!(report, "  average height: {:.2}", self.average_height)?;

        for (level, &count) in self.height_histogram.iter().enumerate() {
            if count > 0 {
                let percentage = (count as f64 / self.node_count as f64) * 100.0;
                writeln!(
                    report,
                    "  height {}: {} nodes ({:.1}%)",
                    level + 1,
                    count,
                    percentage
                )?;
            }
        }

        f.write_str(report.trim_end())
    }
}
