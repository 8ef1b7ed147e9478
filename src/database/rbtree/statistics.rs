use std::fmt;

use super::Color;

/// Статистика формы красно-чёрного дерева.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RbTreeStatistics {
    pub node_count: usize,
    pub red_nodes: usize,
    pub black_nodes: usize,
    /// Число узлов на самом длинном пути от корня
    pub height: usize,
    /// Число чёрных узлов на пути от корня до листа
    pub black_height: usize,
}

impl RbTreeStatistics {
    pub fn record_node(
        &mut self,
        color: Color,
        depth: usize,
    ) {
        self.node_count += 1;
        match color {
            Color::Red => self.red_nodes += 1,
            Color::Black => self.black_nodes += 1,
        }
        self.height = self.height.max(depth);
    }
}

impl fmt::Display for RbTreeStatistics {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "rbtree: {} nodes", self.node_count)?;
        writeln!(f, "  red: {}, black: {}", self.red_nodes, self.black_nodes)?;
        write!(
            f,
            "  height: {}, black height: {}",
            self.height, self.black_height
        )
    }
}
