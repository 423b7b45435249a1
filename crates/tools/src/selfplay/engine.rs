use chad_core::Position;
use chad_core::search::{MoveStrategy, SearchConfig, SearchLimits, SearchResult};

/// 対局に参加する探索エンジン
pub struct Engine {
    pub label: String,
    strategy: Box<dyn MoveStrategy>,
    limits: SearchLimits,
}

impl Engine {
    pub fn new(label: impl Into<String>, strategy: Box<dyn MoveStrategy>, limits: SearchLimits) -> Self {
        Engine {
            label: label.into(),
            strategy,
            limits,
        }
    }

    /// 設定から組み立てる。ラベルは戦略名
    pub fn from_config(config: &SearchConfig) -> Self {
        Engine::new(config.algorithm.label(), config.build_strategy(), config.limits())
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn search(&mut self, position: &Position) -> SearchResult {
        self.strategy.search(position, &self.limits)
    }
}
