use std::path::Path;

use anyhow::{Context, Result};
use chad_core::Alliance;
use chad_core::search::SearchConfig;
use serde::{Deserialize, Serialize};

/// 対局設定ファイル（TOML）
///
/// ```toml
/// [white]
/// algorithm = "iterative_deepening"
/// depth = 3
///
/// [black]
/// algorithm = "mcts"
/// time_limit_ms = 1000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub white: SearchConfig,
    pub black: SearchConfig,
}

impl MatchConfig {
    pub fn side(&self, alliance: Alliance) -> &SearchConfig {
        alliance.choose(&self.white, &self.black)
    }

    pub fn side_mut(&mut self, alliance: Alliance) -> &mut SearchConfig {
        alliance.choose(&mut self.white, &mut self.black)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse match config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_toml(&text).with_context(|| format!("in {}", path.display()))?;
        log::debug!("loaded match config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chad_core::search::StrategyKind;

    #[test]
    fn parse_partial_toml() {
        let config = MatchConfig::from_toml(
            r#"
            [white]
            algorithm = "alpha_beta_tt"
            depth = 3

            [black]
            algorithm = "mcts"

            [black.mcts]
            iterations = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.white.algorithm, StrategyKind::AlphaBetaTt);
        assert_eq!(config.white.depth, 3);
        assert_eq!(config.side(Alliance::Black).algorithm, StrategyKind::Mcts);
        assert_eq!(config.black.mcts.iterations, Some(200));
        assert_eq!(config.black.depth, SearchConfig::default().depth);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(MatchConfig::from_toml("").unwrap(), MatchConfig::default());
    }

    #[test]
    fn unknown_algorithm_is_error() {
        assert!(MatchConfig::from_toml("[white]\nalgorithm = \"negamax\"\n").is_err());
    }
}
