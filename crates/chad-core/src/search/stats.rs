//! 探索統計

use std::time::Duration;

/// 探索統計カウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// 訪問ノード数（静止探索を含む）
    pub nodes: u64,
    /// 評価関数を呼んだ局面数（MCTS ではプレイアウト回数）
    pub evaluated: u64,
    /// 置換表で打ち切れた回数
    pub tt_hits: u64,
    /// 完了した最大深さ（MCTS では木の最大深さ）
    pub depth_reached: u32,
    /// 経過時間
    pub elapsed: Duration,
}

impl SearchStats {
    /// 1秒あたりのノード数
    pub fn nps(&self) -> u64 {
        let millis = self.elapsed.as_millis() as u64;
        if millis == 0 {
            0
        } else {
            self.nodes.saturating_mul(1000) / millis
        }
    }
}
