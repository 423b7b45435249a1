//! 置換表（Transposition Table）
//!
//! 局面の指紋をキーに、探索深さ・評価値・境界値種別を覚えておく。
//! 探索は1スレッドで走るので同期は持たない。並列探索に広げるならスレッド毎の表か
//! 明示的なロックが必要。
//!
//! エントリを明示的に無効化することはない。古さは格納深さと必要深さの比較だけで判断する。

mod entry;

pub use entry::TtEntry;

use std::collections::HashMap;

use crate::position::Fingerprint;
use crate::types::Bound;

/// 置換表の参照結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtProbe {
    /// 使えるエントリなし（窓は狭まっている場合がある）
    Miss,
    /// この値をそのまま返してよい
    Cutoff(i32),
}

/// 置換表
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<Fingerprint, TtEntry>,
    probes: u64,
    hits: u64,
}

impl TranspositionTable {
    /// 空の表
    pub fn new() -> Self {
        Self::default()
    }

    /// 容量を確保した空の表
    pub fn with_capacity(capacity: usize) -> Self {
        TranspositionTable {
            entries: HashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// エントリを引く
    #[inline]
    pub fn get(&self, key: Fingerprint) -> Option<&TtEntry> {
        self.entries.get(&key)
    }

    /// エントリを書き込む（常に上書き）
    #[inline]
    pub fn store(&mut self, key: Fingerprint, depth: u32, score: i32, bound: Bound) {
        self.entries.insert(key, TtEntry::new(depth, score, bound));
    }

    /// 探索窓と照合する
    ///
    /// 格納深さが `depth` 以上のエントリだけを使う。
    /// Exact はそのまま返し、Lower は alpha を、Upper は beta を詰める。
    /// 窓が閉じたら Lower なら beta、それ以外は alpha を返す。
    pub fn probe(&mut self, key: Fingerprint, depth: u32, alpha: &mut i32, beta: &mut i32) -> TtProbe {
        self.probes += 1;
        let Some(entry) = self.entries.get(&key).copied() else {
            return TtProbe::Miss;
        };
        if entry.depth < depth {
            return TtProbe::Miss;
        }
        self.hits += 1;
        match entry.bound {
            Bound::Exact => return TtProbe::Cutoff(entry.score),
            Bound::Lower => *alpha = (*alpha).max(entry.score),
            Bound::Upper => *beta = (*beta).min(entry.score),
            Bound::None => return TtProbe::Miss,
        }
        if *alpha >= *beta {
            let score = if entry.bound == Bound::Lower {
                *beta
            } else {
                *alpha
            };
            return TtProbe::Cutoff(score);
        }
        TtProbe::Miss
    }

    /// エントリ数
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全エントリと統計を消す
    pub fn clear(&mut self) {
        self.entries.clear();
        self.probes = 0;
        self.hits = 0;
    }

    /// (参照回数, 使えたエントリ数)
    #[inline]
    pub fn stats(&self) -> (u64, u64) {
        (self.probes, self.hits)
    }

    /// 使えたエントリの割合（0.0〜1.0）
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn key() -> Fingerprint {
        Position::initial().fingerprint()
    }

    #[test]
    fn test_probe_miss_on_empty_table() {
        let mut tt = TranspositionTable::new();
        let (mut alpha, mut beta) = (i32::MIN, i32::MAX);
        assert_eq!(tt.probe(key(), 1, &mut alpha, &mut beta), TtProbe::Miss);
        assert_eq!(tt.stats(), (1, 0));
    }

    #[test]
    fn test_probe_ignores_shallow_entry() {
        let mut tt = TranspositionTable::new();
        tt.store(key(), 2, 123, Bound::Exact);
        let (mut alpha, mut beta) = (i32::MIN, i32::MAX);
        assert_eq!(tt.probe(key(), 3, &mut alpha, &mut beta), TtProbe::Miss);
        assert_eq!(tt.probe(key(), 2, &mut alpha, &mut beta), TtProbe::Cutoff(123));
        assert_eq!(tt.probe(key(), 1, &mut alpha, &mut beta), TtProbe::Cutoff(123));
    }

    #[test]
    fn test_probe_narrows_window() {
        let mut tt = TranspositionTable::new();
        tt.store(key(), 4, 50, Bound::Lower);
        let (mut alpha, mut beta) = (0, 100);
        assert_eq!(tt.probe(key(), 4, &mut alpha, &mut beta), TtProbe::Miss);
        assert_eq!((alpha, beta), (50, 100));

        tt.store(key(), 4, 30, Bound::Upper);
        let (mut alpha, mut beta) = (0, 100);
        assert_eq!(tt.probe(key(), 4, &mut alpha, &mut beta), TtProbe::Miss);
        assert_eq!((alpha, beta), (0, 30));
    }

    #[test]
    fn test_probe_window_collapse() {
        let mut tt = TranspositionTable::new();
        tt.store(key(), 4, 200, Bound::Lower);
        let (mut alpha, mut beta) = (0, 100);
        assert_eq!(tt.probe(key(), 4, &mut alpha, &mut beta), TtProbe::Cutoff(100));

        tt.store(key(), 4, -5, Bound::Upper);
        let (mut alpha, mut beta) = (0, 100);
        assert_eq!(tt.probe(key(), 4, &mut alpha, &mut beta), TtProbe::Cutoff(0));
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::with_capacity(16);
        tt.store(key(), 1, 0, Bound::Exact);
        assert_eq!(tt.len(), 1);
        tt.clear();
        assert!(tt.is_empty());
        assert_eq!(tt.hit_rate(), 0.0);
    }
}
