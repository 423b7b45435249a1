//! 指し手の並べ替えとキラー手

use crate::position::Position;
use crate::types::Move;

/// キラー手テーブル
///
/// 深さごとに、カットを起こした最後の2つの静かな手を覚える。
/// 深さ d はスロット d-1 に対応し、深さ0（と表の大きさを超える深さ）はスロットを持たない。
#[derive(Debug, Clone, Default)]
pub struct KillerTable {
    slots: Vec<[Option<Move>; 2]>,
}

impl KillerTable {
    /// 深さ1〜`max_depth` 用の表
    pub fn new(max_depth: u32) -> Self {
        KillerTable {
            slots: vec![[None, None]; max_depth as usize],
        }
    }

    /// 深さに対応するスロット番号
    #[inline]
    fn slot(&self, depth: u32) -> Option<usize> {
        let index = (depth as usize).checked_sub(1)?;
        (index < self.slots.len()).then_some(index)
    }

    /// 深さ `depth` のキラー手
    pub fn get(&self, depth: u32) -> Option<&[Option<Move>; 2]> {
        self.slot(depth).map(|i| &self.slots[i])
    }

    /// キラー手かどうか
    pub fn is_killer(&self, depth: u32, mv: &Move) -> bool {
        self.get(depth)
            .is_some_and(|slot| slot.iter().any(|k| k.as_ref() == Some(mv)))
    }

    /// カットを起こした手を記録する。取る手は記録しない
    pub fn store(&mut self, depth: u32, mv: &Move) {
        if mv.is_capture() {
            return;
        }
        let Some(i) = self.slot(depth) else {
            return;
        };
        let slot = &mut self.slots[i];
        if slot[0].as_ref() != Some(mv) {
            slot[1] = slot[0].take();
            slot[0] = Some(mv.clone());
        }
    }
}

/// 取る手を MVV-LVA の大きい順に先頭へ、次にキラー手、残りは生成順
pub fn order_moves(moves: &[Move], killers: Option<&[Option<Move>; 2]>) -> Vec<Move> {
    let mut ordered = moves.to_vec();
    ordered.sort_by_key(|mv| match mv.mvv_lva() {
        Some(gain) => (0u8, -gain),
        None if is_listed(killers, mv) => (1, 0),
        None => (2, 0),
    });
    ordered
}

/// ルートで調べる順: 内部ノードと同じく取る手を先に（ルートにキラーはない）
pub fn root_moves(position: &Position) -> Vec<Move> {
    order_moves(position.legal_moves(position.side_to_move()), None)
}

/// 取る手だけを MVV-LVA の大きい順に
pub fn ordered_captures(moves: &[Move]) -> Vec<Move> {
    let mut captures: Vec<Move> = moves.iter().filter(|m| m.is_capture()).cloned().collect();
    captures.sort_by_key(|mv| std::cmp::Reverse(mv.mvv_lva().unwrap_or(i32::MIN)));
    captures
}

fn is_listed(killers: Option<&[Option<Move>; 2]>, mv: &Move) -> bool {
    killers.is_some_and(|slot| slot.iter().any(|k| k.as_ref() == Some(mv)))
}
