//! 城・壁のメンバーシップ表

use crate::types::Square;

/// マスごとの所属フラグ
#[derive(Debug, Clone, Copy)]
pub struct ZoneTable([bool; Square::NUM]);

impl ZoneTable {
    /// 指定マスが含まれるか
    #[inline]
    pub const fn contains(&self, sq: Square) -> bool {
        self.0[sq.index()]
    }

    /// 含まれるマスを列挙
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(|&sq| self.contains(sq))
    }

    /// 左上 (row, col) を起点とする 3x3 の城
    const fn castle(row: usize, col: usize) -> ZoneTable {
        let mut table = [false; Square::NUM];
        let mut r = row;
        while r < row + 3 {
            let mut c = col;
            while c < col + 3 {
                table[Square::at(r * Square::WIDTH + c).index()] = true;
                c += 1;
            }
            r += 1;
        }
        ZoneTable(table)
    }

    /// 城を囲む12マス（角は含まない）
    const fn wall(row: usize, col: usize) -> ZoneTable {
        let mut table = [false; Square::NUM];
        let mut i = 0;
        while i < 3 {
            // 上辺・下辺
            table[(row - 1) * Square::WIDTH + col + i] = true;
            table[(row + 3) * Square::WIDTH + col + i] = true;
            // 左辺・右辺
            table[(row + i) * Square::WIDTH + col - 1] = true;
            table[(row + i) * Square::WIDTH + col + 3] = true;
            i += 1;
        }
        ZoneTable(table)
    }
}

/// 白の城（c5〜e3）
pub static WHITE_CASTLE: ZoneTable = ZoneTable::castle(7, 2);
/// 黒の城（h10〜j8）
pub static BLACK_CASTLE: ZoneTable = ZoneTable::castle(2, 7);
/// 白の城壁
pub static WHITE_WALL: ZoneTable = ZoneTable::wall(7, 2);
/// 黒の城壁
pub static BLACK_WALL: ZoneTable = ZoneTable::wall(2, 7);

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(table: &ZoneTable) -> Vec<usize> {
        table.squares().map(Square::index).collect()
    }

    #[test]
    fn test_castle_layout() {
        assert_eq!(indices(&WHITE_CASTLE), vec![86, 87, 88, 98, 99, 100, 110, 111, 112]);
        assert_eq!(indices(&BLACK_CASTLE), vec![31, 32, 33, 43, 44, 45, 55, 56, 57]);
    }

    #[test]
    fn test_wall_layout() {
        assert_eq!(
            indices(&WHITE_WALL),
            vec![74, 75, 76, 85, 89, 97, 101, 109, 113, 122, 123, 124]
        );
        assert_eq!(
            indices(&BLACK_WALL),
            vec![19, 20, 21, 30, 34, 42, 46, 54, 58, 67, 68, 69]
        );
    }

    #[test]
    fn test_zones_do_not_overlap() {
        for sq in Square::all() {
            let hits = [&WHITE_CASTLE, &BLACK_CASTLE, &WHITE_WALL, &BLACK_WALL]
                .iter()
                .filter(|t| t.contains(sq))
                .count();
            assert!(hits <= 1, "{sq} belongs to {hits} zones");
        }
    }
}
