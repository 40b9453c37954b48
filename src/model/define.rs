// 型エイリアス
pub type Seat = usize; // 座席 (0~3の絶対座席)
pub type Rank = usize; // 牌の数字部分 (数牌:1~9, 風牌:1~4, 三元牌:1~3)
pub type TileId = usize; // 牌の識別番号 (0~135)
pub type Index = usize; // その他Index
pub type WindowId = u64; // 鳴き受付期間の識別番号

// Number
pub const SEAT: usize = 4; // 座席の数
pub const TILE: usize = 4; // 同種の牌の数
pub const TILE_COUNT: usize = 136; // 牌の総数
pub const HAND_SIZE: usize = 16; // 配牌時の手牌の枚数
pub const WIN_SETS: usize = 5; // 和了に必要な面子の数

// 次の座席 (この座席の直後に手番が回る座席, チーが可能な唯一の座席)
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % SEAT
}
