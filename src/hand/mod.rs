// 手牌の整列, 鳴き判定, 和了判定を行うモジュール
mod meld;
mod sort;
mod win;

pub use self::{
    meld::{can_chi, can_kong, can_pong, find_tiles, possible_an_kongs, possible_bu_kongs},
    sort::{group_by_kind, sort_hand, sorted_hand},
    win::{calc_winning_kinds, is_eight_pairs, is_winning_hand, WIN_TILE_COUNT},
};
