use crate::model::*;

use super::sort::group_by_kind;

// [鳴き判定]
// いずれも手牌を変更しない純粋な関数

// 手牌からkindに一致する牌を先頭からn枚返却 (足りない場合はNone)
pub fn find_tiles(hand: &[Tile], kind: Kind, n: usize) -> Option<Vec<Tile>> {
    let v: Vec<Tile> = hand.iter().filter(|t| t.kind() == kind).take(n).copied().collect();
    if v.len() == n {
        Some(v)
    } else {
        None
    }
}

#[inline]
fn count_kind(hand: &[Tile], kind: Kind) -> usize {
    hand.iter().filter(|t| t.kind() == kind).count()
}

// 碰: 同じ牌を2枚以上
pub fn can_pong(hand: &[Tile], tile: &Tile) -> bool {
    count_kind(hand, tile.kind()) >= 2
}

// 明槓: 同じ牌をちょうど3枚
pub fn can_kong(hand: &[Tile], tile: &Tile) -> bool {
    count_kind(hand, tile.kind()) == 3
}

// 暗槓: 手牌に4枚揃っている種類の一覧
pub fn possible_an_kongs(hand: &[Tile]) -> Vec<Kind> {
    group_by_kind(hand)
        .into_iter()
        .filter(|&(_, n)| n == TILE)
        .map(|(k, _)| k)
        .collect()
}

// 加槓: 碰の4枚目を手牌に持っている場合, (鳴きのindex, 手牌の牌)の一覧
pub fn possible_bu_kongs(hand: &[Tile], melds: &[Meld]) -> Vec<(Index, Tile)> {
    let mut res = vec![];
    for (i, m) in melds.iter().enumerate() {
        if m.meld_type != MeldType::Pong {
            continue;
        }
        if let Some(t) = hand.iter().find(|t| t.kind() == m.kind()) {
            res.push((i, *t));
        }
    }
    res
}

// 吃: 捨て牌と順子を構成できる手牌2枚の組み合わせ一覧
// {r-2,r-1}, {r-1,r+1}, {r+1,r+2} の順にそれぞれ独立に判定
// 上家からの捨て牌であるかどうかはここでは判定しない
pub fn can_chi(hand: &[Tile], tile: &Tile) -> Vec<[Tile; 2]> {
    if tile.is_honor() {
        return vec![];
    }

    let k = tile.kind();
    let find = |d: isize| {
        k.offset(d)
            .and_then(|k2| hand.iter().find(|t| t.kind() == k2).copied())
    };

    let mut res = vec![];
    for (d0, d1) in [(-2, -1), (-1, 1), (1, 2)] {
        if let (Some(t0), Some(t1)) = (find(d0), find(d1)) {
            res.push([t0, t1]);
        }
    }
    res
}

#[cfg(test)]
use crate::control::string::test_tiles;

#[cfg(test)]
fn tile(exp: &str) -> Tile {
    // 手牌側と識別番号が重ならないように4枚目を使う
    test_tiles(&format!("{0}{0}{0}{0}", exp))[3]
}

#[test]
fn test_pong_kong() {
    let hand = test_tiles("m55p123");
    assert!(can_pong(&hand, &tile("m5")));
    assert!(!can_kong(&hand, &tile("m5")));
    assert!(!can_pong(&hand, &tile("p1")));

    let hand = test_tiles("m555p123");
    assert!(can_pong(&hand, &tile("m5")));
    assert!(can_kong(&hand, &tile("m5")));
}

#[test]
fn test_an_kongs() {
    let hand = test_tiles("m5555p1111s123w2");
    assert_eq!(
        possible_an_kongs(&hand),
        vec![Kind(Suit::Man, 5), Kind(Suit::Pin, 1)]
    );
    assert!(possible_an_kongs(&test_tiles("m555p111")).is_empty());
}

#[test]
fn test_bu_kongs() {
    let pong = Meld::new(MeldType::Pong, test_tiles("s777"), Some(1));
    let chi = Meld::new(MeldType::Chi, test_tiles("m123"), Some(3));
    let hand = test_tiles("s7m1");
    let hand: Vec<Tile> = vec![tile("s7"), hand[1]];
    let res = possible_bu_kongs(&hand, &[chi.clone(), pong.clone()]);
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].0, 1);
    assert_eq!(res[0].1.kind(), Kind(Suit::Sou, 7));

    assert!(possible_bu_kongs(&test_tiles("m1"), &[chi, pong]).is_empty());
}

#[test]
fn test_chi() {
    let hand = test_tiles("m34679");
    let opts = can_chi(&hand, &tile("m5"));
    let kinds: Vec<(Rank, Rank)> = opts.iter().map(|o| (o[0].rank, o[1].rank)).collect();
    assert_eq!(kinds, vec![(3, 4), (4, 6), (6, 7)]);

    // 端の牌
    let opts = can_chi(&test_tiles("m23"), &tile("m1"));
    assert_eq!(opts.len(), 1);
    assert!(can_chi(&test_tiles("m89"), &tile("m9")).is_empty());

    // 字牌は吃できない
    assert!(can_chi(&test_tiles("w123"), &tile("w2")).is_empty());
    // 別の種類の数牌は対象外
    assert!(can_chi(&test_tiles("p46"), &tile("m5")).is_empty());
}
