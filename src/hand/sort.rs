use crate::model::*;

// 手牌の正規順 (萬子, 筒子, 索子, 風牌, 三元牌の順, 同種内は数字順)
// 同じ種類の牌は識別番号順に並べて結果を決定的にする
#[inline]
pub fn sort_hand(hand: &mut [Tile]) {
    hand.sort();
}

pub fn sorted_hand(hand: &[Tile]) -> Vec<Tile> {
    let mut v = hand.to_vec();
    sort_hand(&mut v);
    v
}

// 手牌を(種類, 枚数)の一覧に変換 (正規順)
pub fn group_by_kind(hand: &[Tile]) -> Vec<(Kind, usize)> {
    let mut kinds: Vec<Kind> = hand.iter().map(|t| t.kind()).collect();
    kinds.sort();
    let mut res: Vec<(Kind, usize)> = vec![];
    for k in kinds {
        match res.last_mut() {
            Some((k0, n)) if *k0 == k => *n += 1,
            _ => res.push((k, 1)),
        }
    }
    res
}

#[cfg(test)]
use crate::control::string::test_tiles;

#[test]
fn test_sort_hand() {
    let hand = test_tiles("d1w4s9m1p3m1");
    let sorted = sorted_hand(&hand);
    let kinds: Vec<Kind> = sorted.iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            Kind(Suit::Man, 1),
            Kind(Suit::Man, 1),
            Kind(Suit::Pin, 3),
            Kind(Suit::Sou, 9),
            Kind(Suit::Wind, 4),
            Kind(Suit::Dragon, 1),
        ]
    );
    // 同種の牌は識別番号順
    assert!(sorted[0].id < sorted[1].id);
}

#[test]
fn test_group_by_kind() {
    let hand = test_tiles("m112w33d1");
    assert_eq!(
        group_by_kind(&hand),
        vec![
            (Kind(Suit::Man, 1), 2),
            (Kind(Suit::Man, 2), 1),
            (Kind(Suit::Wind, 3), 2),
            (Kind(Suit::Dragon, 1), 1),
        ]
    );
}
