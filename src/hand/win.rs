use crate::model::*;

pub const WIN_TILE_COUNT: usize = WIN_SETS * 3 + 2; // 17
pub const EIGHT_PAIRS: usize = 8;

// [和了判定]
// 手牌(+和了牌候補)と副露から5面子1雀頭, または八対の和了形になっているかを判定
// 最初に見つかった分解で打ち切るので分解の列挙や点数計算には使用しない
pub fn is_winning_hand(hand: &[Tile], melds: &[Meld], candidate: Option<&Tile>) -> bool {
    let mut kinds: Vec<Kind> = hand.iter().map(|t| t.kind()).collect();
    if let Some(t) = candidate {
        kinds.push(t.kind());
    }
    kinds.sort();

    if melds.is_empty() && kinds.len() == WIN_TILE_COUNT && is_eight_pairs(&kinds) {
        return true;
    }

    let sets = match WIN_SETS.checked_sub(melds.len()) {
        Some(n) => n,
        None => return false,
    };
    // 面子と雀頭をすべて取り除ける枚数でなければ探索しても成功しない
    if kinds.len() != sets * 3 + 2 {
        return false;
    }

    let mut used = vec![false; kinds.len()];
    search_sets(&kinds, &mut used, kinds.len(), sets, false)
}

// 八対: ちょうど2枚の種類が8つ
// 17枚中16枚しか使わないため残りの1枚の扱いは未確定 (DESIGN.md参照)
pub fn is_eight_pairs(kinds: &[Kind]) -> bool {
    let mut ks = kinds.to_vec();
    ks.sort();
    ks.chunk_by(|a, b| a == b).filter(|g| g.len() == 2).count() == EIGHT_PAIRS
}

#[inline]
fn next_unused(used: &[bool], from: usize) -> Option<usize> {
    (from..used.len()).find(|&i| !used[i])
}

#[inline]
fn find_unused(ks: &[Kind], used: &[bool], k: Kind) -> Option<usize> {
    (0..ks.len()).find(|&i| !used[i] && ks[i] == k)
}

// 整列済みの牌をusedで取り除きながら探索
// 雀頭 -> 先頭の刻子 -> 先頭の牌から始まる順子 の順に試し, 最初の成功で終了
fn search_sets(ks: &[Kind], used: &mut [bool], remain: usize, sets: usize, has_pair: bool) -> bool {
    if remain == 0 {
        return sets == 0 && has_pair;
    }

    // 雀頭 (隣り合う同じ牌)
    if !has_pair {
        let mut cur = next_unused(used, 0);
        while let Some(a) = cur {
            let b = match next_unused(used, a + 1) {
                Some(b) => b,
                None => break,
            };
            if ks[a] == ks[b] {
                used[a] = true;
                used[b] = true;
                let ok = search_sets(ks, used, remain - 2, sets, true);
                used[a] = false;
                used[b] = false;
                if ok {
                    return true;
                }
            }
            cur = Some(b);
        }
    }

    if sets == 0 || remain < 3 {
        return false;
    }

    // 以下remain >= 3なので3枚とも存在する
    let a = match next_unused(used, 0) {
        Some(i) => i,
        None => return false,
    };

    // 刻子 (先頭の3枚)
    if let Some(b) = next_unused(used, a + 1) {
        if let Some(c) = next_unused(used, b + 1) {
            if ks[a] == ks[b] && ks[b] == ks[c] {
                used[a] = true;
                used[b] = true;
                used[c] = true;
                let ok = search_sets(ks, used, remain - 3, sets - 1, has_pair);
                used[a] = false;
                used[b] = false;
                used[c] = false;
                if ok {
                    return true;
                }
            }
        }
    }

    // 順子 (先頭の牌 + 同種の数字+1, +2 を値で検索, 字牌は不可)
    let k = ks[a];
    if let (Some(k1), Some(k2)) = (k.offset(1), k.offset(2)) {
        if let (Some(b), Some(c)) = (find_unused(ks, used, k1), find_unused(ks, used, k2)) {
            used[a] = true;
            used[b] = true;
            used[c] = true;
            let ok = search_sets(ks, used, remain - 3, sets - 1, has_pair);
            used[a] = false;
            used[b] = false;
            used[c] = false;
            if ok {
                return true;
            }
        }
    }

    false
}

// [和了牌判定]
// 1枚加えると和了形になる牌の種類の一覧 (手牌と副露で4枚使い切っている種類は除く)
pub fn calc_winning_kinds(hand: &[Tile], melds: &[Meld]) -> Vec<Kind> {
    let mut res = vec![];
    for k in all_kinds() {
        let used = hand.iter().filter(|t| t.kind() == k).count()
            + melds
                .iter()
                .flat_map(|m| m.tiles.iter())
                .filter(|t| t.kind() == k)
                .count();
        if used >= TILE {
            continue;
        }
        let t = Tile::new(TILE_COUNT, k); // 仮の牌 (識別番号は判定に使わない)
        if is_winning_hand(hand, melds, Some(&t)) {
            res.push(k);
        }
    }
    res
}

#[cfg(test)]
use crate::control::string::test_tiles;

#[cfg(test)]
fn extra(exp: &str) -> Tile {
    let kinds = crate::control::string::kinds_from_string(exp).unwrap();
    Tile::new(TILE_COUNT, kinds[0])
}

#[test]
fn test_normal_win() {
    let hand = test_tiles("m123456789p123456s99");
    assert_eq!(hand.len(), 17);
    assert!(is_winning_hand(&hand, &[], None));

    // 16枚 + 和了牌
    let hand = test_tiles("m123456789p123456s9");
    assert!(is_winning_hand(&hand, &[], Some(&extra("s9"))));
    assert!(!is_winning_hand(&hand, &[], Some(&extra("s8"))));
    assert!(!is_winning_hand(&hand, &[], None));
}

#[test]
fn test_win_with_triplets_and_honors() {
    let hand = test_tiles("w111222d333m99p555s789");
    assert!(is_winning_hand(&hand, &[], None));

    // 字牌は順子にならない
    let hand = test_tiles("w123w234d123m99p555s789");
    assert!(!is_winning_hand(&hand, &[], None));
}

#[test]
fn test_win_run_not_adjacent() {
    // 整列すると m1 m1 m2 m2 m3 m3 となり順子は隣接しない
    let hand = test_tiles("m112233p111s222w11d111");
    assert!(is_winning_hand(&hand, &[], None));

    let hand = test_tiles("m12344p111s222d111w111");
    assert!(is_winning_hand(&hand, &[], None));
}

#[test]
fn test_win_with_melds() {
    let melds = vec![
        Meld::new(MeldType::Pong, test_tiles("w444"), Some(2)),
        Meld::new(MeldType::AnKong, test_tiles("d2222"), None),
    ];
    let hand = test_tiles("m123456p789s1");
    assert_eq!(hand.len(), 10);
    assert!(is_winning_hand(&hand, &melds, Some(&extra("s1"))));
    assert!(!is_winning_hand(&hand, &melds, Some(&extra("s2"))));
    // 副露を考慮しないと枚数が合わない
    assert!(!is_winning_hand(&hand, &[], Some(&extra("s1"))));
}

#[test]
fn test_eight_pairs_literal() {
    // 8対子 + 孤立牌1枚 (17枚目は和了形に寄与しないが現行の規則では和了)
    let hand = test_tiles("m11p22s33w11w22d11d22m99m5");
    assert_eq!(hand.len(), 17);
    assert!(is_winning_hand(&hand, &[], None));

    // 同じ牌4枚は2対子として数えない
    let hand = test_tiles("m1111p22s33w11w22d11d22m9");
    assert!(!is_winning_hand(&hand, &[], None));

    // 7対子 + 刻子
    let hand = test_tiles("m111p22s33w11w22d11d22m99");
    assert!(!is_winning_hand(&hand, &[], None));

    // 副露がある場合は対象外
    let melds = vec![Meld::new(MeldType::Pong, test_tiles("s777"), Some(0))];
    let hand = test_tiles("m11p22s33w11w22d1");
    assert!(!is_winning_hand(&hand, &melds, Some(&extra("d1"))));
}

#[test]
fn test_malformed_sizes() {
    assert!(!is_winning_hand(&[], &[], None));
    assert!(!is_winning_hand(&test_tiles("m11"), &[], None));
    assert!(!is_winning_hand(&test_tiles("m123456789p12345"), &[], None));

    let pong = Meld::new(MeldType::Pong, test_tiles("s777"), Some(0));
    let melds = vec![pong; 6];
    assert!(!is_winning_hand(&test_tiles("m11"), &melds, None));
}

#[test]
fn test_pure() {
    let hand = test_tiles("m112233p111s222w1");
    let before = hand.clone();
    let c = extra("w1");
    let r1 = is_winning_hand(&hand, &[], Some(&c));
    let r2 = is_winning_hand(&hand, &[], Some(&c));
    assert_eq!(r1, r2);
    assert_eq!(hand, before);
}

#[test]
fn test_winning_kinds() {
    // m2345 + 4面子 → m2, m5 待ち
    let hand = test_tiles("m2345p111s222w333d111");
    assert_eq!(hand.len(), 16);
    let wins = calc_winning_kinds(&hand, &[]);
    assert_eq!(wins, vec![Kind(Suit::Man, 2), Kind(Suit::Man, 5)]);
}
