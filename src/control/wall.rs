use rand::prelude::*;

use super::string::{kinds_from_string, tiles_from_kinds};
use crate::model::*;

// 配牌の結果
#[derive(Debug, Clone)]
pub struct DealtWall {
    pub hands: [Vec<Tile>; SEAT], // 各座席16枚
    pub deck: Vec<Tile>,          // 残りの牌山 (末尾から消費, 末尾は親の17枚目)
}

// 全136枚 (識別番号順)
pub fn all_tiles() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(TILE_COUNT);
    for (ki, k) in all_kinds().into_iter().enumerate() {
        for n in 0..TILE {
            tiles.push(Tile::new(ki * TILE + n, k));
        }
    }
    tiles
}

pub fn create_wall(seed: u64) -> Vec<Tile> {
    let mut wall = all_tiles();
    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
    wall.shuffle(&mut rng);
    wall
}

// 牌山の末尾から 親 -> 下家 -> 対面 -> 上家 の順に1枚ずつ16周配る
// 親の17枚目は通常のツモとして配る
pub fn deal_wall(mut wall: Vec<Tile>, dealer: Seat) -> Result<DealtWall, String> {
    if wall.len() <= HAND_SIZE * SEAT {
        return Err(format!("wall too short: {}", wall.len()));
    }

    let mut hands = [vec![], vec![], vec![], vec![]];
    for _ in 0..HAND_SIZE {
        for i in 0..SEAT {
            let s = (dealer + i) % SEAT;
            hands[s].push(pop_tile(&mut wall)?);
        }
    }
    for h in &mut hands {
        h.sort();
    }

    Ok(DealtWall { hands, deck: wall })
}

#[inline]
fn pop_tile(wall: &mut Vec<Tile>) -> Result<Tile, String> {
    wall.pop().ok_or_else(|| "wall exhausted while dealing".to_string())
}

// デバッグ用に作為的な牌山を生成 指定がない場所はシード値に従ってランダムに生成
// hands: 各座席の配牌 (16枚以下), draws: 親の17枚目から始まるツモ順
pub fn create_wall_debug(
    seed: u64,
    dealer: Seat,
    hands: [&str; SEAT],
    draws: &str,
) -> Result<Vec<Tile>, String> {
    if dealer >= SEAT {
        return Err(format!("invalid dealer: {}", dealer));
    }

    let mut lens = vec![];
    let mut kinds = vec![];
    for h in &hands {
        let ks = kinds_from_string(h)?;
        if ks.len() > HAND_SIZE {
            return Err(format!("hand too long: {}", h));
        }
        lens.push(ks.len());
        kinds.extend(ks);
    }
    let draw_kinds = kinds_from_string(draws)?;
    let n_draws = draw_kinds.len();
    kinds.extend(draw_kinds);

    // 5枚目以上の指定はここでエラー
    let specified = tiles_from_kinds(&kinds)?;
    let mut used = [false; TILE_COUNT];
    for t in &specified {
        used[t.id] = true;
    }

    // 余った牌をランダムにシャッフル
    let mut remain: Vec<Tile> = all_tiles().into_iter().filter(|t| !used[t.id]).collect();
    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
    remain.shuffle(&mut rng);

    let mut seat_tiles: Vec<Vec<Tile>> = vec![];
    let mut it = specified.into_iter();
    for n in lens {
        seat_tiles.push(it.by_ref().take(n).collect());
    }
    let draw_tiles: Vec<Tile> = it.collect();
    debug_assert_eq!(draw_tiles.len(), n_draws);

    // 牌山から取り出される順
    let mut seq = Vec::with_capacity(TILE_COUNT);
    for r in 0..HAND_SIZE {
        for i in 0..SEAT {
            let s = (dealer + i) % SEAT;
            match seat_tiles[s].get(r) {
                Some(&t) => seq.push(t),
                None => seq.push(remain.pop().ok_or("tile shortage")?),
            }
        }
    }
    seq.extend(draw_tiles);
    seq.append(&mut remain);

    assert_eq!(seq.len(), TILE_COUNT);
    seq.reverse();
    Ok(seq)
}

#[cfg(test)]
use crate::control::string::tiles_to_string;

#[test]
fn test_create_wall() {
    let w1 = create_wall(1);
    let w2 = create_wall(1);
    assert_eq!(w1.len(), TILE_COUNT);
    assert_eq!(w1, w2);
    assert_ne!(w1, create_wall(2));

    let mut ids: Vec<TileId> = w1.iter().map(|t| t.id).collect();
    ids.sort();
    assert_eq!(ids, (0..TILE_COUNT).collect::<Vec<_>>());
}

#[test]
fn test_deal_wall() {
    let wall = create_wall(3);
    let last = *wall.last().unwrap();
    let dealt = deal_wall(wall, 2).unwrap();
    for s in 0..SEAT {
        assert_eq!(dealt.hands[s].len(), HAND_SIZE);
    }
    // 最初に取り出される牌は親へ
    assert!(dealt.hands[2].contains(&last));
    assert_eq!(dealt.deck.len(), TILE_COUNT - HAND_SIZE * SEAT);

    assert!(deal_wall(vec![], 0).is_err());
}

#[test]
fn test_debug_wall() {
    let wall = create_wall_debug(
        0,
        1,
        ["m1112345678999p11", "", "w1111", "d1d2"],
        "m1s5",
    )
    .unwrap();
    assert_eq!(wall.len(), TILE_COUNT);

    let dealt = deal_wall(wall, 1).unwrap();
    assert_eq!(tiles_to_string(&dealt.hands[0]), "m1112345678999p11");
    assert_eq!(dealt.hands[2].iter().filter(|t| t.suit == Suit::Wind && t.rank == 1).count(), 4);
    let n = dealt.deck.len();
    assert_eq!(dealt.deck[n - 1].kind(), Kind(Suit::Man, 1));
    assert_eq!(dealt.deck[n - 2].kind(), Kind(Suit::Sou, 5));

    // m1は5枚目
    assert!(create_wall_debug(0, 0, ["m1111", "", "", ""], "m1").is_err());
    assert!(create_wall_debug(0, 0, ["m12345678912345678", "", "", ""], "").is_err());
}
