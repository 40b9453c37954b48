// 牌の文字列表記 (例: "m123p55w11d3")
// m:萬子, p:筒子, s:索子, w:風牌(1~4), d:三元牌(1~3)
use crate::model::*;

pub fn kinds_from_string(exp: &str) -> Result<Vec<Kind>, String> {
    let mut kinds = vec![];
    let mut suit = None;
    for c in exp.chars() {
        match c {
            '1'..='9' => {
                let s = suit.ok_or_else(|| format!("tile number before tile type: '{}'", exp))?;
                let k = Kind(s, c as usize - '0' as usize);
                if !k.is_valid() {
                    return Err(format!("invalid tile: {}", k));
                }
                kinds.push(k);
            }
            ' ' | ',' => {}
            _ => match Suit::from_symbol(c) {
                Some(s) => suit = Some(s),
                None => return Err(format!("invalid char: '{}'", c)),
            },
        }
    }
    Ok(kinds)
}

pub fn kinds_to_string(kinds: &[Kind]) -> String {
    let mut res = String::new();
    let mut suit = None;
    for k in kinds {
        if suit != Some(k.0) {
            res.push(k.0.symbol());
            suit = Some(k.0);
        }
        res.push_str(&k.1.to_string());
    }
    res
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let kinds: Vec<Kind> = tiles.iter().map(|t| t.kind()).collect();
    kinds_to_string(&kinds)
}

// 種類の定義順の番号 (牌の識別番号 = 種類番号 * 4 + 同種内の番号)
pub fn kind_index(k: Kind) -> Index {
    let mut i = 0;
    for s in SUITS {
        if s == k.0 {
            return i + k.1 - 1;
        }
        i += s.max_rank();
    }
    unreachable!()
}

// 種類の一覧に識別番号を割り当てて牌に変換
// 同じ種類が5枚以上ある場合はエラー
pub fn tiles_from_kinds(kinds: &[Kind]) -> Result<Vec<Tile>, String> {
    let mut used = [0; TILE_COUNT / TILE];
    let mut tiles = vec![];
    for &k in kinds {
        let ki = kind_index(k);
        if used[ki] == TILE {
            return Err(format!("more than {} tiles of {}", TILE, k));
        }
        tiles.push(Tile::new(ki * TILE + used[ki], k));
        used[ki] += 1;
    }
    Ok(tiles)
}

pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, String> {
    tiles_from_kinds(&kinds_from_string(exp)?)
}

#[cfg(test)]
pub fn test_tiles(exp: &str) -> Vec<Tile> {
    tiles_from_string(exp).unwrap()
}

#[test]
fn test_kinds_to_string() {
    let hand_str = "m123p55s9w14d3";
    let kinds = kinds_from_string(hand_str).unwrap();
    assert_eq!(kinds.len(), 9);
    assert_eq!(kinds_to_string(&kinds), hand_str);
}

#[test]
fn test_invalid_string() {
    assert!(kinds_from_string("1m").is_err());
    assert!(kinds_from_string("w5").is_err());
    assert!(kinds_from_string("d4").is_err());
    assert!(kinds_from_string("z1").is_err());
    assert!(tiles_from_string("m11111").is_err());
}

#[test]
fn test_tile_ids() {
    let tiles = tiles_from_string("m11d3").unwrap();
    assert_eq!(tiles[0].id, 0);
    assert_eq!(tiles[1].id, 1);
    assert_eq!(tiles[2].id, TILE_COUNT - TILE); // d3の1枚目
}
