use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi,    // 吃
    Pong,   // 碰
    Kong,   // 明槓 (捨て牌から)
    AnKong, // 暗槓
    BuKong, // 加槓 (碰に4枚目を追加)
}

impl MeldType {
    // 鳴きを構成する牌の枚数
    #[inline]
    pub fn size(self) -> usize {
        match self {
            MeldType::Chi | MeldType::Pong => 3,
            MeldType::Kong | MeldType::AnKong | MeldType::BuKong => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,    // 昇順
    pub from: Option<Seat>, // 鳴いた牌の持ち主 (暗槓はNone)
}

impl Meld {
    pub fn new(meld_type: MeldType, mut tiles: Vec<Tile>, from: Option<Seat>) -> Self {
        assert_eq!(tiles.len(), meld_type.size(), "{:?}: {:?}", meld_type, tiles);
        tiles.sort();
        Self {
            meld_type,
            tiles,
            from,
        }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.tiles[0].kind()
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{}", self.meld_type, vec_to_string(&self.tiles))
    }
}
