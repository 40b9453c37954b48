use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Man,    // 萬子
    Pin,    // 筒子
    Sou,    // 索子
    Wind,   // 風牌
    Dragon, // 三元牌
}

pub const SUITS: [Suit; 5] = [Suit::Man, Suit::Pin, Suit::Sou, Suit::Wind, Suit::Dragon];

impl Suit {
    // 字牌
    #[inline]
    pub fn is_honor(self) -> bool {
        matches!(self, Suit::Wind | Suit::Dragon)
    }

    #[inline]
    pub fn max_rank(self) -> Rank {
        match self {
            Suit::Man | Suit::Pin | Suit::Sou => 9,
            Suit::Wind => 4,
            Suit::Dragon => 3,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
            Suit::Wind => 'w',
            Suit::Dragon => 'd',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        Some(match c {
            'm' => Suit::Man,
            'p' => Suit::Pin,
            's' => Suit::Sou,
            'w' => Suit::Wind,
            'd' => Suit::Dragon,
            _ => return None,
        })
    }
}

// 牌の種類 (牌の一致判定は常にこれで行う)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Kind(pub Suit, pub Rank);

impl Kind {
    #[inline]
    pub fn is_valid(&self) -> bool {
        1 <= self.1 && self.1 <= self.0.max_rank()
    }

    #[inline]
    pub fn is_honor(&self) -> bool {
        self.0.is_honor()
    }

    // 同じ数牌の種類で数字をdだけずらした牌 (範囲外や字牌の場合はNone)
    pub fn offset(&self, d: isize) -> Option<Kind> {
        if self.is_honor() {
            return None;
        }
        let r = self.1 as isize + d;
        if r < 1 || r > self.0.max_rank() as isize {
            return None;
        }
        Some(Kind(self.0, r as Rank))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.symbol(), self.1)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// 牌 生成後は不変
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Tile {
    #[inline]
    pub fn new(id: TileId, kind: Kind) -> Self {
        Self {
            id,
            suit: kind.0,
            rank: kind.1,
        }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        Kind(self.suit, self.rank)
    }

    #[inline]
    pub fn is_honor(&self) -> bool {
        self.suit.is_honor()
    }

    pub fn unicode(&self) -> char {
        let base = match self.suit {
            Suit::Man => 0x1F007,
            Suit::Pin => 0x1F019,
            Suit::Sou => 0x1F010,
            Suit::Wind => 0x1F000,
            Suit::Dragon => 0x1F004,
        };
        char::from_u32(base + self.rank as u32 - 1).unwrap_or('?')
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.id)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// 種別, 数字, 識別番号の順
impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.suit, self.rank, self.id).cmp(&(other.suit, other.rank, other.id))
    }
}

// 全34種の牌 (定義順)
pub fn all_kinds() -> Vec<Kind> {
    let mut kinds = vec![];
    for s in SUITS {
        for r in 1..=s.max_rank() {
            kinds.push(Kind(s, r));
        }
    }
    kinds
}

#[test]
fn test_kinds() {
    let kinds = all_kinds();
    assert_eq!(kinds.len() * TILE, TILE_COUNT);
    assert!(kinds.iter().all(|k| k.is_valid()));
    assert_eq!(Kind(Suit::Sou, 9).offset(1), None);
    assert_eq!(Kind(Suit::Sou, 7).offset(2), Some(Kind(Suit::Sou, 9)));
    assert_eq!(Kind(Suit::Wind, 1).offset(1), None);
}

#[test]
fn test_unicode() {
    assert_eq!(Tile::new(0, Kind(Suit::Man, 1)).unicode(), '\u{1F007}');
    assert_eq!(Tile::new(0, Kind(Suit::Dragon, 3)).unicode(), '\u{1F006}');
}
