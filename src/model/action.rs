use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    // Turn Actions (手番のプレイヤーの打牌フェーズ)
    Discard, // 打牌
    AnKong,  // 暗槓
    BuKong,  // 加槓

    // Call Actions (捨て牌に対する応答)
    Hu,   // 和了 (ロン)
    Kong, // 明槓
    Pong, // 碰
    Chi,  // 吃
    Pass, // 見送り
}

impl ActionType {
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(
            self,
            ActionType::Hu
                | ActionType::Kong
                | ActionType::Pong
                | ActionType::Chi
                | ActionType::Pass
        )
    }

    pub fn meld_type(self) -> Option<MeldType> {
        Some(match self {
            ActionType::Kong => MeldType::Kong,
            ActionType::Pong => MeldType::Pong,
            ActionType::Chi => MeldType::Chi,
            ActionType::AnKong => MeldType::AnKong,
            ActionType::BuKong => MeldType::BuKong,
            _ => return None,
        })
    }
}

// tilesは操作により手牌からなくなる牌
// 鳴きの対象となる捨て牌はstage.last_discardedを参照する
// 応答として送る場合, tilesを空にすると最初の候補が選択される
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub ty: ActionType,
    #[serde(default)]
    pub tiles: Vec<Tile>,
}

impl Action {
    #[inline]
    pub fn new(ty: ActionType, mut tiles: Vec<Tile>) -> Self {
        tiles.sort();
        Self { ty, tiles }
    }

    #[inline]
    pub fn discard(t: Tile) -> Self {
        Self::new(ActionType::Discard, vec![t])
    }

    #[inline]
    pub fn an_kong(v: Vec<Tile>) -> Self {
        assert!(v.len() == 4);
        Self::new(ActionType::AnKong, v)
    }

    #[inline]
    pub fn bu_kong(t: Tile) -> Self {
        Self::new(ActionType::BuKong, vec![t])
    }

    #[inline]
    pub fn hu() -> Self {
        Self::new(ActionType::Hu, vec![])
    }

    #[inline]
    pub fn kong(v: Vec<Tile>) -> Self {
        assert!(v.len() == 3);
        Self::new(ActionType::Kong, v)
    }

    #[inline]
    pub fn pong(v: Vec<Tile>) -> Self {
        assert!(v.len() == 2);
        Self::new(ActionType::Pong, v)
    }

    #[inline]
    pub fn chi(v: Vec<Tile>) -> Self {
        assert!(v.len() == 2);
        Self::new(ActionType::Chi, v)
    }

    #[inline]
    pub fn pass() -> Self {
        Self::new(ActionType::Pass, vec![])
    }

    // 手牌を指定しない応答
    #[inline]
    pub fn call(ty: ActionType) -> Self {
        Self::new(ty, vec![])
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.ty, self.tiles)
    }
}

// 可能なアクションの種類の一覧 (重複なし, 出現順)
pub fn action_types(acts: &[Action]) -> Vec<ActionType> {
    let mut res = vec![];
    for a in acts {
        if !res.contains(&a.ty) {
            res.push(a.ty);
        }
    }
    res
}
