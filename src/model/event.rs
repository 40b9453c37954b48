use super::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    New(EventNew),         // 対局開始
    Deal(EventDeal),       // ツモ
    Discard(EventDiscard), // 打牌
    Claim(EventClaim),     // 捨て牌に対する応答
    Meld(EventMeld),       // 鳴き
    Pass(EventPass),       // 誰も鳴かずに受付終了
    Win(EventWin),         // 対局終了 (和了)
    Exhaust(EventExhaust), // 対局終了 (牌山切れ)
}

impl Event {
    #[inline]
    pub fn new(
        dealer: Seat,
        names: [String; SEAT],
        hands: [Vec<Tile>; SEAT],
        deck: Vec<Tile>,
    ) -> Self {
        Self::New(EventNew {
            dealer,
            names,
            hands,
            deck,
        })
    }

    #[inline]
    pub fn deal(seat: Seat, tile: Tile, is_replacement: bool) -> Self {
        Self::Deal(EventDeal {
            seat,
            tile,
            is_replacement,
        })
    }

    #[inline]
    pub fn discard(seat: Seat, tile: Tile, window: Option<ClaimWindow>) -> Self {
        Self::Discard(EventDiscard { seat, tile, window })
    }

    #[inline]
    pub fn claim(seat: Seat, action: Action) -> Self {
        Self::Claim(EventClaim { seat, action })
    }

    #[inline]
    pub fn meld(seat: Seat, meld_type: MeldType, consumed: Vec<Tile>) -> Self {
        Self::Meld(EventMeld {
            seat,
            meld_type,
            consumed,
        })
    }

    #[inline]
    pub fn pass(seat: Seat) -> Self {
        Self::Pass(EventPass { seat })
    }

    #[inline]
    pub fn win(seat: Seat, tile: Tile, from: Option<Seat>) -> Self {
        Self::Win(EventWin { seat, tile, from })
    }

    #[inline]
    pub fn exhaust() -> Self {
        Self::Exhaust(EventExhaust {})
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventNew {
    pub dealer: Seat,
    pub names: [String; SEAT],
    pub hands: [Vec<Tile>; SEAT], // 配牌 (各16枚, 親の17枚目は直後のDealで配られる)
    pub deck: Vec<Tile>,          // 残りの牌山
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDeal {
    pub seat: Seat,
    pub tile: Tile,
    pub is_replacement: bool, // 槓の後の補充
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDiscard {
    pub seat: Seat,
    pub tile: Tile,
    pub window: Option<ClaimWindow>, // 応答可能な座席がない場合はNone
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventClaim {
    pub seat: Seat,
    pub action: Action, // 候補から確定した応答 (Passを含む)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMeld {
    pub seat: Seat,
    pub meld_type: MeldType, // 鳴き種別
    pub consumed: Vec<Tile>, // 手牌から消費される牌
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPass {
    pub seat: Seat, // 捨てた座席
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWin {
    pub seat: Seat,
    pub tile: Tile,          // 和了牌
    pub from: Option<Seat>, // 放銃者 (自摸の場合はNone)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventExhaust {}
