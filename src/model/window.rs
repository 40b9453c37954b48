use super::*;

// 捨て牌に対する応答の受付状態 (処理はcontrol::arbiterを参照)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimWindow {
    pub id: WindowId,
    pub discarder: Seat,
    pub tile: Tile,
    pub pending: Vec<Pending>,                // 応答が必要な座席 (捨てた座席の次から順)
    pub arrivals: Vec<(Seat, ActionType)>,    // 到着順の応答記録
    pub resolution: Option<Resolution>,       // 一度セットされたら変更されない
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pending {
    pub seat: Seat,
    pub actions: Vec<Action>, // 可能な応答 (Passを含む)
    pub response: Option<ActionType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Resolution {
    Hu { seat: Seat },
    Meld { seat: Seat, action: Action },
    Pass,
}
