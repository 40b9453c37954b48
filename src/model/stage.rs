use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Draw,    // ツモ (一時的な状態)
    Discard, // 手番のプレイヤーの打牌待ち
    Action,  // 他家の応答待ち
    #[default]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastDiscard {
    pub tile: Tile,
    pub seat: Seat,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub step: usize,                          // イベントを処理する毎に+1
    pub dealer: Seat,                         // 最初の手番
    pub turn: Seat,                           // 手番のプレイヤーの座席 (currentPlayer)
    pub phase: Phase,                         // 進行状態
    pub turn_count: usize,                    // 打牌→ツモの巡回数 (表示用)
    pub deck: Vec<Tile>,                      // 牌山 (末尾からのみ消費)
    pub last_drawn: Option<Tile>,             // 最後にツモった牌
    pub last_discarded: Option<LastDiscard>,  // 鳴きの対象となる捨て牌
    pub winner: Option<Seat>,                 // 和了者 (流局の場合はNone)
    pub window: Option<ClaimWindow>,          // 鳴きの受付状態
    pub players: [Player; SEAT],              // 各プレイヤー情報
}

impl GameState {
    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    // 応答を受け付けている鳴きの受付期間
    #[inline]
    pub fn open_window(&self) -> Option<&ClaimWindow> {
        self.window.as_ref().filter(|w| w.resolution.is_none())
    }

    // 牌山, 手牌, 鳴き, 河(鳴かれていない捨て牌)の総数 (常に136)
    pub fn count_tiles(&self) -> usize {
        let mut n = self.deck.len();
        for pl in &self.players {
            n += pl.hand.len();
            n += pl.melds.iter().map(|m| m.tiles.len()).sum::<usize>();
            n += pl.discards.iter().filter(|d| d.claimed_by.is_none()).count();
        }
        n
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "step: {}, phase: {:?}, turn: {}, turn_count: {}, deck: {}",
            self.step,
            self.phase,
            self.turn,
            self.turn_count,
            self.deck.len(),
        )?;
        writeln!(
            f,
            "last_drawn: {:?}, last_discarded: {:?}, winner: {:?}",
            self.last_drawn, self.last_discarded, self.winner,
        )?;

        let boader = "-".to_string().repeat(80);
        write!(f, "{}", boader)?;
        for p in &self.players {
            writeln!(f)?;
            writeln!(f, "{}", p)?;
            write!(f, "{}", boader)?;
        }
        writeln!(f)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,
    pub name: String,
    pub hand: Vec<Tile>,        // 手牌 (常に整列済み)
    pub melds: Vec<Meld>,       // 鳴き一覧
    pub discards: Vec<Discard>, // 捨て牌一覧 (追加のみ)
}

impl Player {
    pub fn find_tile(&self, id: TileId) -> Option<Index> {
        self.hand.iter().position(|t| t.id == id)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seat: {}, name: {}", self.seat, self.name)?;
        writeln!(f, "hand: {}", vec_to_string(&self.hand))?;
        writeln!(f, "melds: {}", vec_to_string(&self.melds))?;
        write!(f, "discards: {}", vec_to_string(&self.discards))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discard {
    pub tile: Tile,
    pub claimed_by: Option<Seat>, // 鳴きまたは和了に使われた場合にセット
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.claimed_by.is_some() {
            write!(f, "({})", self.tile)
        } else {
            write!(f, "{}", self.tile)
        }
    }
}
