use rand::prelude::*;

use super::{
    possible_actions::*,
    stage_controller::StageController,
    wall::{create_wall, deal_wall},
};
use crate::hand::{find_tiles, is_winning_hand, possible_an_kongs, possible_bu_kongs};
use crate::listener::Listener;
use crate::model::*;
use crate::util::misc::unixtime_now;
use crate::{debug, info};

// [Engine]
// Draw -> Discard -> Action -> (Discard | GameOver) の遷移を管理
// 各操作は検証を行ってからイベントを発行する (拒否された操作はGameStateを変更しない)
#[derive(Debug)]
pub struct MahjongEngine {
    seed: u64,               // 牌山生成用の乱数のシード値
    rng: rand::rngs::StdRng, // 乱数 (牌山生成)
    rule: Rule,
    ctrl: StageController,
    names: [String; SEAT],
    next_window_id: WindowId,
}

impl MahjongEngine {
    pub fn new(rule: Rule, listeners: Vec<Box<dyn Listener>>) -> Self {
        let seed = if rule.seed == 0 {
            unixtime_now()
        } else {
            rule.seed
        };
        Self {
            seed,
            rng: rand::SeedableRng::seed_from_u64(seed),
            rule,
            ctrl: StageController::new(listeners),
            names: Default::default(),
            next_window_id: 1,
        }
    }

    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn get_rule(&self) -> &Rule {
        &self.rule
    }

    #[inline]
    pub fn get_stage(&self) -> &GameState {
        self.ctrl.get_stage()
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener>) {
        self.ctrl.add_listener(listener);
    }

    #[inline]
    fn handle_event(&mut self, event: Event) {
        self.ctrl.handle_event(&event);
    }

    // [initMatch]
    pub fn init_match(&mut self, names: [String; SEAT]) -> MatchResult<&GameState> {
        let wall = create_wall(self.rng.next_u64());
        self.init_match_with_wall(names, wall)
    }

    // 牌山を指定して対局を開始 (デバッグ, テスト用)
    pub fn init_match_with_wall(
        &mut self,
        names: [String; SEAT],
        wall: Vec<Tile>,
    ) -> MatchResult<&GameState> {
        self.rule.validate()?;
        validate_wall(&wall)?;

        let dealer = self.rule.dealer;
        let dealt = deal_wall(wall, dealer).map_err(MatchError::malformed)?;
        self.names = names.clone();
        self.handle_event(Event::new(dealer, names, dealt.hands, dealt.deck));
        info!("match start: dealer={}, names={:?}", dealer, self.names);

        // 親の17枚目
        self.do_deal(dealer, false);
        Ok(self.get_stage())
    }

    // 同じ参加者で新しい対局を開始
    pub fn reset(&mut self) -> MatchResult<&GameState> {
        let names = self.names.clone();
        self.init_match(names)
    }

    // [applyDiscard]
    pub fn apply_discard(&mut self, seat: Seat, tile_id: TileId) -> MatchResult<&GameState> {
        let res = self.try_discard(seat, tile_id);
        self.finish(res)
    }

    // [applyClaim]
    // window: 応答対象の受付期間 (指定した場合, 現在の受付期間と異なれば無視)
    pub fn apply_claim(
        &mut self,
        seat: Seat,
        action: &Action,
        window: Option<WindowId>,
    ) -> MatchResult<&GameState> {
        let res = self.try_claim(seat, action, window);
        self.finish(res)
    }

    // [applyAnKong]
    // kind: 暗槓する牌の種類 (Noneの場合は最初の候補)
    pub fn apply_an_kong(&mut self, seat: Seat, kind: Option<Kind>) -> MatchResult<&GameState> {
        let res = self.try_an_kong(seat, kind);
        self.finish(res)
    }

    // [applyBuKong]
    pub fn apply_bu_kong(&mut self, seat: Seat, kind: Option<Kind>) -> MatchResult<&GameState> {
        let res = self.try_bu_kong(seat, kind);
        self.finish(res)
    }

    // 応答期限切れ: 未応答の座席をすべて見送りとして処理
    // すでに解決済みまたは別の受付期間の場合は何もしない
    pub fn expire_window(&mut self, id: WindowId) -> &GameState {
        let unanswered = match self.get_stage().open_window() {
            Some(w) if w.id == id => w.unanswered(),
            _ => {
                debug!("stale expire: window {}", id);
                return self.get_stage();
            }
        };

        debug!("window {} expired: {:?}", id, unanswered);
        for s in unanswered {
            self.handle_event(Event::claim(s, Action::pass()));
        }
        self.resolve_window();
        self.get_stage()
    }

    // [computeAvailableActions]
    pub fn available_actions(&self, seat: Seat) -> MatchResult<Vec<Action>> {
        check_seat(seat)?;
        Ok(compute_available_actions(self.get_stage(), seat))
    }

    fn finish(&mut self, res: MatchResult<()>) -> MatchResult<&GameState> {
        match res {
            Ok(()) => Ok(self.get_stage()),
            Err(e) => {
                debug!("rejected: {}", e);
                Err(e)
            }
        }
    }

    fn check_turn(&self, seat: Seat) -> MatchResult<()> {
        check_seat(seat)?;
        let stg = self.get_stage();
        if stg.is_over() {
            return Err(MatchError::Closed);
        }
        if stg.phase != Phase::Discard || stg.turn != seat {
            return Err(MatchError::illegal(format!(
                "not the turn of seat {} (turn: {}, phase: {:?})",
                seat, stg.turn, stg.phase
            )));
        }
        Ok(())
    }

    fn try_discard(&mut self, seat: Seat, tile_id: TileId) -> MatchResult<()> {
        check_tile_id(tile_id)?;
        self.check_turn(seat)?;

        let stg = self.get_stage();
        let pl = &stg.players[seat];
        let t = match pl.find_tile(tile_id) {
            Some(i) => pl.hand[i],
            None => {
                return Err(MatchError::illegal(format!(
                    "tile {} is not in hand of seat {}",
                    tile_id, seat
                )));
            }
        };

        // 応答可能な座席の判定 (捨てた座席自身は対象外)
        let acts_list = calc_possible_call_actions(stg, seat, &t);
        let id = self.next_window_id;
        self.next_window_id += 1;
        let window = ClaimWindow::open(id, seat, t, acts_list);
        let no_claim = window.pending.is_empty();

        self.handle_event(Event::discard(seat, t, Some(window)));
        if no_claim {
            self.resolve_as_pass(seat);
        }
        Ok(())
    }

    fn try_claim(
        &mut self,
        seat: Seat,
        action: &Action,
        window: Option<WindowId>,
    ) -> MatchResult<()> {
        check_seat(seat)?;
        for t in &action.tiles {
            check_tile_id(t.id)?;
        }
        if !action.ty.is_call() {
            return Err(MatchError::illegal(format!("{:?} is not a claim", action.ty)));
        }

        let stg = self.get_stage();
        let w = match stg.open_window() {
            Some(w) => w,
            None => {
                debug!("claim ignored (no open window): seat={}, {}", seat, action);
                return Ok(());
            }
        };
        if let Some(id) = window {
            if id != w.id {
                debug!("claim ignored (window {} != {}): seat={}", id, w.id, seat);
                return Ok(());
            }
        }

        let selected = match w.check(seat, action)? {
            Some(a) => a,
            None => {
                debug!("claim ignored (already answered): seat={}", seat);
                return Ok(());
            }
        };

        self.handle_event(Event::claim(seat, selected));
        self.resolve_window();
        Ok(())
    }

    fn try_an_kong(&mut self, seat: Seat, kind: Option<Kind>) -> MatchResult<()> {
        self.check_turn(seat)?;

        let hand = &self.get_stage().players[seat].hand;
        let kinds = possible_an_kongs(hand);
        let k = select_kind(&kinds, kind, "an_kong")?;
        let tiles = find_tiles(hand, k, TILE)
            .ok_or_else(|| MatchError::illegal(format!("no an_kong of {}", k)))?;

        self.handle_event(Event::meld(seat, MeldType::AnKong, tiles));
        self.do_deal(seat, true);
        Ok(())
    }

    fn try_bu_kong(&mut self, seat: Seat, kind: Option<Kind>) -> MatchResult<()> {
        self.check_turn(seat)?;

        let pl = &self.get_stage().players[seat];
        let cands = possible_bu_kongs(&pl.hand, &pl.melds);
        let kinds: Vec<Kind> = cands.iter().map(|(_, t)| t.kind()).collect();
        let k = select_kind(&kinds, kind, "bu_kong")?;
        let t = match cands.iter().find(|(_, t)| t.kind() == k) {
            Some(&(_, t)) => t,
            None => return Err(MatchError::illegal(format!("no bu_kong of {}", k))),
        };

        self.handle_event(Event::meld(seat, MeldType::BuKong, vec![t]));
        self.do_deal(seat, true);
        Ok(())
    }

    // 受付期間の解決結果に従って遷移
    fn resolve_window(&mut self) {
        let w = match &self.get_stage().window {
            Some(w) => w,
            None => return,
        };
        let (discarder, tile) = (w.discarder, w.tile);
        match w.resolution.clone() {
            None => {}
            Some(Resolution::Hu { seat }) => {
                self.handle_event(Event::win(seat, tile, Some(discarder)));
                self.log_result();
            }
            Some(Resolution::Meld { seat, action }) => {
                let mt = match action.ty.meld_type() {
                    Some(mt) => mt,
                    None => return,
                };
                self.handle_event(Event::meld(seat, mt, action.tiles));
                if mt == MeldType::Kong {
                    self.do_deal(seat, true);
                }
            }
            Some(Resolution::Pass) => self.resolve_as_pass(discarder),
        }
    }

    fn resolve_as_pass(&mut self, discarder: Seat) {
        self.handle_event(Event::pass(discarder));
        self.do_deal(next_seat(discarder), false);
    }

    // ツモ (牌山が空の場合は流局)
    // ツモ後に和了形であれば自摸和了で終了
    fn do_deal(&mut self, seat: Seat, is_replacement: bool) {
        let t = match self.get_stage().deck.last() {
            Some(&t) => t,
            None => {
                self.handle_event(Event::exhaust());
                self.log_result();
                return;
            }
        };
        self.handle_event(Event::deal(seat, t, is_replacement));

        let pl = &self.get_stage().players[seat];
        if is_winning_hand(&pl.hand, &pl.melds, None) {
            self.handle_event(Event::win(seat, t, None));
            self.log_result();
        }
    }

    fn log_result(&self) {
        let stg = self.get_stage();
        match stg.winner {
            Some(s) => info!("match end: winner={}, turn_count={}", s, stg.turn_count),
            None => info!("match end: exhausted, turn_count={}", stg.turn_count),
        }
    }
}

#[inline]
fn check_seat(seat: Seat) -> MatchResult<()> {
    if seat >= SEAT {
        return Err(MatchError::malformed(format!("unknown seat: {}", seat)));
    }
    Ok(())
}

#[inline]
fn check_tile_id(id: TileId) -> MatchResult<()> {
    if id >= TILE_COUNT {
        return Err(MatchError::malformed(format!("tile id out of range: {}", id)));
    }
    Ok(())
}

fn validate_wall(wall: &[Tile]) -> MatchResult<()> {
    if wall.len() != TILE_COUNT {
        return Err(MatchError::malformed(format!("wall size: {}", wall.len())));
    }
    let mut used = [false; TILE_COUNT];
    for t in wall {
        check_tile_id(t.id)?;
        if used[t.id] || !t.kind().is_valid() {
            return Err(MatchError::malformed(format!("invalid tile in wall: {:?}", t)));
        }
        used[t.id] = true;
    }
    Ok(())
}

fn select_kind(cands: &[Kind], kind: Option<Kind>, name: &str) -> MatchResult<Kind> {
    match kind {
        None => cands
            .first()
            .copied()
            .ok_or_else(|| MatchError::illegal(format!("no {} candidate", name))),
        Some(k) if cands.contains(&k) => Ok(k),
        Some(k) => Err(MatchError::illegal(format!("{} of {} is not possible", name, k))),
    }
}

#[cfg(test)]
use crate::control::wall::create_wall_debug;

#[cfg(test)]
fn names() -> [String; SEAT] {
    ["s0", "s1", "s2", "s3"].map(String::from)
}

#[cfg(test)]
fn engine_with(hands: [&str; SEAT], draws: &str) -> MahjongEngine {
    let rule = Rule {
        seed: 1,
        ..Rule::default()
    };
    let mut engine = MahjongEngine::new(rule, vec![]);
    let wall = create_wall_debug(1, 0, hands, draws).unwrap();
    engine.init_match_with_wall(names(), wall).unwrap();
    engine
}

#[cfg(test)]
fn tile_of(stg: &GameState, seat: Seat, exp: &str) -> TileId {
    let k = crate::control::string::kinds_from_string(exp).unwrap()[0];
    stg.players[seat].hand.iter().find(|t| t.kind() == k).unwrap().id
}

#[test]
fn test_init_match() {
    let rule = Rule {
        seed: 9,
        dealer: 2,
        ..Rule::default()
    };
    let mut engine = MahjongEngine::new(rule, vec![]);
    let stg = engine.init_match(names()).unwrap();
    assert_eq!(stg.phase, Phase::Discard);
    assert_eq!(stg.turn, 2);
    assert_eq!(stg.players[2].hand.len(), HAND_SIZE + 1);
    assert_eq!(stg.players[0].hand.len(), HAND_SIZE);
    assert_eq!(stg.deck.len(), TILE_COUNT - HAND_SIZE * SEAT - 1);
    assert!(stg.last_drawn.is_some());
    assert_eq!(stg.count_tiles(), TILE_COUNT);
}

#[test]
fn test_discard_out_of_turn() {
    let mut engine = engine_with(["", "", "", ""], "");
    let before = engine.get_stage().clone();
    let id = engine.get_stage().players[1].hand[0].id;
    assert!(matches!(engine.apply_discard(1, id), Err(MatchError::IllegalAction { .. })));
    // 手牌にない牌
    assert!(matches!(engine.apply_discard(0, id), Err(MatchError::IllegalAction { .. })));
    assert!(matches!(engine.apply_discard(4, 0), Err(MatchError::MalformedInput { .. })));
    assert!(matches!(engine.apply_discard(0, 136), Err(MatchError::MalformedInput { .. })));
    assert_eq!(engine.get_stage(), &before);
}

#[test]
fn test_discard_without_claims() {
    // 誰も応答できない捨て牌は即座に次の座席のツモになる
    let mut engine = engine_with(["d1d1d1", "m19", "p19", "s19"], "d1w1");
    let id = tile_of(engine.get_stage(), 0, "d1");
    let stg = engine.apply_discard(0, id).unwrap();
    assert_eq!(stg.turn, 1);
    assert_eq!(stg.phase, Phase::Discard);
    assert_eq!(stg.turn_count, 1);
    assert_eq!(stg.players[1].hand.len(), HAND_SIZE + 1);
    assert_eq!(stg.count_tiles(), TILE_COUNT);
}

#[test]
fn test_exhaustion() {
    let mut engine = engine_with(["", "", "", ""], "");
    loop {
        let stg = engine.get_stage();
        if stg.is_over() {
            break;
        }
        match stg.phase {
            Phase::Discard => {
                let s = stg.turn;
                let id = stg.last_drawn.map(|t| t.id).unwrap_or(stg.players[s].hand[0].id);
                engine.apply_discard(s, id).unwrap();
            }
            Phase::Action => {
                let id = stg.open_window().unwrap().id;
                engine.expire_window(id);
            }
            _ => unreachable!(),
        }
        assert_eq!(engine.get_stage().count_tiles(), TILE_COUNT);
    }
    let stg = engine.get_stage();
    assert!(stg.winner.is_some() || stg.deck.is_empty());
    // 終了後の操作
    let s = stg.turn;
    let id = stg.players[s].hand[0].id;
    assert_eq!(engine.apply_discard(s, id).unwrap_err(), MatchError::Closed);
}
