use crate::hand::sort_hand;
use crate::listener::Listener;
use crate::model::*;
use crate::warn;

// GameStateの変更はすべてhandle_eventを経由する
// イベントの妥当性はMahjongEngine側で検証済みであること
#[derive(Debug)]
pub struct StageController {
    stage: GameState,
    listeners: Vec<Box<dyn Listener>>,
}

impl StageController {
    pub fn new(listeners: Vec<Box<dyn Listener>>) -> Self {
        Self {
            stage: GameState::default(),
            listeners,
        }
    }

    #[inline]
    pub fn get_stage(&self) -> &GameState {
        &self.stage
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener>) {
        self.listeners.push(listener);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let stg = &mut self.stage;
        match event {
            Event::New(e) => event_new(stg, e),
            Event::Deal(e) => event_deal(stg, e),
            Event::Discard(e) => event_discard(stg, e),
            Event::Claim(e) => event_claim(stg, e),
            Event::Meld(e) => event_meld(stg, e),
            Event::Pass(e) => event_pass(stg, e),
            Event::Win(e) => event_win(stg, e),
            Event::Exhaust(e) => event_exhaust(stg, e),
        }
        stg.step += 1;

        for a in &mut self.listeners {
            a.notify_event(&self.stage, event);
        }
    }
}

// [Event]
fn event_new(stg: &mut GameState, event: &EventNew) {
    *stg = GameState::default();
    stg.dealer = event.dealer;
    stg.turn = event.dealer;
    stg.phase = Phase::Draw; // 直後の親のツモでDiscardになる
    stg.deck = event.deck.clone();

    for s in 0..SEAT {
        let pl = &mut stg.players[s];
        pl.seat = s;
        pl.name = event.names[s].clone();
        pl.hand = event.hands[s].clone();
        sort_hand(&mut pl.hand);
    }
}

fn event_deal(stg: &mut GameState, event: &EventDeal) {
    let s = event.seat;
    let t = event.tile;
    let top = stg.deck.pop();
    assert_eq!(top, Some(t), "deal tile mismatch");

    stg.turn = s;
    stg.phase = Phase::Discard;
    stg.last_drawn = Some(t);
    stg.last_discarded = None;

    let pl = &mut stg.players[s];
    pl.hand.push(t);
    sort_hand(&mut pl.hand);
}

fn event_discard(stg: &mut GameState, event: &EventDiscard) {
    let s = event.seat;
    let t = event.tile;

    let pl = &mut stg.players[s];
    take_tile(pl, &t);
    pl.discards.push(Discard {
        tile: t,
        claimed_by: None,
    });

    stg.turn = s;
    stg.phase = Phase::Action;
    stg.last_drawn = None;
    stg.last_discarded = Some(LastDiscard { tile: t, seat: s });
    stg.window = event.window.clone();
}

fn event_claim(stg: &mut GameState, event: &EventClaim) {
    if let Some(w) = stg.window.as_mut() {
        if let Err(e) = w.submit(event.seat, &event.action) {
            warn!("unchecked claim: {}", e);
        }
    }
}

fn event_meld(stg: &mut GameState, event: &EventMeld) {
    let s = event.seat;
    let cs = &event.consumed;
    stg.last_drawn = None;

    match event.meld_type {
        MeldType::Chi | MeldType::Pong | MeldType::Kong => {
            let ld = match stg.last_discarded.take() {
                Some(ld) => ld,
                None => {
                    warn!("meld without discarded tile");
                    return;
                }
            };
            if let Some(d) = stg.players[ld.seat].discards.last_mut() {
                d.claimed_by = Some(s);
            }

            let pl = &mut stg.players[s];
            for t in cs {
                take_tile(pl, t);
            }
            let mut tiles = cs.clone();
            tiles.push(ld.tile);
            pl.melds.push(Meld::new(event.meld_type, tiles, Some(ld.seat)));

            stg.turn = s;
            stg.phase = Phase::Discard;
        }
        MeldType::AnKong => {
            let pl = &mut stg.players[s];
            for t in cs {
                take_tile(pl, t);
            }
            pl.melds.push(Meld::new(MeldType::AnKong, cs.clone(), None));
        }
        MeldType::BuKong => {
            let pl = &mut stg.players[s];
            let t = cs[0];
            let idx = pl
                .melds
                .iter()
                .position(|m| m.meld_type == MeldType::Pong && m.kind() == t.kind());
            let Some(idx) = idx else {
                warn!("pong not found for {}", t);
                return;
            };
            take_tile(pl, &t);
            let m = &mut pl.melds[idx];
            m.tiles.push(t);
            m.tiles.sort();
            m.meld_type = MeldType::BuKong;
        }
    }
}

fn event_pass(stg: &mut GameState, _event: &EventPass) {
    if let Some(w) = stg.window.as_mut() {
        if w.resolution.is_none() {
            w.resolution = Some(Resolution::Pass);
        }
    }
    stg.phase = Phase::Draw;
    stg.turn_count += 1;
}

fn event_win(stg: &mut GameState, event: &EventWin) {
    let s = event.seat;
    if let Some(from) = event.from {
        // 捨て牌での和了は和了牌を手牌に加える
        if let Some(d) = stg.players[from].discards.last_mut() {
            d.claimed_by = Some(s);
        }
        let pl = &mut stg.players[s];
        pl.hand.push(event.tile);
        sort_hand(&mut pl.hand);
    }

    stg.turn = s;
    stg.winner = Some(s);
    stg.phase = Phase::GameOver;
}

fn event_exhaust(stg: &mut GameState, _event: &EventExhaust) {
    stg.winner = None;
    stg.phase = Phase::GameOver;
}

fn take_tile(pl: &mut Player, t: &Tile) {
    let idx = pl.find_tile(t.id);
    assert!(idx.is_some(), "{:?} not found in hand of seat {}", t, pl.seat);
    if let Some(i) = idx {
        pl.hand.remove(i);
    }
}

#[cfg(test)]
use crate::control::wall::{create_wall, deal_wall};

#[cfg(test)]
fn new_stage() -> StageController {
    let dealt = deal_wall(create_wall(5), 0).unwrap();
    let mut ctrl = StageController::new(vec![]);
    let names = ["a", "b", "c", "d"].map(String::from);
    ctrl.handle_event(&Event::new(0, names, dealt.hands, dealt.deck));
    ctrl
}

#[test]
fn test_new_and_deal() {
    let mut ctrl = new_stage();
    assert_eq!(ctrl.get_stage().phase, Phase::Draw);
    assert_eq!(ctrl.get_stage().count_tiles(), TILE_COUNT);

    let t = *ctrl.get_stage().deck.last().unwrap();
    ctrl.handle_event(&Event::deal(0, t, false));
    let stg = ctrl.get_stage();
    assert_eq!(stg.step, 2);
    assert_eq!(stg.phase, Phase::Discard);
    assert_eq!(stg.last_drawn, Some(t));
    assert_eq!(stg.players[0].hand.len(), HAND_SIZE + 1);
    assert_eq!(stg.count_tiles(), TILE_COUNT);
}

#[test]
fn test_discard_and_pass() {
    let mut ctrl = new_stage();
    let t = *ctrl.get_stage().deck.last().unwrap();
    ctrl.handle_event(&Event::deal(0, t, false));
    ctrl.handle_event(&Event::discard(0, t, None));
    let stg = ctrl.get_stage();
    assert_eq!(stg.phase, Phase::Action);
    assert_eq!(stg.players[0].discards.len(), 1);
    assert_eq!(stg.last_discarded, Some(LastDiscard { tile: t, seat: 0 }));

    ctrl.handle_event(&Event::pass(0));
    let stg = ctrl.get_stage();
    assert_eq!(stg.phase, Phase::Draw);
    assert_eq!(stg.turn_count, 1);
    assert_eq!(stg.count_tiles(), TILE_COUNT);
}
