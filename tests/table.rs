// ワーカースレッド上の対局と部屋の管理
use std::time::{Duration, Instant};

use mahjong16::control::{
    engine::MahjongEngine, registry::MatchRegistry, string::kinds_from_string, table::MatchTable,
    wall::create_wall_debug,
};
use mahjong16::listener::{EventChannel, EventRx, Listener};
use mahjong16::model::*;

const HANDS: [&str; SEAT] = [
    "m159p159s159w1234d123",
    "m4699p1789s1789w44d33",
    "m55p44466s44466w33d22",
    "m1289p2378s2378w22d11",
];

fn names() -> [String; SEAT] {
    ["a", "b", "c", "d"].map(String::from)
}

fn engine(timeout_ms: u64) -> MahjongEngine {
    let rule = Rule {
        seed: 8,
        claim_timeout_ms: timeout_ms,
        ..Rule::default()
    };
    let mut engine = MahjongEngine::new(rule, vec![]);
    let wall = create_wall_debug(8, 0, HANDS, "w1").unwrap();
    engine.init_match_with_wall(names(), wall).unwrap();
    engine
}

fn m5_of(stg: &GameState) -> TileId {
    let k = kinds_from_string("m5").unwrap()[0];
    stg.players[0].hand.iter().find(|t| t.kind() == k).unwrap().id
}

fn wait_resolved(table: &MatchTable, id: WindowId) -> GameState {
    let start = Instant::now();
    loop {
        let stg = table.snapshot().unwrap();
        let resolved = stg.window.as_ref().map(|w| w.id == id && w.is_resolved());
        if resolved == Some(true) {
            return stg;
        }
        assert!(start.elapsed() < Duration::from_secs(5), "window {} not resolved", id);
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_deadline_equals_explicit_passes() {
    // 期限切れで解決した状態
    let table = MatchTable::spawn(engine(30));
    let stg = table.snapshot().unwrap();
    let stg = table.discard(0, m5_of(&stg)).unwrap();
    let id = stg.open_window().unwrap().id;
    table.claim(1, Action::pass(), Some(id)).unwrap();
    let expired = wait_resolved(&table, id);

    // 全員が明示的に見送った状態
    let mut e = engine(30);
    let t = m5_of(e.get_stage());
    e.apply_discard(0, t).unwrap();
    e.apply_claim(1, &Action::pass(), Some(id)).unwrap();
    e.apply_claim(2, &Action::pass(), Some(id)).unwrap();

    assert_eq!(&expired, e.get_stage());
    assert_eq!(expired.turn, 1);
    assert_eq!(expired.phase, Phase::Discard);

    // 期限後に届いた鳴きは無視
    let late = table
        .claim(2, Action::call(ActionType::Pong), Some(id))
        .unwrap();
    assert_eq!(late, expired);
}

#[test]
fn test_claim_before_deadline() {
    let table = MatchTable::spawn(engine(10_000));
    let stg = table.snapshot().unwrap();
    let stg = table.discard(0, m5_of(&stg)).unwrap();
    let id = stg.open_window().unwrap().id;
    let stg = table
        .claim(2, Action::call(ActionType::Pong), Some(id))
        .unwrap();
    assert_eq!(stg.turn, 2);
    assert_eq!(stg.players[2].melds.len(), 1);

    // 手番でない座席の操作は拒否
    let t = stg.players[3].hand[0].id;
    assert!(matches!(table.discard(3, t), Err(MatchError::IllegalAction { .. })));
    assert_eq!(table.available_actions(3).unwrap(), vec![]);
    assert!(!table.available_actions(2).unwrap().is_empty());
}

#[test]
fn test_events_from_worker() {
    let (tx, rx): (_, EventRx) = std::sync::mpsc::channel();
    let rule = Rule {
        seed: 4,
        ..Rule::default()
    };
    let listeners: Vec<Box<dyn Listener>> = vec![Box::new(EventChannel::new(tx))];
    let table = MatchTable::start(rule, names(), listeners).unwrap();
    let stg = table.snapshot().unwrap();
    if stg.is_over() {
        return; // 配牌直後の和了
    }
    let s = stg.turn;
    let t = stg.last_drawn.unwrap();
    table.discard(s, t.id).unwrap();

    let events: Vec<Event> = rx.try_iter().collect();
    assert!(matches!(events[0], Event::New(_)));
    assert!(matches!(events[1], Event::Deal(_)));
    assert!(events.iter().any(|e| matches!(e, Event::Discard(d) if d.tile == t)));
}

#[test]
fn test_registry_lifecycle() {
    let mut reg = MatchRegistry::new(Rule {
        seed: 12,
        ..Rule::default()
    });
    for (i, n) in ["a", "b", "c"].iter().enumerate() {
        assert_eq!(reg.join("room", n), Ok(i));
    }
    assert!(reg.table("room").is_none());
    assert_eq!(reg.join("room", "d"), Ok(3));

    let table = reg.table("room").unwrap();
    let stg = table.snapshot().unwrap();
    assert_eq!(stg.players.clone().map(|p| p.name), names());

    // 別の部屋は独立
    assert_eq!(reg.join("other", "a"), Ok(0));
    assert_eq!(reg.len(), 2);

    reg.reset("room").unwrap();
    assert_eq!(table.snapshot(), Err(MatchError::Closed));
    let stg = reg.table("room").unwrap().snapshot().unwrap();
    assert_eq!(stg.phase, Phase::Discard);

    for s in 0..SEAT {
        reg.leave("room", s).unwrap();
    }
    assert!(reg.room("room").is_none());
    reg.leave("other", 0).unwrap();
    assert!(reg.is_empty());
}
