// 作為的な牌山で対局の進行を確認する
use mahjong16::control::{
    engine::MahjongEngine, string::kinds_from_string, wall::create_wall_debug,
};
use mahjong16::model::*;

fn names() -> [String; SEAT] {
    ["east", "south", "west", "north"].map(String::from)
}

fn engine_with(hands: [&str; SEAT], draws: &str) -> MahjongEngine {
    let mut engine = MahjongEngine::new(
        Rule {
            seed: 5,
            ..Rule::default()
        },
        vec![],
    );
    let wall = create_wall_debug(5, 0, hands, draws).unwrap();
    engine.init_match_with_wall(names(), wall).unwrap();
    engine
}

fn kind(exp: &str) -> Kind {
    kinds_from_string(exp).unwrap()[0]
}

fn tile_in_hand(stg: &GameState, seat: Seat, exp: &str) -> Tile {
    let k = kind(exp);
    *stg.players[seat].hand.iter().find(|t| t.kind() == k).unwrap()
}

// 打牌して開いた受付期間
fn discard_window(engine: &mut MahjongEngine, seat: Seat, t: Tile) -> WindowId {
    let stg = engine.apply_discard(seat, t.id).unwrap();
    stg.open_window().unwrap().id
}

// seat0がm5を捨てる
// seat2はm55を持つので碰可能, seat3はm46を持つが上家ではないので吃できない
const PONG_HANDS: [&str; SEAT] = [
    "m159p159s159w1234d123",
    "m1289p2378s2378w22d11",
    "m55p44466s44466w33d22",
    "m4699p1789s1789w44d33",
];

// seat1とseat3を入れ替えて, seat1(上家の次)が吃可能
const CHI_HANDS: [&str; SEAT] = [
    "m159p159s159w1234d123",
    "m4699p1789s1789w44d33",
    "m55p44466s44466w33d22",
    "m1289p2378s2378w22d11",
];

#[test]
fn test_pong_by_non_adjacent_seat() {
    let mut engine = engine_with(PONG_HANDS, "w1");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");

    let stg = engine.apply_discard(0, t.id).unwrap();
    assert_eq!(stg.phase, Phase::Action);
    let w = stg.open_window().unwrap();
    assert_eq!(w.unanswered(), vec![2]);
    let id = w.id;

    // seat3の吃, seat1の碰は資格がない
    let before = engine.get_stage().clone();
    let chi = Action::call(ActionType::Chi);
    assert!(matches!(
        engine.apply_claim(3, &chi, Some(id)),
        Err(MatchError::IllegalAction { .. })
    ));
    assert!(matches!(
        engine.apply_claim(1, &Action::call(ActionType::Pong), Some(id)),
        Err(MatchError::IllegalAction { .. })
    ));
    assert_eq!(engine.get_stage(), &before);

    let stg = engine
        .apply_claim(2, &Action::call(ActionType::Pong), Some(id))
        .unwrap();
    assert_eq!(stg.phase, Phase::Discard);
    assert_eq!(stg.turn, 2);
    let pl = &stg.players[2];
    assert_eq!(pl.melds.len(), 1);
    assert_eq!(pl.melds[0].meld_type, MeldType::Pong);
    assert_eq!(pl.melds[0].tiles.len(), 3);
    assert_eq!(pl.melds[0].from, Some(0));
    assert!(pl.melds[0].tiles.contains(&t));
    assert_eq!(pl.hand.len(), HAND_SIZE - 2);
    assert_eq!(stg.players[0].discards.last().unwrap().claimed_by, Some(2));
    assert_eq!(stg.count_tiles(), TILE_COUNT);
}

#[test]
fn test_chi_by_next_seat() {
    let mut engine = engine_with(CHI_HANDS, "w1");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");

    let stg = engine.apply_discard(0, t.id).unwrap();
    let w = stg.open_window().unwrap();
    assert_eq!(w.unanswered(), vec![1, 2]);
    let id = w.id;

    let m4 = tile_in_hand(engine.get_stage(), 1, "m4");
    let m6 = tile_in_hand(engine.get_stage(), 1, "m6");
    let stg = engine
        .apply_claim(1, &Action::chi(vec![m4, m6]), Some(id))
        .unwrap();
    assert_eq!(stg.turn, 1);
    assert_eq!(stg.phase, Phase::Discard);
    let meld = &stg.players[1].melds[0];
    assert_eq!(meld.meld_type, MeldType::Chi);
    assert_eq!(meld.tiles, vec![m4, t, m6]);
    assert_eq!(
        stg.window.as_ref().unwrap().resolution,
        Some(Resolution::Meld {
            seat: 1,
            action: Action::chi(vec![m4, m6]),
        })
    );
}

#[test]
fn test_chi_tiles_in_any_order() {
    // 外部から届いた応答は牌の並びが整列されていない
    let mut engine = engine_with(CHI_HANDS, "w1");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");
    let id = discard_window(&mut engine, 0, t);

    let m4 = tile_in_hand(engine.get_stage(), 1, "m4");
    let m6 = tile_in_hand(engine.get_stage(), 1, "m6");
    let mut v = serde_json::to_value(Action::chi(vec![m4, m6])).unwrap();
    v["tiles"].as_array_mut().unwrap().reverse();
    let act: Action = serde_json::from_value(v).unwrap();
    assert_eq!(act.tiles, vec![m6, m4]);

    let stg = engine.apply_claim(1, &act, Some(id)).unwrap();
    assert_eq!(stg.turn, 1);
    assert_eq!(stg.players[1].melds[0].meld_type, MeldType::Chi);
    assert_eq!(stg.players[1].melds[0].tiles, vec![m4, t, m6]);
}

#[test]
fn test_resolved_exactly_once() {
    let mut engine = engine_with(CHI_HANDS, "w1");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");
    let id = discard_window(&mut engine, 0, t);

    // 先に到着した碰が採用され, 後の吃は無視される
    engine
        .apply_claim(2, &Action::call(ActionType::Pong), Some(id))
        .unwrap();
    let after = engine.get_stage().clone();
    let stg = engine
        .apply_claim(1, &Action::call(ActionType::Chi), Some(id))
        .unwrap();
    assert_eq!(stg, &after);
    let stg = engine
        .apply_claim(2, &Action::call(ActionType::Pong), Some(id))
        .unwrap();
    assert_eq!(stg, &after);
    assert_eq!(stg.turn, 2);
    assert_eq!(stg.players[1].melds.len(), 0);
    assert_eq!(stg.window.as_ref().unwrap().arrivals, vec![(2, ActionType::Pong)]);
}

#[test]
fn test_pass_then_meld() {
    // 見送りの後でも未応答の座席の鳴きは受け付ける
    let mut engine = engine_with(CHI_HANDS, "w1");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");
    let id = discard_window(&mut engine, 0, t);

    let stg = engine.apply_claim(1, &Action::pass(), Some(id)).unwrap();
    assert_eq!(stg.phase, Phase::Action);
    assert_eq!(stg.open_window().unwrap().unanswered(), vec![2]);

    // 見送った座席の再送は無視
    let stg = engine
        .apply_claim(1, &Action::call(ActionType::Chi), Some(id))
        .unwrap();
    assert_eq!(stg.phase, Phase::Action);

    let stg = engine
        .apply_claim(2, &Action::call(ActionType::Pong), Some(id))
        .unwrap();
    assert_eq!(stg.turn, 2);
    assert_eq!(stg.players[2].melds.len(), 1);
}

#[test]
fn test_all_pass_moves_to_next_seat() {
    let mut engine = engine_with(CHI_HANDS, "w1s2");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");
    let id = discard_window(&mut engine, 0, t);

    engine.apply_claim(2, &Action::pass(), Some(id)).unwrap();
    let stg = engine.apply_claim(1, &Action::pass(), Some(id)).unwrap();
    assert_eq!(stg.phase, Phase::Discard);
    assert_eq!(stg.turn, 1);
    assert_eq!(stg.turn_count, 1);
    assert_eq!(stg.last_drawn.unwrap().kind(), kind("s2"));
    assert_eq!(stg.players[1].hand.len(), HAND_SIZE + 1);
    assert_eq!(stg.players[0].discards.last().unwrap().claimed_by, None);
    assert_eq!(stg.window.as_ref().unwrap().resolution, Some(Resolution::Pass));
}

#[test]
fn test_stale_window_is_ignored() {
    let mut engine = engine_with(CHI_HANDS, "w1");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");
    let id = discard_window(&mut engine, 0, t);

    let before = engine.get_stage().clone();
    let stg = engine
        .apply_claim(2, &Action::call(ActionType::Pong), Some(id + 1))
        .unwrap();
    assert_eq!(stg, &before);
    assert_eq!(engine.expire_window(id + 1), &before);
}

#[test]
fn test_discard_hu() {
    // seat1はm5待ち (m123 m46 p111 p222 s111 w11)
    let hands = [
        "m159p159s159w1234d123",
        "m12346p111222s111w11",
        "m2378p3478s3478w22d11",
        "m789p29s29w3344d22233",
    ];
    let mut engine = engine_with(hands, "w1");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");
    let stg = engine.apply_discard(0, t.id).unwrap();
    let w = stg.open_window().unwrap();
    let p = w.find_pending(1).unwrap();
    assert_eq!(p.actions[0].ty, ActionType::Hu);
    let id = w.id;

    let stg = engine.apply_claim(1, &Action::hu(), Some(id)).unwrap();
    assert_eq!(stg.phase, Phase::GameOver);
    assert_eq!(stg.winner, Some(1));
    assert_eq!(stg.players[1].hand.len(), HAND_SIZE + 1);
    assert_eq!(stg.players[0].discards.last().unwrap().claimed_by, Some(1));
    assert_eq!(stg.count_tiles(), TILE_COUNT);

    // 終了後は一切変更されない
    let after = engine.get_stage().clone();
    assert_eq!(engine.apply_discard(1, t.id).unwrap_err(), MatchError::Closed);
    assert_eq!(engine.apply_an_kong(1, None).unwrap_err(), MatchError::Closed);
    assert_eq!(engine.get_stage(), &after);
}

#[test]
fn test_self_draw_win() {
    let hands = [
        "m12346p111222s111w11",
        "m159p159s159w1234d123",
        "m2378p3478s3478w22d11",
        "m789p29s29w3344d22233",
    ];
    let engine = engine_with(hands, "m5");
    let stg = engine.get_stage();
    assert_eq!(stg.phase, Phase::GameOver);
    assert_eq!(stg.winner, Some(0));
    assert!(stg.window.is_none());
}

#[test]
fn test_an_kong() {
    let hands = ["m159p159s159w1234d111", "", "", ""];
    let mut engine = engine_with(hands, "d1m2");
    let acts = engine.available_actions(0).unwrap();
    assert!(acts.iter().any(|a| a.ty == ActionType::AnKong));

    let stg = engine.apply_an_kong(0, Some(kind("d1"))).unwrap();
    assert_eq!(stg.phase, Phase::Discard);
    assert_eq!(stg.turn, 0);
    let pl = &stg.players[0];
    assert_eq!(pl.hand.len(), HAND_SIZE + 1 - TILE + 1);
    assert_eq!(pl.melds.len(), 1);
    assert_eq!(pl.melds[0].meld_type, MeldType::AnKong);
    assert_eq!(pl.melds[0].tiles.len(), TILE);
    assert_eq!(pl.melds[0].from, None);
    assert_eq!(stg.last_drawn.unwrap().kind(), kind("m2"));
    assert_eq!(stg.count_tiles(), TILE_COUNT);

    // 同じ種類は2度目の暗槓ができない
    assert!(matches!(
        engine.apply_an_kong(0, Some(kind("d1"))),
        Err(MatchError::IllegalAction { .. })
    ));
}

#[test]
fn test_kong_and_bu_kong() {
    // seat2がm5を明槓, seat0はseat3のp1を碰した後にツモったp1で加槓
    let hands = [
        "m159p11s159w1234d123p5",
        "m1289p2378s2378w22d11",
        "m555p44466s44466w3d22",
        "m4699p7889s1789w44d33",
    ];
    let mut engine = engine_with(hands, "w1s3p1m7p5m2p1");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");
    let id = discard_window(&mut engine, 0, t);
    let stg = engine
        .apply_claim(2, &Action::call(ActionType::Kong), Some(id))
        .unwrap();
    assert_eq!(stg.turn, 2);
    assert_eq!(stg.players[2].melds[0].meld_type, MeldType::Kong);
    assert_eq!(stg.players[2].melds[0].tiles.len(), TILE);
    // 嶺上牌
    assert_eq!(stg.last_drawn.unwrap().kind(), kind("s3"));
    assert_eq!(stg.players[2].hand.len(), HAND_SIZE - 3 + 1);
    assert_eq!(stg.count_tiles(), TILE_COUNT);

    // 誰も鳴けないs3 -> seat3がp1をツモ切り
    let s3 = stg.last_drawn.unwrap();
    let stg = engine.apply_discard(2, s3.id).unwrap();
    assert_eq!(stg.turn, 3);
    let p1 = stg.last_drawn.unwrap();
    assert_eq!(p1.kind(), kind("p1"));
    let id = discard_window(&mut engine, 3, p1);
    let stg = engine
        .apply_claim(0, &Action::call(ActionType::Pong), Some(id))
        .unwrap();
    assert_eq!(stg.turn, 0);
    assert_eq!(stg.players[0].melds[0].meld_type, MeldType::Pong);

    // 鳴きの入らない打牌で一巡
    let w1 = tile_in_hand(engine.get_stage(), 0, "w1");
    let stg = engine.apply_discard(0, w1.id).unwrap();
    assert_eq!(stg.turn, 1);
    for s in [1, 2, 3] {
        let stg = engine.get_stage();
        assert_eq!(stg.turn, s);
        let d = stg.last_drawn.unwrap();
        engine.apply_discard(s, d.id).unwrap();
    }

    let stg = engine.get_stage();
    assert_eq!(stg.turn, 0);
    assert_eq!(stg.last_drawn.unwrap().kind(), kind("p1"));
    let acts = engine.available_actions(0).unwrap();
    assert!(acts.iter().any(|a| a.ty == ActionType::BuKong));

    let stg = engine.apply_bu_kong(0, None).unwrap();
    assert_eq!(stg.phase, Phase::Discard);
    assert_eq!(stg.turn, 0);
    let pl = &stg.players[0];
    assert_eq!(pl.melds[0].meld_type, MeldType::BuKong);
    assert_eq!(pl.melds[0].tiles.len(), TILE);
    assert_eq!(pl.melds[0].from, Some(3));
    assert_eq!(pl.hand.len(), HAND_SIZE - 2);
    assert_eq!(stg.count_tiles(), TILE_COUNT);
}

#[test]
fn test_win_on_replacement_draw() {
    // seat2がm5を明槓し, 嶺上牌のs5で和了 (m5555 p111 p222 s111 s345 w11)
    let hands = [
        "m159p159s159w1234d123",
        "m1289p2378s2378w22d11",
        "m555p111222s111s34w11",
        "m4699p7889s6789w44d33",
    ];
    let mut engine = engine_with(hands, "w1s5");
    let t = tile_in_hand(engine.get_stage(), 0, "m5");
    let id = discard_window(&mut engine, 0, t);
    let stg = engine
        .apply_claim(2, &Action::call(ActionType::Kong), Some(id))
        .unwrap();

    assert_eq!(stg.phase, Phase::GameOver);
    assert_eq!(stg.winner, Some(2));
    assert_eq!(stg.players[2].melds[0].meld_type, MeldType::Kong);
    assert_eq!(stg.last_drawn.unwrap().kind(), kind("s5"));
    assert!(stg.players[2].hand.iter().any(|h| h.kind() == kind("s5")));
    assert_eq!(stg.count_tiles(), TILE_COUNT);
}

#[test]
fn test_exhaustion_on_replacement_draw() {
    // 字牌を1枚ずつ持つので和了は起こらない, seat3はm1を4枚持つ
    let hands = ["w1234d123", "w1234d123", "w1234d123", "w1234d123m1111"];
    let mut engine = engine_with(hands, "");
    loop {
        let stg = engine.get_stage();
        assert_ne!(stg.phase, Phase::GameOver);
        match stg.phase {
            Phase::Discard if stg.deck.is_empty() => break,
            Phase::Discard => {
                let s = stg.turn;
                let id = stg.last_drawn.unwrap().id;
                engine.apply_discard(s, id).unwrap();
            }
            Phase::Action => {
                let w = stg.open_window().unwrap();
                let id = w.id;
                for s in w.unanswered() {
                    engine.apply_claim(s, &Action::pass(), Some(id)).unwrap();
                }
            }
            phase => panic!("unexpected phase: {:?}", phase),
        }
    }

    // 最後の牌をツモった座席が暗槓すると嶺上牌がなく流局
    let stg = engine.get_stage();
    assert_eq!(stg.turn, 3);
    let stg = engine.apply_an_kong(3, Some(kind("m1"))).unwrap();
    assert_eq!(stg.phase, Phase::GameOver);
    assert_eq!(stg.winner, None);
    assert_eq!(stg.players[3].melds[0].meld_type, MeldType::AnKong);
    assert_eq!(stg.count_tiles(), TILE_COUNT);
    let id = stg.players[3].hand[0].id;
    assert_eq!(engine.apply_discard(3, id).unwrap_err(), MatchError::Closed);
}

#[test]
fn test_exhaustion() {
    // 全員が字牌を1枚ずつ持つので和了は起こらない
    let hands = ["w1234d123", "w1234d123", "w1234d123", "w1234d123"];
    let mut engine = engine_with(hands, "");
    loop {
        let stg = engine.get_stage();
        match stg.phase {
            Phase::GameOver => break,
            Phase::Discard => {
                let s = stg.turn;
                let id = stg.last_drawn.unwrap().id;
                engine.apply_discard(s, id).unwrap();
            }
            Phase::Action => {
                let w = stg.open_window().unwrap();
                let id = w.id;
                for s in w.unanswered() {
                    engine.apply_claim(s, &Action::pass(), Some(id)).unwrap();
                }
            }
            Phase::Draw => unreachable!(),
        }
    }

    let stg = engine.get_stage();
    assert_eq!(stg.winner, None);
    assert!(stg.deck.is_empty());
    assert_eq!(stg.count_tiles(), TILE_COUNT);
    assert!(stg.players.iter().all(|p| p.melds.is_empty()));
    assert_eq!(
        stg.players.iter().map(|p| p.discards.len()).sum::<usize>(),
        TILE_COUNT - HAND_SIZE * SEAT
    );

    let s = stg.turn;
    let id = stg.players[s].hand[0].id;
    assert_eq!(engine.apply_discard(s, id).unwrap_err(), MatchError::Closed);
}

#[test]
fn test_expire_equals_explicit_passes() {
    let mut a = engine_with(CHI_HANDS, "w1");
    let mut b = engine_with(CHI_HANDS, "w1");
    let t = tile_in_hand(a.get_stage(), 0, "m5");

    let id = discard_window(&mut a, 0, t);
    b.apply_discard(0, t.id).unwrap();

    // seat1だけ明示的に見送り, seat2は期限切れ
    a.apply_claim(1, &Action::pass(), Some(id)).unwrap();
    a.expire_window(id);
    b.apply_claim(1, &Action::pass(), Some(id)).unwrap();
    b.apply_claim(2, &Action::pass(), Some(id)).unwrap();
    assert_eq!(a.get_stage(), b.get_stage());

    // 解決済みの受付期間への期限切れは何もしない
    let before = a.get_stage().clone();
    assert_eq!(a.expire_window(id), &before);
}
