use crate::hand::*;
use crate::model::*;

// [Call Action Check]
// 捨て牌に対して各座席が可能な応答
// 応答可能な座席にはPassを追加, それ以外の座席(捨てた座席を含む)は空
pub fn calc_possible_call_actions(
    stg: &GameState,
    discarder: Seat,
    tile: &Tile,
) -> [Vec<Action>; SEAT] {
    let mut acts_list = [vec![], vec![], vec![], vec![]];
    for s in 0..SEAT {
        if s == discarder {
            continue;
        }

        let pl = &stg.players[s];
        let mut acts = vec![];
        if is_winning_hand(&pl.hand, &pl.melds, Some(tile)) {
            acts.push(Action::hu());
        }
        if can_kong(&pl.hand, tile) {
            if let Some(v) = find_tiles(&pl.hand, tile.kind(), 3) {
                acts.push(Action::kong(v));
            }
        }
        if can_pong(&pl.hand, tile) {
            if let Some(v) = find_tiles(&pl.hand, tile.kind(), 2) {
                acts.push(Action::pong(v));
            }
        }
        // 吃は捨てた座席の次の座席のみ
        if s == next_seat(discarder) {
            for [t0, t1] in can_chi(&pl.hand, tile) {
                acts.push(Action::chi(vec![t0, t1]));
            }
        }

        if !acts.is_empty() {
            acts.push(Action::pass());
        }
        acts_list[s] = acts;
    }
    acts_list
}

// [Turn Action Check]
// 手番のプレイヤーの打牌フェーズで可能な操作
pub fn calc_possible_turn_actions(stg: &GameState) -> Vec<Action> {
    let pl = &stg.players[stg.turn];
    let mut acts = vec![];
    for &t in &pl.hand {
        acts.push(Action::discard(t));
    }
    acts.append(&mut check_an_kong(pl));
    acts.append(&mut check_bu_kong(pl));
    acts
}

fn check_an_kong(pl: &Player) -> Vec<Action> {
    possible_an_kongs(&pl.hand)
        .into_iter()
        .filter_map(|k| find_tiles(&pl.hand, k, TILE))
        .map(Action::an_kong)
        .collect()
}

fn check_bu_kong(pl: &Player) -> Vec<Action> {
    possible_bu_kongs(&pl.hand, &pl.melds)
        .into_iter()
        .map(|(_, t)| Action::bu_kong(t))
        .collect()
}

// 現在の進行状態でseatが選択可能なアクションの一覧
// 打牌フェーズ: 手番の座席のみ, 応答待ち: 未応答の座席のみ
pub fn compute_available_actions(stg: &GameState, seat: Seat) -> Vec<Action> {
    match stg.phase {
        Phase::Discard if stg.turn == seat => calc_possible_turn_actions(stg),
        Phase::Action => match stg.open_window().and_then(|w| w.find_pending(seat)) {
            Some(p) if p.response.is_none() => p.actions.clone(),
            _ => vec![],
        },
        _ => vec![],
    }
}

#[cfg(test)]
use crate::control::string::test_tiles;

#[cfg(test)]
fn stage_with_hands(hands: [&str; SEAT]) -> GameState {
    let mut stg = GameState::default();
    let mut used = String::new();
    for s in 0..SEAT {
        // 識別番号が重ならないように連結して生成
        used.push_str(hands[s]);
        let all = test_tiles(&used);
        let n = test_tiles(hands[s]).len();
        stg.players[s].seat = s;
        stg.players[s].hand = all[all.len() - n..].to_vec();
    }
    stg
}

#[test]
fn test_call_actions() {
    let stg = stage_with_hands(["m1", "m46p19", "m55s1", "w123"]);
    let tile = test_tiles("m5555")[3];
    let acts_list = calc_possible_call_actions(&stg, 0, &tile);

    assert!(acts_list[0].is_empty());
    assert_eq!(action_types(&acts_list[1]), vec![ActionType::Chi, ActionType::Pass]);
    assert_eq!(action_types(&acts_list[2]), vec![ActionType::Pong, ActionType::Pass]);
    assert!(acts_list[3].is_empty());

    // 同じ配置でも捨てた座席が異なれば吃はできない
    let acts_list = calc_possible_call_actions(&stg, 2, &tile);
    assert!(acts_list[1].is_empty());
}

#[test]
fn test_turn_actions() {
    let mut stg = stage_with_hands(["m5555p1", "", "", ""]);
    stg.phase = Phase::Discard;
    stg.turn = 0;
    let acts = compute_available_actions(&stg, 0);
    assert_eq!(action_types(&acts), vec![ActionType::Discard, ActionType::AnKong]);
    assert_eq!(acts.iter().filter(|a| a.ty == ActionType::Discard).count(), 5);

    // 手番以外
    assert!(compute_available_actions(&stg, 1).is_empty());
    stg.phase = Phase::GameOver;
    assert!(compute_available_actions(&stg, 0).is_empty());
}
