// ランダムな進行と和了判定の性質
use mahjong16::control::{engine::MahjongEngine, string::tiles_from_kinds};
use mahjong16::hand::{calc_winning_kinds, is_winning_hand};
use mahjong16::model::*;
use proptest::prelude::*;
use rand::prelude::*;

fn names() -> [String; SEAT] {
    ["a", "b", "c", "d"].map(String::from)
}

// 各座席がランダムに操作を選んで最後まで進める
// 1イベントごとに牌の総数と手牌の枚数を確認
fn play_random(seed: u64) -> GameState {
    let rule = Rule {
        seed,
        ..Rule::default()
    };
    let mut engine = MahjongEngine::new(rule, vec![]);
    engine.init_match(names()).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);

    loop {
        let stg = engine.get_stage().clone();
        assert_eq!(stg.count_tiles(), TILE_COUNT);
        if stg.is_over() {
            return stg;
        }

        for pl in &stg.players {
            let n = pl.hand.len() + pl.melds.len() * 3;
            if stg.phase == Phase::Discard && pl.seat == stg.turn {
                assert_eq!(n, HAND_SIZE + 1, "{}", stg);
            } else {
                assert_eq!(n, HAND_SIZE, "{}", stg);
            }
            assert!(pl.hand.windows(2).all(|w| w[0] <= w[1]));
        }

        match stg.phase {
            Phase::Discard => {
                let s = stg.turn;
                let acts = engine.available_actions(s).unwrap();
                let a = acts.choose(&mut rng).unwrap().clone();
                let t = a.tiles[0];
                match a.ty {
                    ActionType::Discard => engine.apply_discard(s, t.id),
                    ActionType::AnKong => engine.apply_an_kong(s, Some(t.kind())),
                    ActionType::BuKong => engine.apply_bu_kong(s, Some(t.kind())),
                    ty => panic!("unexpected turn action: {:?}", ty),
                }
                .unwrap();
            }
            Phase::Action => {
                let w = stg.open_window().unwrap();
                let mut seats = w.unanswered();
                seats.shuffle(&mut rng);
                for s in seats {
                    let acts = engine.available_actions(s).unwrap();
                    if acts.is_empty() {
                        continue;
                    }
                    let a = acts.choose(&mut rng).unwrap().clone();
                    engine.apply_claim(s, &a, Some(w.id)).unwrap();
                }
            }
            phase => panic!("unexpected phase: {:?}", phase),
        }
    }
}

fn tiles_from_indices(idxs: &[usize]) -> Option<Vec<Tile>> {
    let kinds = all_kinds();
    let ks: Vec<Kind> = idxs.iter().map(|&i| kinds[i]).collect();
    tiles_from_kinds(&ks).ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_random_play_conserves_tiles(seed in 1u64..u64::MAX) {
        let stg = play_random(seed);
        prop_assert!(stg.is_over());
        match stg.winner {
            Some(s) => {
                let pl = &stg.players[s];
                prop_assert!(is_winning_hand(&pl.hand, &pl.melds, None));
            }
            None => prop_assert!(stg.deck.is_empty()),
        }
    }
}

proptest! {
    #[test]
    fn prop_winning_hand_is_pure(idxs in prop::collection::vec(0usize..34, 17), rot in 0usize..17) {
        let tiles = tiles_from_indices(&idxs);
        prop_assume!(tiles.is_some());
        let tiles = tiles.unwrap();

        // 和了牌を分けても, 並び順を変えても結果は同じ
        let res = is_winning_hand(&tiles[..16], &[], Some(&tiles[16]));
        let mut rotated = tiles.clone();
        rotated.rotate_left(rot);
        prop_assert_eq!(res, is_winning_hand(&rotated, &[], None));
        prop_assert_eq!(res, is_winning_hand(&tiles[..16], &[], Some(&tiles[16])));
    }

    #[test]
    fn prop_winning_kinds_match_evaluator(idxs in prop::collection::vec(0usize..34, 16)) {
        let tiles = tiles_from_indices(&idxs);
        prop_assume!(tiles.is_some());
        let hand = tiles.unwrap();

        let waits = calc_winning_kinds(&hand, &[]);
        for k in all_kinds() {
            if hand.iter().filter(|t| t.kind() == k).count() >= TILE {
                prop_assert!(!waits.contains(&k));
                continue;
            }
            let t = Tile::new(TILE_COUNT - 1, k);
            prop_assert_eq!(waits.contains(&k), is_winning_hand(&hand, &[], Some(&t)));
        }
    }
}
