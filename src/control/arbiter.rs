use crate::model::*;

// [Claim Arbiter]
// 1つの捨て牌に対する応答を到着順に処理して, 一度だけ解決する
// 解決条件 (最初に成立したもの):
//   Hu: 最初に到着した和了宣言で終了
//   Kong/Pong/Chi: 最初に到着した鳴きを採用し, 他の座席の応答は無視
//   Pass: 応答が必要な座席がすべて見送り (期限切れは見送りとして扱う)

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    Ignored,              // 解決済み, または応答済みの座席からの再送
    Waiting,              // 未応答の座席が残っている
    Resolved(Resolution), // この応答で解決
}

fn sorted_kinds(tiles: &[Tile]) -> Vec<Kind> {
    let mut kinds: Vec<Kind> = tiles.iter().map(|t| t.kind()).collect();
    kinds.sort();
    kinds
}

impl ClaimWindow {
    // acts_list: calc_possible_call_actionsの結果
    pub fn open(
        id: WindowId,
        discarder: Seat,
        tile: Tile,
        acts_list: [Vec<Action>; SEAT],
    ) -> Self {
        let mut pending = vec![];
        let mut s = next_seat(discarder);
        while s != discarder {
            if !acts_list[s].is_empty() {
                pending.push(Pending {
                    seat: s,
                    actions: acts_list[s].clone(),
                    response: None,
                });
            }
            s = next_seat(s);
        }

        Self {
            id,
            discarder,
            tile,
            pending,
            arrivals: vec![],
            resolution: None,
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn find_pending(&self, seat: Seat) -> Option<&Pending> {
        self.pending.iter().find(|p| p.seat == seat)
    }

    // まだ応答していない座席
    pub fn unanswered(&self) -> Vec<Seat> {
        self.pending
            .iter()
            .filter(|p| p.response.is_none())
            .map(|p| p.seat)
            .collect()
    }

    // 応答の検証 (状態は変更しない)
    // Ok(None)は無視される応答, Ok(Some)は候補から確定した応答
    pub fn check(&self, seat: Seat, act: &Action) -> MatchResult<Option<Action>> {
        if self.is_resolved() {
            return Ok(None);
        }

        let p = self.find_pending(seat).ok_or_else(|| {
            MatchError::illegal(format!("seat {} has no claim on this discard", seat))
        })?;
        if p.response.is_some() {
            return Ok(None);
        }

        if !act.ty.is_call() {
            return Err(MatchError::illegal(format!("{:?} is not a claim", act.ty)));
        }

        // 牌の指定は順不同
        let kinds = sorted_kinds(&act.tiles);
        let selected = p
            .actions
            .iter()
            .find(|a| a.ty == act.ty && (kinds.is_empty() || sorted_kinds(&a.tiles) == kinds));
        match selected {
            Some(a) => Ok(Some(a.clone())),
            None => Err(MatchError::illegal(format!(
                "seat {} cannot claim {} on {}",
                seat, act, self.tile
            ))),
        }
    }

    // 応答を記録して解決を試みる
    pub fn submit(&mut self, seat: Seat, act: &Action) -> MatchResult<Submit> {
        let act = match self.check(seat, act)? {
            Some(a) => a,
            None => return Ok(Submit::Ignored),
        };

        self.arrivals.push((seat, act.ty));
        if let Some(p) = self.pending.iter_mut().find(|p| p.seat == seat) {
            p.response = Some(act.ty);
        }

        let res = match act.ty {
            ActionType::Hu => Resolution::Hu { seat },
            ActionType::Kong | ActionType::Pong | ActionType::Chi => {
                Resolution::Meld { seat, action: act }
            }
            _ => {
                if self.pending.iter().any(|p| p.response.is_none()) {
                    return Ok(Submit::Waiting);
                }
                Resolution::Pass
            }
        };
        self.resolution = Some(res.clone());
        Ok(Submit::Resolved(res))
    }
}

#[cfg(test)]
use crate::control::string::test_tiles;

#[cfg(test)]
fn window() -> ClaimWindow {
    // seat1: 吃, seat2: 碰/和了, seat3: 碰
    let t = test_tiles("m5555");
    let tile = t[3];
    let acts_list = [
        vec![],
        vec![Action::chi(test_tiles("m46")), Action::pass()],
        vec![Action::hu(), Action::pong(vec![t[0], t[1]]), Action::pass()],
        vec![Action::pong(vec![t[0], t[2]]), Action::pass()],
    ];
    ClaimWindow::open(1, 0, tile, acts_list)
}

#[test]
fn test_open() {
    let w = window();
    let seats: Vec<Seat> = w.pending.iter().map(|p| p.seat).collect();
    assert_eq!(seats, vec![1, 2, 3]);
    assert!(!w.is_resolved());

    let w = ClaimWindow::open(2, 3, test_tiles("m1")[0], [vec![], vec![], vec![], vec![]]);
    assert!(w.pending.is_empty());
}

#[test]
fn test_first_meld_wins() {
    let mut w = window();
    assert_eq!(w.submit(1, &Action::pass()), Ok(Submit::Waiting));
    let r = w.submit(3, &Action::call(ActionType::Pong)).unwrap();
    assert!(matches!(r, Submit::Resolved(Resolution::Meld { seat: 3, .. })));

    // 解決後の応答はすべて無視される
    let before = w.clone();
    assert_eq!(w.submit(2, &Action::hu()), Ok(Submit::Ignored));
    assert_eq!(w.submit(3, &Action::pass()), Ok(Submit::Ignored));
    assert_eq!(w, before);
}

#[test]
fn test_first_hu_wins() {
    let mut w = window();
    assert_eq!(w.submit(2, &Action::hu()), Ok(Submit::Resolved(Resolution::Hu { seat: 2 })));
    assert_eq!(w.arrivals, vec![(2, ActionType::Hu)]);
}

#[test]
fn test_all_pass() {
    let mut w = window();
    assert_eq!(w.submit(3, &Action::pass()), Ok(Submit::Waiting));
    // 再送は無視
    assert_eq!(w.submit(3, &Action::pass()), Ok(Submit::Ignored));
    assert_eq!(w.submit(1, &Action::pass()), Ok(Submit::Waiting));
    assert_eq!(w.unanswered(), vec![2]);
    assert_eq!(w.submit(2, &Action::pass()), Ok(Submit::Resolved(Resolution::Pass)));
}

#[test]
fn test_illegal_claims() {
    let mut w = window();
    // 応答の必要がない座席
    assert!(matches!(w.submit(0, &Action::pass()), Err(MatchError::IllegalAction { .. })));
    // 資格のない鳴き
    assert!(w.submit(1, &Action::call(ActionType::Pong)).is_err());
    assert!(w.submit(3, &Action::hu()).is_err());
    assert!(w.submit(3, &Action::discard(test_tiles("m1")[0])).is_err());
    // 拒否された応答は記録されない
    assert!(w.arrivals.is_empty());
    assert_eq!(w.unanswered(), vec![1, 2, 3]);
}

#[test]
fn test_select_chi_tiles() {
    let t = test_tiles("m34679");
    let tile = test_tiles("m5555")[3];
    let acts_list = [
        vec![],
        vec![
            Action::chi(vec![t[0], t[1]]),
            Action::chi(vec![t[1], t[2]]),
            Action::chi(vec![t[2], t[3]]),
            Action::pass(),
        ],
        vec![],
        vec![],
    ];
    let mut w = ClaimWindow::open(1, 0, tile, acts_list.clone());
    let req = Action::new(ActionType::Chi, test_tiles("m46"));
    match w.submit(1, &req).unwrap() {
        Submit::Resolved(Resolution::Meld { action, .. }) => {
            assert_eq!(action.tiles, vec![t[1], t[2]])
        }
        r => panic!("{:?}", r),
    }

    // 外部から届いた応答は整列されていない
    let mut w_rev = ClaimWindow::open(2, 0, tile, acts_list);
    let req = Action {
        ty: ActionType::Chi,
        tiles: test_tiles("m64"),
    };
    assert!(req.tiles[0].kind() > req.tiles[1].kind());
    match w_rev.submit(1, &req).unwrap() {
        Submit::Resolved(Resolution::Meld { action, .. }) => {
            assert_eq!(action.tiles, vec![t[1], t[2]])
        }
        r => panic!("{:?}", r),
    }

    let mut w2 = window();
    assert!(w2.submit(1, &Action::new(ActionType::Chi, test_tiles("m67"))).is_err());
}
