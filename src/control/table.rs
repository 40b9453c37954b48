use std::sync::mpsc;
use std::thread;

use super::engine::MahjongEngine;
use crate::listener::Listener;
use crate::model::*;
use crate::util::timer::Timer;
use crate::{debug, error};

// 1対局分のエンジンを専用スレッドで動かす
// すべての操作と応答期限切れは単一のキューに入り, 到着順に1つずつ最後まで処理される

#[derive(Debug, Clone)]
pub enum Command {
    Discard { seat: Seat, tile: TileId },
    Claim { seat: Seat, action: Action, window: Option<WindowId> },
    AnKong { seat: Seat, kind: Option<Kind> },
    BuKong { seat: Seat, kind: Option<Kind> },
    Reset,
    Snapshot,
}

type StageReply = mpsc::Sender<MatchResult<GameState>>;
type ActionsReply = mpsc::Sender<MatchResult<Vec<Action>>>;

#[derive(Debug)]
enum Message {
    Request(Command, StageReply),
    Actions(Seat, ActionsReply),
    Expire(WindowId),
    Shutdown,
}

// 別スレッドから操作を送るためのハンドル (複製可能)
#[derive(Debug, Clone)]
pub struct TableHandle {
    tx: mpsc::Sender<Message>,
}

impl TableHandle {
    pub fn request(&self, cmd: Command) -> MatchResult<GameState> {
        let (tx, rx) = mpsc::channel();
        self.tx
            .send(Message::Request(cmd, tx))
            .map_err(|_| MatchError::Closed)?;
        rx.recv().map_err(|_| MatchError::Closed)?
    }

    pub fn discard(&self, seat: Seat, tile: TileId) -> MatchResult<GameState> {
        self.request(Command::Discard { seat, tile })
    }

    pub fn claim(
        &self,
        seat: Seat,
        action: Action,
        window: Option<WindowId>,
    ) -> MatchResult<GameState> {
        self.request(Command::Claim {
            seat,
            action,
            window,
        })
    }

    pub fn an_kong(&self, seat: Seat, kind: Option<Kind>) -> MatchResult<GameState> {
        self.request(Command::AnKong { seat, kind })
    }

    pub fn bu_kong(&self, seat: Seat, kind: Option<Kind>) -> MatchResult<GameState> {
        self.request(Command::BuKong { seat, kind })
    }

    pub fn reset(&self) -> MatchResult<GameState> {
        self.request(Command::Reset)
    }

    pub fn snapshot(&self) -> MatchResult<GameState> {
        self.request(Command::Snapshot)
    }

    pub fn available_actions(&self, seat: Seat) -> MatchResult<Vec<Action>> {
        let (tx, rx) = mpsc::channel();
        self.tx
            .send(Message::Actions(seat, tx))
            .map_err(|_| MatchError::Closed)?;
        rx.recv().map_err(|_| MatchError::Closed)?
    }
}

#[derive(Debug)]
pub struct MatchTable {
    handle: TableHandle,
    worker: Option<thread::JoinHandle<()>>,
}

impl MatchTable {
    // 対局を開始してワーカースレッドを起動
    pub fn start(
        rule: Rule,
        names: [String; SEAT],
        listeners: Vec<Box<dyn Listener>>,
    ) -> MatchResult<Self> {
        let mut engine = MahjongEngine::new(rule, listeners);
        engine.init_match(names)?;
        Ok(Self::spawn(engine))
    }

    // 初期化済みのエンジンから起動 (牌山を指定した対局など)
    pub fn spawn(engine: MahjongEngine) -> Self {
        let (tx, rx) = mpsc::channel();
        let handle = TableHandle { tx };
        let self_tx = handle.tx.clone();
        let worker = thread::spawn(move || Worker::new(engine, self_tx).run(rx));
        Self {
            handle,
            worker: Some(worker),
        }
    }

    #[inline]
    pub fn handle(&self) -> TableHandle {
        self.handle.clone()
    }

    pub fn shutdown(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.handle.tx.send(Message::Shutdown).ok();
            if worker.join().is_err() {
                error!("match worker panicked");
            }
        }
    }
}

impl std::ops::Deref for MatchTable {
    type Target = TableHandle;

    fn deref(&self) -> &TableHandle {
        &self.handle
    }
}

impl Drop for MatchTable {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Worker {
    engine: MahjongEngine,
    self_tx: mpsc::Sender<Message>, // 期限切れ通知用
    timer: Option<(WindowId, Timer)>,
}

impl Worker {
    fn new(engine: MahjongEngine, self_tx: mpsc::Sender<Message>) -> Self {
        Self {
            engine,
            self_tx,
            timer: None,
        }
    }

    fn run(mut self, rx: mpsc::Receiver<Message>) {
        self.update_timer();
        while let Ok(msg) = rx.recv() {
            match msg {
                Message::Request(cmd, reply) => {
                    let res = self.apply(cmd);
                    reply.send(res).ok();
                }
                Message::Actions(seat, reply) => {
                    reply.send(self.engine.available_actions(seat)).ok();
                }
                Message::Expire(id) => {
                    self.engine.expire_window(id);
                }
                Message::Shutdown => break,
            }
            self.update_timer();
        }
        debug!("match worker stopped");
    }

    fn apply(&mut self, cmd: Command) -> MatchResult<GameState> {
        let e = &mut self.engine;
        let stg = match cmd {
            Command::Discard { seat, tile } => e.apply_discard(seat, tile)?,
            Command::Claim {
                seat,
                action,
                window,
            } => e.apply_claim(seat, &action, window)?,
            Command::AnKong { seat, kind } => e.apply_an_kong(seat, kind)?,
            Command::BuKong { seat, kind } => e.apply_bu_kong(seat, kind)?,
            Command::Reset => e.reset()?,
            Command::Snapshot => e.get_stage(),
        };
        Ok(stg.clone())
    }

    // 受付期間が開いたらタイマーを設定, 解決したら取り消す
    fn update_timer(&mut self) {
        let open = self.engine.get_stage().open_window().map(|w| w.id);
        let armed = self.timer.as_ref().map(|(id, _)| *id);
        match (open, armed) {
            (Some(id), Some(tid)) if id == tid => {}
            (Some(id), _) => {
                let tx = self.self_tx.clone();
                let delay = self.engine.get_rule().claim_timeout();
                let timer = Timer::schedule(delay, move || {
                    tx.send(Message::Expire(id)).ok();
                });
                self.timer = Some((id, timer));
            }
            (None, _) => self.timer = None,
        }
    }
}

#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
fn names() -> [String; SEAT] {
    ["a", "b", "c", "d"].map(String::from)
}

#[test]
fn test_snapshot_and_shutdown() {
    let rule = Rule {
        seed: 3,
        ..Rule::default()
    };
    let mut table = MatchTable::start(rule, names(), vec![]).unwrap();
    let stg = table.snapshot().unwrap();
    assert_eq!(stg.phase, Phase::Discard);
    assert_eq!(stg.players[1].name, "b");

    let handle = table.handle();
    table.shutdown();
    assert_eq!(handle.snapshot(), Err(MatchError::Closed));
}

#[test]
fn test_deadline_passes_silent_seats() {
    let rule = Rule {
        seed: 3,
        claim_timeout_ms: 20,
        ..Rule::default()
    };
    let table = MatchTable::start(rule, names(), vec![]).unwrap();

    // 誰かが応答待ちになるまで打牌を続ける
    for _ in 0..200 {
        let stg = table.snapshot().unwrap();
        if stg.is_over() {
            return;
        }
        if let Some(w) = stg.open_window() {
            let id = w.id;
            let mut stg = table.snapshot().unwrap();
            for _ in 0..100 {
                if stg.window.as_ref().map(|w| w.id) != Some(id) || stg.open_window().is_none() {
                    break;
                }
                std::thread::sleep(Duration::from_millis(10));
                stg = table.snapshot().unwrap();
            }
            let w = stg.window.as_ref().unwrap();
            assert_eq!(w.id, id);
            assert_eq!(w.resolution, Some(Resolution::Pass));
            assert!(w.pending.iter().all(|p| p.response == Some(ActionType::Pass)));
            return;
        }
        let s = stg.turn;
        let id = stg.last_drawn.unwrap().id;
        table.discard(s, id).unwrap();
    }
}
