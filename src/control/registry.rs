use std::collections::BTreeMap;

use super::table::{MatchTable, TableHandle};
use crate::model::*;
use crate::{debug, info};

// 部屋 (4席 + 進行中の対局)
#[derive(Debug, Default)]
pub struct Room {
    players: [Option<String>; SEAT],
    table: Option<MatchTable>,
}

impl Room {
    pub fn count(&self) -> usize {
        self.players.iter().filter(|p| p.is_some()).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count() == SEAT
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.table.is_some()
    }

    fn names(&self) -> [String; SEAT] {
        self.players.clone().map(|p| p.unwrap_or_default())
    }
}

// [Match Registry]
// 部屋は最初の参加で作成され, 全員が退出すると破棄される
#[derive(Debug)]
pub struct MatchRegistry {
    rule: Rule,
    rooms: BTreeMap<String, Room>,
}

impl MatchRegistry {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            rooms: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    // 進行中の対局の操作ハンドル
    pub fn table(&self, room_id: &str) -> Option<TableHandle> {
        self.rooms
            .get(room_id)
            .and_then(|r| r.table.as_ref())
            .map(|t| t.handle())
    }

    // 空いている最小の座席を割り当て, 4人揃った時点で対局を開始
    // 同じ名前で再度参加した場合は同じ座席を返す
    pub fn join(&mut self, room_id: &str, name: &str) -> MatchResult<Seat> {
        let room = self.rooms.entry(room_id.to_string()).or_default();
        if let Some(s) = room.players.iter().position(|p| p.as_deref() == Some(name)) {
            return Ok(s);
        }

        let seat = match room.players.iter().position(|p| p.is_none()) {
            Some(s) => s,
            None => {
                return Err(MatchError::illegal(format!("room {} is full", room_id)));
            }
        };
        room.players[seat] = Some(name.to_string());
        debug!("join: room={}, seat={}, name={}", room_id, seat, name);

        if room.is_full() {
            self.start_match(room_id)?;
        }
        Ok(seat)
    }

    // 座席を空ける 進行中の対局は終了し, 空になった部屋は破棄
    pub fn leave(&mut self, room_id: &str, seat: Seat) -> MatchResult<()> {
        if seat >= SEAT {
            return Err(MatchError::malformed(format!("unknown seat: {}", seat)));
        }
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| MatchError::illegal(format!("room not found: {}", room_id)))?;
        if room.players[seat].take().is_none() {
            return Err(MatchError::illegal(format!("seat {} is empty", seat)));
        }

        if let Some(mut table) = room.table.take() {
            table.shutdown();
            info!("match closed: room={}", room_id);
        }
        if room.count() == 0 {
            self.rooms.remove(room_id);
            debug!("room destroyed: {}", room_id);
        }
        Ok(())
    }

    // 全員が揃っている部屋で新しい対局を開始
    pub fn reset(&mut self, room_id: &str) -> MatchResult<()> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| MatchError::illegal(format!("room not found: {}", room_id)))?;
        if !room.is_full() {
            return Err(MatchError::illegal(format!("room {} is not full", room_id)));
        }
        if let Some(mut table) = room.table.take() {
            table.shutdown();
        }
        self.start_match(room_id)
    }

    fn start_match(&mut self, room_id: &str) -> MatchResult<()> {
        let rule = self.rule.clone();
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| MatchError::illegal(format!("room not found: {}", room_id)))?;
        let table = MatchTable::start(rule, room.names(), vec![])?;
        room.table = Some(table);
        info!("match started: room={}", room_id);
        Ok(())
    }
}

#[cfg(test)]
fn registry() -> MatchRegistry {
    MatchRegistry::new(Rule {
        seed: 11,
        ..Rule::default()
    })
}

#[test]
fn test_join_and_start() {
    let mut reg = registry();
    assert!(reg.is_empty());
    assert_eq!(reg.join("r1", "a"), Ok(0));
    assert_eq!(reg.join("r1", "b"), Ok(1));
    assert_eq!(reg.join("r1", "a"), Ok(0));
    assert_eq!(reg.len(), 1);
    assert!(reg.table("r1").is_none());

    assert_eq!(reg.join("r1", "c"), Ok(2));
    assert_eq!(reg.join("r1", "d"), Ok(3));
    assert!(reg.room("r1").unwrap().is_playing());
    let stg = reg.table("r1").unwrap().snapshot().unwrap();
    assert_eq!(stg.players[3].name, "d");

    // 5人目
    assert!(matches!(reg.join("r1", "e"), Err(MatchError::IllegalAction { .. })));
}

#[test]
fn test_leave_and_destroy() {
    let mut reg = registry();
    for n in ["a", "b", "c", "d"] {
        reg.join("r1", n).unwrap();
    }
    let handle = reg.table("r1").unwrap();

    reg.leave("r1", 1).unwrap();
    assert!(!reg.room("r1").unwrap().is_playing());
    assert_eq!(handle.snapshot(), Err(MatchError::Closed));

    // 空いた座席は再利用される
    assert_eq!(reg.join("r1", "e"), Ok(1));
    assert!(reg.room("r1").unwrap().is_playing());

    for s in 0..SEAT {
        reg.leave("r1", s).unwrap();
    }
    assert!(reg.room("r1").is_none());
    assert!(reg.leave("r1", 0).is_err());
}

#[test]
fn test_reset() {
    let mut reg = registry();
    reg.join("r1", "a").unwrap();
    assert!(reg.reset("r1").is_err());
    for n in ["b", "c", "d"] {
        reg.join("r1", n).unwrap();
    }
    reg.reset("r1").unwrap();
    let stg = reg.table("r1").unwrap().snapshot().unwrap();
    assert_eq!(stg.phase, Phase::Discard);
}
