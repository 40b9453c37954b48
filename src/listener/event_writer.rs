use serde_json::{json, Value};

use crate::error;
use crate::listener::Listener;
use crate::model::*;
use crate::util::misc::*;

// [EventWriter]
// 1対局分のイベントをdata/<開始時刻>/<番号>.jsonに書き出す
#[derive(Debug)]
pub struct EventWriter {
    dir: String,
    start_time: u64,
    match_index: i32,
    record: Vec<Value>,
}

impl EventWriter {
    pub fn new() -> Self {
        Self::with_dir("data")
    }

    pub fn with_dir(dir: &str) -> Self {
        Self {
            dir: dir.to_string(),
            start_time: unixtime_now(),
            match_index: 0,
            record: vec![],
        }
    }

    fn flush(&mut self) -> Res {
        let path = format!("{}/{}/{:02}.json", self.dir, self.start_time, self.match_index);
        write_to_file(&path, &serde_json::to_string_pretty(&json!(self.record))?)?;
        self.record.clear();
        self.match_index += 1;
        Ok(())
    }
}

impl Default for EventWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for EventWriter {
    fn notify_event(&mut self, _stg: &GameState, event: &Event) {
        let mut write = false;
        match event {
            Event::New(_) => self.record.clear(),
            Event::Win(_) | Event::Exhaust(_) => write = true,
            _ => {}
        }

        self.record.push(json!(event));
        if write {
            if let Err(e) = self.flush() {
                error!("failed to write record: {}", e);
            }
        }
    }
}

#[test]
fn test_event_json() {
    let v = json!(Event::exhaust());
    assert_eq!(v["type"], "Exhaust");

    let tile = Tile::new(0, Kind(Suit::Man, 1));
    let v = json!(Event::deal(2, tile, true));
    assert_eq!(v["type"], "Deal");
    assert_eq!(v["seat"], 2);
    assert_eq!(v["is_replacement"], true);

    let ev: Event = serde_json::from_value(v).unwrap();
    assert!(matches!(ev, Event::Deal(EventDeal { seat: 2, .. })));
}
