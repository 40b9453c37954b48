mod event_channel;
mod event_printer;
mod event_writer;

use std::fmt;

use crate::model::*;

pub use event_channel::{EventChannel, EventRx, EventTx};
pub use event_printer::EventPrinter;
pub use event_writer::EventWriter;

// イベント処理後のGameStateと処理したイベントを受け取る
pub trait Listener: Send {
    fn notify_event(&mut self, _stg: &GameState, _event: &Event) {}
}

impl fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener")
    }
}
