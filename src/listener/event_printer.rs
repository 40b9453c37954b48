use crate::control::string::tiles_to_string;
use crate::listener::Listener;
use crate::model::*;

// [EventPrinter]
#[derive(Debug, Default)]
pub struct EventPrinter {}

impl EventPrinter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Listener for EventPrinter {
    fn notify_event(&mut self, stg: &GameState, event: &Event) {
        print!("(step:{}) ", stg.step);
        match event {
            Event::New(_) => {
                println!("New");
                println!("{}", stg);
            }
            Event::Deal(e) => {
                let r = if e.is_replacement { " (replacement)" } else { "" };
                println!("Deal seat{} {}{}", e.seat, e.tile, r);
                println!("hand: {}", tiles_to_string(&stg.players[e.seat].hand));
            }
            Event::Discard(e) => {
                let pending: Vec<Seat> = e
                    .window
                    .as_ref()
                    .map(|w| w.pending.iter().map(|p| p.seat).collect())
                    .unwrap_or_default();
                println!("Discard seat{} {} pending: {:?}", e.seat, e.tile, pending);
            }
            Event::Claim(e) => {
                println!("Claim seat{} {}", e.seat, e.action);
            }
            Event::Meld(e) => {
                println!("Meld seat{} {:?}", e.seat, e.meld_type);
                println!("{}", stg.players[e.seat]);
            }
            Event::Pass(e) => {
                println!("Pass (discarded by seat{})", e.seat);
            }
            Event::Win(e) => {
                match e.from {
                    Some(f) => println!("Win seat{} {} from seat{}", e.seat, e.tile, f),
                    None => println!("Win seat{} {} self-drawn", e.seat, e.tile),
                }
                println!("{}", stg);
            }
            Event::Exhaust(_) => {
                println!("Exhaust");
                println!("{}", stg);
            }
        }
    }
}
