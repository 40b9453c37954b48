use super::*;

pub struct NopBuilder;

impl ActorBuilder for NopBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "Nop".to_string(),
            args: vec![],
        }
    }

    fn create(&self, config: Config) -> Res<Box<dyn Actor>> {
        Ok(Box::new(Nop::from_config(config)))
    }
}

// ツモ切りのみを行い, 鳴きは常に見送る
#[derive(Clone)]
pub struct Nop {
    config: Config,
}

impl Nop {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }
}

impl Actor for Nop {
    fn select_turn_action(&mut self, stg: &GameState, acts: &[Action]) -> Action {
        default_discard(stg, acts)
    }

    fn select_call_action(&mut self, _stg: &GameState, _acts: &[Action]) -> Option<Action> {
        Some(Action::pass())
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}
