use super::*;

pub struct SilentBuilder;

impl ActorBuilder for SilentBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "Silent".to_string(),
            args: vec![],
        }
    }

    fn create(&self, config: Config) -> Res<Box<dyn Actor>> {
        Ok(Box::new(Silent::from_config(config)))
    }
}

// 捨て牌に一切応答しない (応答期限による見送りの確認用)
#[derive(Clone)]
pub struct Silent {
    config: Config,
}

impl Silent {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }
}

impl Actor for Silent {
    fn select_turn_action(&mut self, stg: &GameState, acts: &[Action]) -> Action {
        default_discard(stg, acts)
    }

    fn select_call_action(&mut self, _stg: &GameState, _acts: &[Action]) -> Option<Action> {
        None
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}
