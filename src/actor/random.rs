use rand::prelude::*;

use super::*;

pub struct RandomDiscardBuilder;

impl ActorBuilder for RandomDiscardBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "RandomDiscard".to_string(),
            args: vec![Arg::new("seed", "0")],
        }
    }

    fn create(&self, config: Config) -> Res<Box<dyn Actor>> {
        Ok(Box::new(RandomDiscard::from_config(config)?))
    }
}

// ランダムに打牌し, 和了できる場合は必ず和了, それ以外の鳴きはランダム
#[derive(Clone)]
pub struct RandomDiscard {
    config: Config,
    rng: rand::rngs::StdRng,
}

impl RandomDiscard {
    pub fn from_config(config: Config) -> Res<Self> {
        let seed: u64 = config.args[0].value.parse()?;
        Ok(Self {
            config,
            rng: rand::SeedableRng::seed_from_u64(seed),
        })
    }
}

impl Actor for RandomDiscard {
    fn select_turn_action(&mut self, stg: &GameState, acts: &[Action]) -> Action {
        // 槓は常に行う
        if let Some(a) = acts.iter().find(|a| a.ty != ActionType::Discard) {
            return a.clone();
        }
        match acts.choose(&mut self.rng) {
            Some(a) => a.clone(),
            None => default_discard(stg, acts),
        }
    }

    fn select_call_action(&mut self, _stg: &GameState, acts: &[Action]) -> Option<Action> {
        if let Some(a) = acts.iter().find(|a| a.ty == ActionType::Hu) {
            return Some(a.clone());
        }
        Some(acts.choose(&mut self.rng).cloned().unwrap_or_else(Action::pass))
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}
