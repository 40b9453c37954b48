mod nop;
mod random;
mod silent;

use std::fmt;

use crate::model::*;
use crate::util::misc::Res;

pub use nop::Nop;
pub use random::RandomDiscard;
pub use silent::Silent;

#[derive(Debug, Clone)]
pub struct Arg {
    pub name: String,
    pub value: String,
}

impl Arg {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub args: Vec<Arg>,
}

// 座席を操作するActor (シミュレーション用)
pub trait Actor: Send {
    // 対局開始時の初期化処理
    fn init(&mut self, _seat: Seat) {}

    // 打牌フェーズのアクションを選択 (actsはDiscard, AnKong, BuKongのいずれか)
    fn select_turn_action(&mut self, stg: &GameState, acts: &[Action]) -> Action;

    // 捨て牌に対する応答を選択 (actsは必ずPassを含む)
    // Noneを返した場合は応答せず, 期限切れで見送りとして扱われる
    fn select_call_action(&mut self, stg: &GameState, acts: &[Action]) -> Option<Action>;

    // Actorの詳細表示用
    fn get_config(&self) -> &Config;
}

impl fmt::Debug for dyn Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conf = self.get_config();
        let arg_str = conf
            .args
            .iter()
            .map(|a| format!("{}={}", a.name, a.value))
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}({})", conf.name, arg_str)
    }
}

trait ActorBuilder {
    fn get_default_config(&self) -> Config;
    fn create(&self, config: Config) -> Res<Box<dyn Actor>>;
}

// "Name" または "Name(arg1,arg2)" 形式の文字列からActorを生成
pub fn create_actor(exp: &str) -> Res<Box<dyn Actor>> {
    let builders: Vec<Box<dyn ActorBuilder>> = vec![
        Box::new(nop::NopBuilder {}),
        Box::new(random::RandomDiscardBuilder {}),
        Box::new(silent::SilentBuilder {}),
    ];

    let name: &str;
    let args: Vec<&str>;
    let paren_left = exp.find('(');
    let paren_right = exp.rfind(')');
    if let (Some(l), Some(r)) = (paren_left, paren_right) {
        if r < l {
            return Err(format!("invalid paren: {}", exp).into());
        }
        args = exp[l + 1..r].split(',').collect();
        name = &exp[..l];
    } else {
        args = vec![];
        name = exp;
    }

    for b in &builders {
        let mut conf = b.get_default_config();
        if name == conf.name {
            if conf.args.len() < args.len() {
                return Err(format!(
                    "expected {} arguments for {}. but {} arguments are provided.",
                    conf.args.len(),
                    name,
                    args.len(),
                )
                .into());
            }
            for (i, &a) in args.iter().enumerate() {
                if !a.is_empty() {
                    conf.args[i].value = a.to_string();
                }
            }
            return b.create(conf);
        }
    }

    Err(format!("unknown actor name: {}", name).into())
}

// 打牌の既定動作: ツモ牌があればツモ切り, なければ最初の候補
fn default_discard(stg: &GameState, acts: &[Action]) -> Action {
    let discards: Vec<&Action> = acts.iter().filter(|a| a.ty == ActionType::Discard).collect();
    if let Some(t) = stg.last_drawn {
        if let Some(a) = discards.iter().find(|a| a.tiles.first() == Some(&t)) {
            return (*a).clone();
        }
    }
    match discards.first() {
        Some(a) => (*a).clone(),
        None => acts.first().cloned().unwrap_or_else(Action::pass),
    }
}

#[test]
fn test_create_actor() {
    let a = create_actor("Nop").unwrap();
    assert_eq!(a.get_config().name, "Nop");

    let a = create_actor("RandomDiscard(42)").unwrap();
    assert_eq!(format!("{:?}", a), "RandomDiscard(seed=42)");

    assert!(create_actor("Unknown").is_err());
    assert!(create_actor("Nop(1)").is_err());
    assert!(create_actor("RandomDiscard(x)").is_err());
}
