use std::sync::mpsc;

use mahjong16::{
    actor::{create_actor, Actor},
    control::table::MatchTable,
    error, info,
    listener::*,
    model::*,
    util::misc::*,
};
use rand::prelude::*;

// [App]
#[derive(Debug)]
pub struct EngineApp {
    seed: u64,
    rule: Rule,
    n_game: u32,
    n_thread: u32,
    write: bool,
    quiet: bool,
    names: [String; SEAT], // actor names
}

impl EngineApp {
    pub fn new(args: Vec<String>) -> Self {
        let mut app = Self {
            seed: 0,
            rule: Rule::default(),
            n_game: 0,
            n_thread: 16,
            write: false,
            quiet: false,
            names: ["Nop".into(), "Nop".into(), "Nop".into(), "Nop".into()],
        };

        let mut config_path: Option<String> = None;
        let mut timeout: Option<u64> = None;
        let mut dealer: Option<Seat> = None;
        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = next_value(&mut it, s),
                "-c" => config_path = Some(next_value(&mut it, s)),
                "-r-timeout" => timeout = Some(next_value(&mut it, s)),
                "-r-dealer" => dealer = Some(next_value(&mut it, s)),
                "-g" => app.n_game = next_value(&mut it, s),
                "-t" => app.n_thread = next_value(&mut it, s),
                "-w" => app.write = true,
                "-q" => app.quiet = true,
                "-0" => app.names[0] = next_value(&mut it, s),
                "-1" => app.names[1] = next_value(&mut it, s),
                "-2" => app.names[2] = next_value(&mut it, s),
                "-3" => app.names[3] = next_value(&mut it, s),
                opt => {
                    error!("unknown option: {}", opt);
                    std::process::exit(0);
                }
            }
        }

        // 設定ファイル -> コマンドライン引数 の順に適用
        if let Some(path) = config_path {
            app.rule = Rule::from_file(&path)
                .unwrap_or_else(|e| error_exit(format!("{}: {}", path, e)));
            if app.seed == 0 {
                app.seed = app.rule.seed;
            }
        }
        if let Some(t) = timeout {
            app.rule.claim_timeout_ms = t;
        }
        if let Some(d) = dealer {
            app.rule.dealer = d;
        }
        if let Err(e) = app.rule.validate() {
            error_exit::<_, ()>(e);
        }

        if app.seed == 0 {
            app.seed = unixtime_now();
            info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                app.seed
            );
        }
        app.n_thread = app.n_thread.max(1);

        app
    }

    pub fn run(self) {
        println!("seed: {}", self.seed);
        for s in 0..SEAT {
            match create_actor(&self.names[s]) {
                Ok(a) => println!("actor{}: {:?}", s, a),
                Err(e) => error_exit(e),
            }
        }
        println!();

        let start = std::time::Instant::now();
        if self.n_game == 0 {
            self.run_single_game();
        } else {
            self.run_multiple_game();
        }
        println!(
            "total elapsed time: {:8.3}sec",
            start.elapsed().as_nanos() as f32 / 1000000000.0
        );
    }

    fn run_single_game(self) {
        let mut listeners: Vec<Box<dyn Listener>> = vec![];
        if !self.quiet {
            listeners.push(Box::new(EventPrinter::new()));
        }
        if self.write {
            listeners.push(Box::new(EventWriter::new()));
        }

        let rule = Rule {
            seed: self.seed,
            ..self.rule.clone()
        };
        match play_match(rule, &self.names, listeners) {
            Ok(stg) => print_result(&stg),
            Err(e) => error!("{}", e),
        }
    }

    fn run_multiple_game(self) {
        let mut n_game = 0;
        let mut n_thread = 0;
        let mut n_game_end = 0;
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(self.seed);
        let (tx, rx) = mpsc::channel();
        let mut n_wins = [0; SEAT];
        let mut n_exhausts = 0;
        loop {
            if n_game < self.n_game && n_thread < self.n_thread {
                n_game += 1;
                n_thread += 1;

                let rule = Rule {
                    seed: rng.next_u64(),
                    ..self.rule.clone()
                };
                let names = self.names.clone();
                let tx2 = tx.clone();
                std::thread::spawn(move || {
                    let start = std::time::Instant::now();
                    let seed = rule.seed;
                    let res = play_match(rule, &names, vec![]).map_err(|e| e.to_string());
                    tx2.send((seed, res, start.elapsed())).ok();
                });
            }

            loop {
                if let Ok((seed, res, elapsed)) = rx.try_recv() {
                    let ms = elapsed.as_nanos() / 1000000;
                    match res {
                        Ok(stg) => {
                            match stg.winner {
                                Some(s) => n_wins[s] += 1,
                                None => n_exhausts += 1,
                            }
                            println!(
                                "{:5},{:6}ms,{:20}, winner: {:?}, turn_count: {}",
                                n_game_end, ms, seed, stg.winner, stg.turn_count
                            );
                        }
                        Err(e) => error!("{:5}, {}: {}", n_game_end, seed, e),
                    }
                    n_thread -= 1;
                    n_game_end += 1;
                }
                if n_thread < self.n_thread {
                    break;
                }
                sleep(0.01);
            }

            if n_thread == 0 && n_game == self.n_game {
                for s in 0..SEAT {
                    println!(
                        "ac{} win_rate: {:.3}",
                        s,
                        n_wins[s] as f32 / n_game as f32
                    );
                }
                println!("exhausted: {:.3}", n_exhausts as f32 / n_game as f32);
                break;
            }
        }
    }
}

// 1対局をMatchTable経由で最後まで進める
// 応答しないActorがいる場合は応答期限まで待機する
fn play_match(
    rule: Rule,
    names: &[String; SEAT],
    listeners: Vec<Box<dyn Listener>>,
) -> Res<GameState> {
    let mut actors: Vec<Box<dyn Actor>> = vec![];
    for (s, n) in names.iter().enumerate() {
        let mut a = create_actor(n)?;
        a.init(s);
        actors.push(a);
    }

    let table = MatchTable::start(rule, names.clone(), listeners)?;
    let mut answered: Option<WindowId> = None;
    loop {
        let stg = table.snapshot()?;
        if stg.is_over() {
            return Ok(stg);
        }

        match stg.phase {
            Phase::Discard => {
                let s = stg.turn;
                let acts = table.available_actions(s)?;
                let act = actors[s].select_turn_action(&stg, &acts);
                let t = *act.tiles.first().ok_or("turn action without tile")?;
                match act.ty {
                    ActionType::Discard => table.discard(s, t.id)?,
                    ActionType::AnKong => table.an_kong(s, Some(t.kind()))?,
                    ActionType::BuKong => table.bu_kong(s, Some(t.kind()))?,
                    _ => return Err(format!("invalid turn action: {}", act).into()),
                };
            }
            Phase::Action => {
                let w = match stg.open_window() {
                    Some(w) => w,
                    None => continue,
                };
                if answered == Some(w.id) {
                    // 応答期限切れ待ち
                    sleep(0.005);
                    continue;
                }
                answered = Some(w.id);
                for s in w.unanswered() {
                    let acts = table.available_actions(s)?;
                    if acts.is_empty() {
                        continue; // 他の座席の鳴きで解決済み
                    }
                    if let Some(a) = actors[s].select_call_action(&stg, &acts) {
                        table.claim(s, a, Some(w.id))?;
                    }
                }
            }
            _ => sleep(0.005),
        }
    }
}

fn print_result(stg: &GameState) {
    match stg.winner {
        Some(s) => println!("winner: seat{} ({})", s, stg.players[s].name),
        None => println!("exhausted"),
    }
    println!("turn_count: {}", stg.turn_count);
}
