use std::fs::File;
use std::io::{self, BufRead};

use mahjong16::{
    control::string::*,
    error,
    hand::{calc_winning_kinds, is_winning_hand, sort_hand},
    model::*,
    util::misc::*,
};

// 和了判定モード
// 式: "<手牌> [和了牌] [= win|no]"  (例: "m123456789p123456s9 s9 = win")
// "= ..." を付けた場合は判定結果と照合する
#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut exps = vec![];
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-f" => file_path = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    exps.push(s.clone());
                }
            }
        }

        if file_path.is_empty() == exps.is_empty() {
            print_usage();
            return;
        }

        if !exps.is_empty() {
            if let Err(e) = process_expression(&exps.join(" ")) {
                error!("{}", e);
            }
            return;
        }

        if let Err(e) = run_from_file(&file_path) {
            error!("{}", e);
        }
    }
}

fn run_from_file(file_path: &str) -> Res {
    let file = File::open(file_path)?;
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.trim();
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else if let Err(e) = process_expression(&exp) {
            error!("{}", e);
        }
        println!();
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

#[derive(Debug)]
struct Calculator {
    hand: Vec<Tile>,
    candidate: Option<Tile>,
    expected: Option<bool>,
}

impl Calculator {
    fn parse(exp: &str) -> Res<Self> {
        let (body, expected) = match exp.split_once('=') {
            Some((b, v)) => {
                let v = match v.trim() {
                    "win" => true,
                    "no" => false,
                    x => return Err(format!("invalid expectation: {}", x).into()),
                };
                (b, Some(v))
            }
            None => (exp, None),
        };

        let mut words = body.split_whitespace();
        let hand_exp = words.next().ok_or("hand not specified")?;
        let mut kinds = kinds_from_string(hand_exp)?;
        let n_hand = kinds.len();
        if let Some(c) = words.next() {
            let ck = kinds_from_string(c)?;
            if ck.len() != 1 {
                return Err(format!("candidate must be one tile: {}", c).into());
            }
            kinds.extend(ck);
        }
        if let Some(w) = words.next() {
            return Err(format!("unexpected token: {}", w).into());
        }

        // 手牌と和了牌を合わせて識別番号を割り当てる
        let mut tiles = tiles_from_kinds(&kinds)?;
        let candidate = if tiles.len() > n_hand { tiles.pop() } else { None };
        sort_hand(&mut tiles);

        Ok(Self {
            hand: tiles,
            candidate,
            expected,
        })
    }

    fn is_win(&self) -> bool {
        is_winning_hand(&self.hand, &[], self.candidate.as_ref())
    }

    fn verify(&self, res: bool) -> Verify {
        match self.expected {
            Some(e) if e == res => Verify::Ok,
            Some(_) => Verify::Error,
            None => Verify::Skip,
        }
    }

    fn run(&self) -> Verify {
        let res = self.is_win();
        match self.candidate {
            Some(c) => println!("hand: {}, candidate: {}", tiles_to_string(&self.hand), c),
            None => println!("hand: {}", tiles_to_string(&self.hand)),
        }
        println!("win: {}", res);
        if self.candidate.is_none() && self.hand.len() == HAND_SIZE {
            let kinds = calc_winning_kinds(&self.hand, &[]);
            println!("waits: {}", kinds_to_string(&kinds));
        }

        let v = self.verify(res);
        if v == Verify::Error {
            println!("verify: expected {:?}", self.expected);
        }
        v
    }
}

fn process_expression(exp: &str) -> Res {
    println!("> {}", exp);
    let calculator = Calculator::parse(exp)?;
    if calculator.run() == Verify::Error {
        return Err("verification failed".into());
    }
    Ok(())
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C HAND [CANDIDATE] [= win|no]
    $ cargo run C -f FILE
Options
    -f: read expresisons from file instead of a commandline expression
"
    );
}

#[test]
fn test_calculator() {
    let file = File::open("tests/win_hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.trim();
        if e.is_empty() || e.starts_with('#') {
            continue;
        }
        let calculator = Calculator::parse(e).unwrap();
        assert_ne!(calculator.run(), Verify::Error, "{}", exp);
        assert_ne!(calculator.verify(calculator.is_win()), Verify::Skip, "{}", exp);
    }
}

#[test]
fn test_parse_errors() {
    assert!(Calculator::parse("").is_err());
    assert!(Calculator::parse("m123 m45").is_err());
    assert!(Calculator::parse("m123 = maybe").is_err());
    assert!(Calculator::parse("m11111").is_err());
}
