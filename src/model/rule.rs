use super::*;
use crate::util::misc::Res;

pub const DEFAULT_CLAIM_TIMEOUT_MS: u64 = 3000;

// 対局設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub seed: u64,              // 牌山生成用の乱数のシード値 (0の場合は現在時刻)
    pub dealer: Seat,           // 最初の手番 (配牌時に17枚目を受け取る座席)
    pub claim_timeout_ms: u64, // 捨て牌に対する応答の受付時間
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            seed: 0,
            dealer: 0,
            claim_timeout_ms: DEFAULT_CLAIM_TIMEOUT_MS,
        }
    }
}

impl Rule {
    pub fn from_json(json: &str) -> Res<Self> {
        let rule: Rule = serde_json::from_str(json)?;
        rule.validate()?;
        Ok(rule)
    }

    pub fn from_file(path: &str) -> Res<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> MatchResult<()> {
        if self.dealer >= SEAT {
            return Err(MatchError::malformed(format!(
                "dealer seat out of range: {}",
                self.dealer
            )));
        }
        if self.claim_timeout_ms == 0 {
            return Err(MatchError::malformed("claim_timeout_ms must be positive"));
        }
        Ok(())
    }

    #[inline]
    pub fn claim_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.claim_timeout_ms)
    }
}

#[test]
fn test_rule_from_json() {
    let rule = Rule::from_json(r#"{"seed": 7}"#).unwrap();
    assert_eq!(rule.seed, 7);
    assert_eq!(rule.dealer, 0);
    assert_eq!(rule.claim_timeout_ms, DEFAULT_CLAIM_TIMEOUT_MS);

    assert!(Rule::from_json(r#"{"dealer": 4}"#).is_err());
    assert!(Rule::from_json(r#"{"claim_timeout_ms": 0}"#).is_err());
}
