use std::fmt;

// エンジンの各操作に対する拒否理由
// 拒否された操作はGameStateを一切変更しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// 手番外の操作, 資格のない鳴き, 上家以外からのチーなど
    IllegalAction { message: String },
    /// 範囲外の牌番号, 存在しない座席番号など
    MalformedInput { message: String },
    /// 対局がすでに終了している, またはワーカーが停止している
    Closed,
}

impl MatchError {
    pub fn illegal(message: impl Into<String>) -> Self {
        MatchError::IllegalAction {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        MatchError::MalformedInput {
            message: message.into(),
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::IllegalAction { message } => write!(f, "Illegal action: {}", message),
            MatchError::MalformedInput { message } => write!(f, "Malformed input: {}", message),
            MatchError::Closed => write!(f, "Match closed"),
        }
    }
}

impl std::error::Error for MatchError {}

pub type MatchResult<T> = Result<T, MatchError>;
