// ログ出力や汎用的な処理を行うモジュール
pub mod log;
pub mod misc;
pub mod timer;
