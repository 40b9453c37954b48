// 対局の進行を管理するモジュール
pub mod arbiter;
pub mod engine;
pub mod possible_actions;
pub mod registry;
pub mod stage_controller;
pub mod string;
pub mod table;
pub mod wall;
