//! Feedback Catalyst CLI
//!
//! Report Service へのアップロードとレポート/チャート生成を端末から行う

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod progress;
