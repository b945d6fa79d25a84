//! 命令行交互模块
//!
//! 会话命令与步骤/结果打印

mod commands;
mod printer;

pub use commands::{CommandResult, Session};
pub use printer::{PrintMode, Printer};
