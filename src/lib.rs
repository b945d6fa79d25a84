//! FlowTrace - 最大流算法执行轨迹
//!
//! 在带容量的有向图上计算最大流，并逐步记录算法执行过程，支持：
//! - Edmonds-Karp（BFS 增广）最大流与最小割
//! - 每一步的节点/边快照（路径、饱和、阻塞、反向边标记），用于动画演示
//! - 表单、JSON、CSV 格式的图输入
//! - 命令行与 HTTP API

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod metrics;
pub mod server;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    compute_max_flow, EdmondsKarp, FlowRun, MaxFlowResult, MinCut, RunError, Step, StepPhase,
};
pub use error::{Error, Result};
pub use graph::{EdgeId, FlowEdge, FlowNetwork};
pub use import::{GraphImporter, GraphInput};
pub use types::FlowValue;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
