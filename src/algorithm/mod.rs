//! 图算法模块
//!
//! Edmonds-Karp 最大流：残量状态、增广路径查找、轨迹记录与状态机驱动

mod augmenting_path;
mod max_flow;
mod min_cut;
mod residual;
mod trace;

pub use augmenting_path::{find_augmenting_path, AugmentingPath};
pub use max_flow::{
    compute_max_flow, default_iteration_limit, EdmondsKarp, FlowRun, MaxFlowResult, RunError,
};
pub use min_cut::MinCut;
pub use residual::ResidualState;
pub use trace::{edge_flows, EdgeState, GraphSnapshot, NodeState, Step, StepPhase, TraceRecorder};
