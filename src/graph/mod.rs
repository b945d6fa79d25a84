//! 图模型模块
//!
//! 流网络的只读描述：节点、有向边、容量、源点与汇点

mod edge;
mod network;

pub use edge::{EdgeId, FlowEdge};
pub use network::FlowNetwork;
