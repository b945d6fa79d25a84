//! 最小割
//!
//! 最大流计算结束后，从源点沿正残量可达的节点构成源侧，
//! 从源侧指向汇侧的原始边即为最小割，其容量之和等于最大流。

use super::residual::ResidualState;
use crate::graph::FlowNetwork;
use crate::types::FlowValue;
use serde::{Deserialize, Serialize};

/// 最小割结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinCut<N> {
    /// 源侧节点（按插入顺序）
    pub source_side: Vec<String>,
    /// 割边下标（按输入顺序）
    pub edges: Vec<usize>,
    /// 割容量
    pub capacity: N,
}

impl<N: FlowValue> MinCut<N> {
    /// 在终止状态的残量图上求最小割
    pub fn from_residual(network: &FlowNetwork<N>, state: &ResidualState<N>) -> Self {
        let reachable = state.reachable_from(network.source());

        let source_side = network
            .nodes()
            .enumerate()
            .filter(|(i, _)| reachable[*i])
            .map(|(_, id)| id.to_string())
            .collect();

        let mut edges = Vec::new();
        let mut capacity = N::ZERO;
        for edge in network.edges() {
            if reachable[edge.source()] && !reachable[edge.target()] {
                edges.push(edge.id().index());
                capacity += edge.capacity();
            }
        }

        Self {
            source_side,
            edges,
            capacity,
        }
    }
}
