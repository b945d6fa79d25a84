//! 执行轨迹记录
//!
//! 每个关键状态转换后生成一个不可变的 [`Step`] 快照，
//! 供可视化端按顺序播放。记录器只读残量状态，从不修改。

use super::augmenting_path::AugmentingPath;
use super::residual::ResidualState;
use crate::graph::FlowNetwork;
use crate::types::FlowValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 步骤所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepPhase {
    /// 初始状态（流量全为零）
    Initial,
    /// 找到增广路径，尚未推送
    PathFound,
    /// 已沿路径推送流量
    FlowUpdated,
    /// 终止状态
    Final,
}

/// 节点快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeState {
    pub id: String,
    pub is_source: bool,
    pub is_sink: bool,
    pub is_in_path: bool,
}

/// 边快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeState<N> {
    pub id: String,
    pub index: usize,
    pub source: String,
    pub target: String,
    pub flow: N,
    pub capacity: N,
    /// `"<flow>/<capacity>"`
    pub label: String,
    pub is_in_path: bool,
    pub saturated: bool,
    pub blocked: bool,
    /// 当前路径经由该边的反向残量抵消其流量
    pub is_backward_edge: bool,
}

/// 图快照（节点 + 边）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot<N> {
    pub nodes: Vec<NodeState>,
    pub edges: Vec<EdgeState<N>>,
}

impl<N: FlowValue> GraphSnapshot<N> {
    /// 按下标获取边快照
    pub fn edge(&self, index: usize) -> Option<&EdgeState<N>> {
        self.edges.get(index)
    }

    /// 按 ID 获取节点快照
    pub fn node(&self, id: &str) -> Option<&NodeState> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// 执行轨迹中的一步
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step<N> {
    /// 在轨迹中的序号（从 0 开始）
    pub index: usize,
    pub phase: StepPhase,
    /// 各边流量，与输入边顺序一一对应
    pub flows: Vec<N>,
    /// 本步推送的瓶颈值，仅 `PathFound` 步非零
    pub path_flow: N,
    /// 截至本步的累计流量
    pub total_flow: N,
    /// 当前路径上的节点 ID
    pub path: Vec<String>,
    pub description: String,
    pub elements: GraphSnapshot<N>,
}

impl<N> Step<N> {
    /// 是否为增广步骤
    pub fn is_augmenting(&self) -> bool {
        self.phase == StepPhase::PathFound
    }
}

/// 把每个有序节点对的净流量分摊到各条边上
///
/// 平行边按下标顺序贪心分配，每条不超过自身容量；
/// 净流量为负的方向（被反向边抵消）记为零，由反向的边承担。
/// 与容量仅差舍入误差的分配量按容量计，否则 f64 下相加再相减的平行边无法显示为饱和。
pub fn edge_flows<N: FlowValue>(network: &FlowNetwork<N>, state: &ResidualState<N>) -> Vec<N> {
    let mut remaining: HashMap<(usize, usize), N> = HashMap::new();

    network
        .edges()
        .iter()
        .map(|edge| {
            let (u, v) = (edge.source(), edge.target());
            if edge.is_self_loop() {
                return N::ZERO;
            }
            let left = remaining.entry((u, v)).or_insert_with(|| {
                let net = state.flow(u, v);
                if net.is_positive() {
                    net
                } else {
                    N::ZERO
                }
            });
            let capacity = edge.capacity();
            let assigned = if *left > capacity || left.approx_eq(capacity) {
                capacity
            } else {
                *left
            };
            *left = if *left > assigned {
                *left - assigned
            } else {
                N::ZERO
            };
            assigned
        })
        .collect()
}

/// 轨迹记录器
pub struct TraceRecorder<'a, N> {
    network: &'a FlowNetwork<N>,
    next_index: usize,
}

impl<'a, N: FlowValue> TraceRecorder<'a, N> {
    pub fn new(network: &'a FlowNetwork<N>) -> Self {
        Self {
            network,
            next_index: 0,
        }
    }

    /// 已生成的步骤数
    pub fn recorded(&self) -> usize {
        self.next_index
    }

    /// 初始状态
    pub fn initial(&mut self, state: &ResidualState<N>) -> Step<N> {
        self.record(
            StepPhase::Initial,
            state,
            None,
            N::ZERO,
            N::ZERO,
            "initial state".to_string(),
        )
    }

    /// 找到增广路径（推送之前）
    pub fn path_found(
        &mut self,
        state: &ResidualState<N>,
        path: &AugmentingPath,
        bottleneck: N,
        total_flow: N,
    ) -> Step<N> {
        let description = format!(
            "augmenting path found: {}, bottleneck {}",
            self.network.labels(path.nodes()).join("→"),
            bottleneck
        );
        self.record(
            StepPhase::PathFound,
            state,
            Some(path),
            bottleneck,
            total_flow,
            description,
        )
    }

    /// 推送完成后的状态（路径清空）
    pub fn flow_updated(&mut self, state: &ResidualState<N>, total_flow: N) -> Step<N> {
        let description = format!("flows updated, cumulative flow = {}", total_flow);
        self.record(
            StepPhase::FlowUpdated,
            state,
            None,
            N::ZERO,
            total_flow,
            description,
        )
    }

    /// 终止状态
    pub fn final_state(
        &mut self,
        state: &ResidualState<N>,
        total_flow: N,
        iterations: usize,
    ) -> Step<N> {
        let description = format!(
            "final state, flow = {} after {} iterations",
            total_flow, iterations
        );
        self.record(
            StepPhase::Final,
            state,
            None,
            N::ZERO,
            total_flow,
            description,
        )
    }

    fn snapshot_with_flows(&self, flows: &[N], path: Option<&AugmentingPath>) -> GraphSnapshot<N> {
        let network = self.network;

        let nodes = network
            .nodes()
            .enumerate()
            .map(|(i, id)| NodeState {
                id: id.to_string(),
                is_source: i == network.source(),
                is_sink: i == network.sink(),
                is_in_path: path.map_or(false, |p| p.contains(i)),
            })
            .collect();

        let edges = network
            .edges()
            .iter()
            .zip(flows)
            .map(|(edge, &flow)| {
                let (u, v) = (edge.source(), edge.target());
                let capacity = edge.capacity();
                EdgeState {
                    id: edge.key().to_string(),
                    index: edge.id().index(),
                    source: network.node(u).unwrap_or_default().to_string(),
                    target: network.node(v).unwrap_or_default().to_string(),
                    flow,
                    capacity,
                    label: format!("{}/{}", flow, capacity),
                    is_in_path: path.map_or(false, |p| p.contains_pair(u, v)),
                    saturated: flow == capacity,
                    blocked: capacity == N::ZERO,
                    is_backward_edge: path
                        .map_or(false, |p| p.contains_pair(v, u) && flow.is_positive()),
                }
            })
            .collect();

        GraphSnapshot { nodes, edges }
    }

    fn record(
        &mut self,
        phase: StepPhase,
        state: &ResidualState<N>,
        path: Option<&AugmentingPath>,
        path_flow: N,
        total_flow: N,
        description: String,
    ) -> Step<N> {
        let flows = edge_flows(self.network, state);
        let elements = self.snapshot_with_flows(&flows, path);
        let index = self.next_index;
        self.next_index += 1;

        Step {
            index,
            phase,
            flows,
            path_flow,
            total_flow,
            path: path
                .map(|p| self.network.labels(p.nodes()))
                .unwrap_or_default(),
            description,
            elements,
        }
    }
}
