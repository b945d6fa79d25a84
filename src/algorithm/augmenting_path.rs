//! 增广路径查找
//!
//! 在残量图上做 BFS，只经过 `residual > 0` 的节点对。
//! BFS 保证找到边数最少的增广路径（Edmonds-Karp 性质），
//! 邻居按节点下标顺序扫描，结果可复现。

use super::residual::ResidualState;
use crate::types::FlowValue;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// 增广路径：从源点到汇点的节点下标序列（含两端）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    nodes: SmallVec<[usize; 8]>,
}

impl AugmentingPath {
    pub fn from_slice(nodes: &[usize]) -> Self {
        Self {
            nodes: SmallVec::from_slice(nodes),
        }
    }

    /// 路径上的节点下标
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// 节点数
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 相邻节点对 (u, v)
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// 有序节点对 (u, v) 是否在路径上相邻出现
    pub fn contains_pair(&self, u: usize, v: usize) -> bool {
        self.pairs().any(|pair| pair == (u, v))
    }

    /// 节点是否在路径上
    pub fn contains(&self, node: usize) -> bool {
        self.nodes.contains(&node)
    }
}

/// BFS 找增广路径
///
/// 每个节点至多入队一次，由首个发现者记为父节点；发现汇点后立即返回。
/// 返回 `None` 表示不存在增广路径，这是主循环的正常终止条件。
pub fn find_augmenting_path<N: FlowValue>(
    state: &ResidualState<N>,
    source: usize,
    sink: usize,
) -> Option<AugmentingPath> {
    let size = state.size();
    if source >= size || sink >= size {
        return None;
    }

    let mut parent: Vec<Option<usize>> = vec![None; size];
    let mut visited = vec![false; size];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    'search: while let Some(u) = queue.pop_front() {
        for v in 0..size {
            if !visited[v] && state.residual(u, v).is_positive() {
                visited[v] = true;
                parent[v] = Some(u);
                if v == sink {
                    break 'search;
                }
                queue.push_back(v);
            }
        }
    }

    if !visited[sink] {
        return None;
    }

    // 从汇点回溯重构路径
    let mut nodes: SmallVec<[usize; 8]> = SmallVec::new();
    let mut current = sink;
    nodes.push(current);
    while let Some(prev) = parent[current] {
        nodes.push(prev);
        current = prev;
    }
    nodes.reverse();

    Some(AugmentingPath { nodes })
}
