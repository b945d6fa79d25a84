//! 流网络
//!
//! 一次最大流计算的只读输入：节点、有向边、容量、源点与汇点。
//! 构造时完成全部校验，之后不可变。

use super::edge::{EdgeId, FlowEdge};
use crate::error::{Error, Result};
use crate::types::FlowValue;
use indexmap::IndexSet;
use std::collections::HashMap;

/// 已校验的流网络
#[derive(Debug, Clone)]
pub struct FlowNetwork<N> {
    /// 节点（插入顺序即矩阵下标）
    nodes: IndexSet<String>,
    /// 边（输入顺序）
    edges: Vec<FlowEdge<N>>,
    /// 源点下标
    source: usize,
    /// 汇点下标
    sink: usize,
}

impl<N: FlowValue> FlowNetwork<N> {
    /// 从原始输入构建并校验流网络
    ///
    /// 以下情况返回校验错误，不会产生任何部分结果：
    /// 节点为空串或重复、边数与容量数不一致、边引用了不存在的节点、
    /// 容量为负（或非有限值）、容量总和溢出、源点/汇点不存在、源点等于汇点。
    ///
    /// 任何流量、残量与割容量都不超过容量总和，因此总和不溢出时计算过程也不会溢出。
    pub fn new<S, E>(
        nodes: &[S],
        edges: &[(E, E)],
        capacities: &[N],
        source: &str,
        sink: &str,
    ) -> Result<Self>
    where
        S: AsRef<str>,
        E: AsRef<str>,
    {
        let mut node_set = IndexSet::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            let node = node.as_ref();
            if node.is_empty() {
                return Err(Error::EmptyNodeId(position));
            }
            if !node_set.insert(node.to_string()) {
                return Err(Error::DuplicateNode(node.to_string()));
            }
        }

        if edges.len() != capacities.len() {
            return Err(Error::CapacityCountMismatch {
                edges: edges.len(),
                capacities: capacities.len(),
            });
        }

        let mut parallel: HashMap<(usize, usize), usize> = HashMap::new();
        let mut flow_edges = Vec::with_capacity(edges.len());
        let mut total = N::ZERO;
        for (index, ((from, to), &capacity)) in edges.iter().zip(capacities).enumerate() {
            let (from, to) = (from.as_ref(), to.as_ref());
            let u = node_set.get_index_of(from).ok_or_else(|| Error::UnknownNode {
                edge: index,
                node: from.to_string(),
            })?;
            let v = node_set.get_index_of(to).ok_or_else(|| Error::UnknownNode {
                edge: index,
                node: to.to_string(),
            })?;
            if !capacity.is_valid_capacity() {
                return Err(Error::InvalidCapacity {
                    edge: index,
                    capacity: capacity.to_string(),
                });
            }
            total = total
                .checked_add(capacity)
                .ok_or(Error::CapacityOverflow { edge: index })?;

            let seen = parallel.entry((u, v)).or_insert(0);
            let key = if *seen == 0 {
                format!("{}-{}", from, to)
            } else {
                format!("{}-{}#{}", from, to, seen)
            };
            *seen += 1;

            flow_edges.push(FlowEdge::new(EdgeId::new(index), u, v, capacity, key));
        }

        let source_idx = node_set
            .get_index_of(source)
            .ok_or_else(|| Error::SourceNotFound(source.to_string()))?;
        let sink_idx = node_set
            .get_index_of(sink)
            .ok_or_else(|| Error::SinkNotFound(sink.to_string()))?;
        if source_idx == sink_idx {
            return Err(Error::SourceIsSink(source.to_string()));
        }

        Ok(Self {
            nodes: node_set,
            edges: flow_edges,
            source: source_idx,
            sink: sink_idx,
        })
    }

    /// 检查节点数是否超过上限（矩阵为 n×n，仅面向可视化规模）
    pub fn ensure_node_limit(&self, limit: usize) -> Result<()> {
        if self.nodes.len() > limit {
            return Err(Error::GraphTooLarge {
                nodes: self.nodes.len(),
                limit,
            });
        }
        Ok(())
    }

    /// 节点数
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 边数
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 按下标获取节点 ID
    pub fn node(&self, index: usize) -> Option<&str> {
        self.nodes.get_index(index).map(String::as_str)
    }

    /// 节点 ID 对应的下标
    pub fn index_of(&self, node: &str) -> Option<usize> {
        self.nodes.get_index_of(node)
    }

    /// 按插入顺序遍历节点
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// 所有边
    pub fn edges(&self) -> &[FlowEdge<N>] {
        &self.edges
    }

    /// 源点下标
    pub fn source(&self) -> usize {
        self.source
    }

    /// 汇点下标
    pub fn sink(&self) -> usize {
        self.sink
    }

    /// 源点 ID
    pub fn source_id(&self) -> &str {
        self.nodes[self.source].as_str()
    }

    /// 汇点 ID
    pub fn sink_id(&self) -> &str {
        self.nodes[self.sink].as_str()
    }

    /// 把下标序列转换为节点 ID 序列
    pub fn labels(&self, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .filter_map(|&i| self.node(i))
            .map(str::to_string)
            .collect()
    }
}
