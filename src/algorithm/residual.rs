//! 残量状态与流量更新
//!
//! 两个 n×n 矩阵：`flow[u][v]` 为净流量（反对称），
//! `residual[u][v]` 为剩余可推送量（含先前正向流量产生的反向残量）。

use super::augmenting_path::AugmentingPath;
use crate::error::{Error, Result};
use crate::graph::FlowNetwork;
use crate::types::FlowValue;

/// 一次计算独占的残量状态
#[derive(Debug, Clone)]
pub struct ResidualState<N> {
    size: usize,
    flow: Vec<Vec<N>>,
    residual: Vec<Vec<N>>,
}

impl<N: FlowValue> ResidualState<N> {
    /// 由流网络构建残量矩阵，平行边容量按有序节点对累加
    pub fn from_network(network: &FlowNetwork<N>) -> Self {
        let size = network.node_count();
        let mut residual = vec![vec![N::ZERO; size]; size];
        for edge in network.edges() {
            residual[edge.source()][edge.target()] += edge.capacity();
        }

        Self {
            size,
            flow: vec![vec![N::ZERO; size]; size],
            residual,
        }
    }

    /// 节点数
    pub fn size(&self) -> usize {
        self.size
    }

    /// u→v 的剩余可推送量
    pub fn residual(&self, u: usize, v: usize) -> N {
        self.residual[u][v]
    }

    /// u→v 的净流量
    pub fn flow(&self, u: usize, v: usize) -> N {
        self.flow[u][v]
    }

    /// 路径上的瓶颈值（相邻节点对残量的最小值）
    pub fn bottleneck(&self, path: &AugmentingPath) -> Result<N> {
        self.validate(path)?;

        let mut pairs = path.pairs();
        let (u, v) = pairs
            .next()
            .ok_or_else(|| Error::MalformedPath("路径少于两个节点".to_string()))?;
        let mut bottleneck = self.residual[u][v];
        for (u, v) in pairs {
            bottleneck = bottleneck.min_of(self.residual[u][v]);
        }

        Ok(bottleneck)
    }

    /// 沿路径推送 `amount`：正向残量减少，反向残量增加
    pub fn augment(&mut self, path: &AugmentingPath, amount: N) -> Result<()> {
        self.validate(path)?;

        for (u, v) in path.pairs() {
            if self.residual[u][v] < amount {
                return Err(Error::MalformedPath(format!(
                    "{}→{} 残量 {} 小于推送量 {}",
                    u, v, self.residual[u][v], amount
                )));
            }
        }

        for (u, v) in path.pairs() {
            self.flow[u][v] += amount;
            self.flow[v][u] -= amount;
            self.residual[u][v] -= amount;
            self.residual[v][u] += amount;
        }

        Ok(())
    }

    /// 计算瓶颈并沿路径推送，返回推送量
    pub fn push_path(&mut self, path: &AugmentingPath) -> Result<N> {
        let bottleneck = self.bottleneck(path)?;
        self.augment(path, bottleneck)?;
        Ok(bottleneck)
    }

    /// 从源点出发沿正残量可达的节点
    pub fn reachable_from(&self, start: usize) -> Vec<bool> {
        let mut visited = vec![false; self.size];
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(u) = stack.pop() {
            for v in 0..self.size {
                if !visited[v] && self.residual[u][v].is_positive() {
                    visited[v] = true;
                    stack.push(v);
                }
            }
        }

        visited
    }

    fn validate(&self, path: &AugmentingPath) -> Result<()> {
        if path.len() < 2 {
            return Err(Error::MalformedPath(format!(
                "路径只有 {} 个节点",
                path.len()
            )));
        }
        if let Some(&bad) = path.nodes().iter().find(|&&i| i >= self.size) {
            return Err(Error::MalformedPath(format!(
                "节点下标 {} 超出范围 {}",
                bad, self.size
            )));
        }
        for (u, v) in path.pairs() {
            if !self.residual[u][v].is_positive() {
                return Err(Error::MalformedPath(format!("{}→{} 无剩余容量", u, v)));
            }
        }
        Ok(())
    }
}
