//! 边定义
//!
//! 有向边：起点、终点、容量。平行边按下标独立保存，不合并。

use crate::types::FlowValue;
use serde::{Deserialize, Serialize};

/// 边 ID（输入顺序中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// 流网络中的一条有向边
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge<N> {
    /// 边 ID
    id: EdgeId,
    /// 起点下标
    source: usize,
    /// 终点下标
    target: usize,
    /// 原始容量（一次计算内不变）
    capacity: N,
    /// 展示用标识，平行边追加 `#k`
    key: String,
}

impl<N: FlowValue> FlowEdge<N> {
    /// 创建新边
    pub fn new(id: EdgeId, source: usize, target: usize, capacity: N, key: String) -> Self {
        Self {
            id,
            source,
            target,
            capacity,
            key,
        }
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 起点下标
    pub fn source(&self) -> usize {
        self.source
    }

    /// 终点下标
    pub fn target(&self) -> usize {
        self.target
    }

    /// 原始容量
    pub fn capacity(&self) -> N {
        self.capacity
    }

    /// 展示标识
    pub fn key(&self) -> &str {
        &self.key
    }

    /// 是否为自环
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// 是否连接给定的有序节点对
    pub fn connects(&self, source: usize, target: usize) -> bool {
        self.source == source && self.target == target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_accessors() {
        let edge = FlowEdge::new(EdgeId::new(2), 0, 3, 7i64, "S-T".to_string());
        assert_eq!(edge.id().index(), 2);
        assert_eq!(edge.capacity(), 7);
        assert!(edge.connects(0, 3));
        assert!(!edge.connects(3, 0));
        assert!(!edge.is_self_loop());
    }
}
