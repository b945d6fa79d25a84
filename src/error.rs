//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // ==================== 输入校验 ====================
    #[error("边 {edge} 引用了不存在的节点: {node}")]
    UnknownNode { edge: usize, node: String },

    #[error("边数与容量数不一致: {edges} 条边, {capacities} 个容量")]
    CapacityCountMismatch { edges: usize, capacities: usize },

    #[error("边 {edge} 的容量无效: {capacity}")]
    InvalidCapacity { edge: usize, capacity: String },

    #[error("源点不存在: {0}")]
    SourceNotFound(String),

    #[error("汇点不存在: {0}")]
    SinkNotFound(String),

    #[error("源点与汇点相同: {0}")]
    SourceIsSink(String),

    #[error("节点重复: {0}")]
    DuplicateNode(String),

    #[error("节点 ID 不能为空 (位置 {0})")]
    EmptyNodeId(usize),

    #[error("容量总和超出数值范围 (第 {edge} 条边处溢出)")]
    CapacityOverflow { edge: usize },

    #[error("图规模过大: {nodes} 个节点, 上限 {limit}")]
    GraphTooLarge { nodes: usize, limit: usize },

    // ==================== 输入输出 ====================
    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),

    #[error("服务器错误: {0}")]
    ServerError(String),

    // ==================== 算法内部错误 ====================
    #[error("增广路径无效: {0}")]
    MalformedPath(String),

    #[error("迭代次数超过上限 {limit}, 已累计流量 {flow} (结果不完整)")]
    IterationLimitExceeded { limit: usize, flow: String },
}

impl Error {
    /// 是否为输入校验错误（调用方可修正输入后重试）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::UnknownNode { .. }
                | Error::CapacityCountMismatch { .. }
                | Error::InvalidCapacity { .. }
                | Error::CapacityOverflow { .. }
                | Error::SourceNotFound(_)
                | Error::SinkNotFound(_)
                | Error::SourceIsSink(_)
                | Error::DuplicateNode(_)
                | Error::EmptyNodeId(_)
                | Error::GraphTooLarge { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::ImportError(e.to_string())
    }
}
