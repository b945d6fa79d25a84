//! 图输入模块
//!
//! 支持三种输入格式：
//! - 表单字符串：节点 `S,A,T`，边 `S,A;A,T`，容量 `10,5`
//! - JSON：直接反序列化为 [`GraphInput`]
//! - CSV 边表：`source,target,capacity` 三列，源点/汇点由调用方指定

use crate::error::{Error, Result};
use crate::graph::FlowNetwork;
use crate::types::FlowValue;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// 最大流计算的原始输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInput<N> {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub capacities: Vec<N>,
    pub source: String,
    pub sink: String,
}

impl<N: FlowValue> GraphInput<N> {
    /// 校验并构建流网络
    pub fn to_network(&self) -> Result<FlowNetwork<N>> {
        FlowNetwork::new(
            &self.nodes,
            &self.edges,
            &self.capacities,
            &self.source,
            &self.sink,
        )
    }

    /// 覆盖源点与汇点
    pub fn with_endpoints(mut self, source: Option<&str>, sink: Option<&str>) -> Self {
        if let Some(source) = source {
            self.source = source.to_string();
        }
        if let Some(sink) = sink {
            self.sink = sink.to_string();
        }
        self
    }
}

/// 表单输入（各字段为未解析的字符串）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub nodes: String,
    pub edges: String,
    pub capacities: String,
    pub source: String,
    pub sink: String,
}

impl<N: FlowValue> From<&GraphInput<N>> for FormInput {
    fn from(input: &GraphInput<N>) -> Self {
        Self {
            nodes: input.nodes.join(","),
            edges: input
                .edges
                .iter()
                .map(|(from, to)| format!("{},{}", from, to))
                .collect::<Vec<_>>()
                .join(";"),
            capacities: input
                .capacities
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(","),
            source: input.source.clone(),
            sink: input.sink.clone(),
        }
    }
}

/// 按分隔符切分并去掉空白与空段
fn split_list(raw: &str, sep: char) -> impl Iterator<Item = &str> {
    raw.split(sep).map(str::trim).filter(|s| !s.is_empty())
}

/// 解析表单输入
pub fn parse_form<N: FlowValue>(form: &FormInput) -> Result<GraphInput<N>> {
    let nodes = split_list(&form.nodes, ',').map(str::to_string).collect();

    let edges = split_list(&form.edges, ';')
        .map(|pair| {
            let parts: Vec<&str> = pair.split(',').map(str::trim).collect();
            match parts.as_slice() {
                [from, to] if !from.is_empty() && !to.is_empty() => {
                    Ok((from.to_string(), to.to_string()))
                }
                _ => Err(Error::ParseError(format!(
                    "边格式错误: '{}'，应为 source,target",
                    pair
                ))),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let capacities = split_list(&form.capacities, ',')
        .map(|c| {
            c.parse::<N>()
                .map_err(|_| Error::ParseError(format!("无效的容量: '{}'", c)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(GraphInput {
        nodes,
        edges,
        capacities,
        source: form.source.trim().to_string(),
        sink: form.sink.trim().to_string(),
    })
}

/// 从 `key: value` 行读取表单（文本文件格式）
///
/// 支持的键：`nodes`、`edges`、`capacities`、`source`、`sink`；
/// 空行与 `#` 开头的注释行被忽略。
pub fn read_form<R: BufRead>(reader: R) -> Result<FormInput> {
    let mut form = FormInput::default();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| {
            Error::ParseError(format!("第 {} 行缺少 ':' 分隔符", lineno + 1))
        })?;
        let value = value.trim().to_string();
        match key.trim().to_lowercase().as_str() {
            "nodes" => form.nodes = value,
            "edges" => form.edges = value,
            "capacities" => form.capacities = value,
            "source" => form.source = value,
            "sink" => form.sink = value,
            other => {
                return Err(Error::ParseError(format!(
                    "第 {} 行未知字段: {}",
                    lineno + 1,
                    other
                )))
            }
        }
    }

    Ok(form)
}

/// CSV 边记录
#[derive(Debug, Deserialize)]
struct EdgeRecord<N> {
    source: String,
    target: String,
    capacity: N,
}

/// 解析 CSV 边表
///
/// 节点按首次出现顺序编号；源点或汇点未出现在任何边上时追加到末尾。
pub fn parse_csv<N: FlowValue, R: Read>(
    reader: R,
    source: &str,
    sink: &str,
) -> Result<GraphInput<N>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut nodes: IndexSet<String> = IndexSet::new();
    let mut edges = Vec::new();
    let mut capacities = Vec::new();

    for record in csv_reader.deserialize::<EdgeRecord<N>>() {
        let record = record?;
        nodes.insert(record.source.clone());
        nodes.insert(record.target.clone());
        edges.push((record.source, record.target));
        capacities.push(record.capacity);
    }

    nodes.insert(source.to_string());
    nodes.insert(sink.to_string());

    Ok(GraphInput {
        nodes: nodes.into_iter().collect(),
        edges,
        capacities,
        source: source.to_string(),
        sink: sink.to_string(),
    })
}

/// 按扩展名加载图文件
#[derive(Debug, Default, Clone)]
pub struct GraphImporter {
    source: Option<String>,
    sink: Option<String>,
}

impl GraphImporter {
    /// 创建导入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定源点与汇点（CSV 必需，其它格式用于覆盖文件中的值）
    pub fn with_endpoints(mut self, source: Option<String>, sink: Option<String>) -> Self {
        self.source = source;
        self.sink = sink;
        self
    }

    /// 加载图文件：`.json`、`.csv`，其余按表单文本处理
    pub fn load<N: FlowValue, P: AsRef<Path>>(&self, path: P) -> Result<GraphInput<N>> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let file = File::open(path)?;

        let input: GraphInput<N> = match extension.as_str() {
            "json" => serde_json::from_reader(BufReader::new(file))?,
            "csv" => {
                let (source, sink) = match (&self.source, &self.sink) {
                    (Some(source), Some(sink)) => (source.as_str(), sink.as_str()),
                    _ => {
                        return Err(Error::ImportError(
                            "CSV 边表需要指定源点和汇点".to_string(),
                        ))
                    }
                };
                return parse_csv(file, source, sink);
            }
            _ => parse_form(&read_form(BufReader::new(file))?)?,
        };

        Ok(input.with_endpoints(self.source.as_deref(), self.sink.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::Builder;

    fn form(nodes: &str, edges: &str, capacities: &str) -> FormInput {
        FormInput {
            nodes: nodes.to_string(),
            edges: edges.to_string(),
            capacities: capacities.to_string(),
            source: " S ".to_string(),
            sink: "T".to_string(),
        }
    }

    #[test]
    fn test_parse_form() {
        let input: GraphInput<i64> =
            parse_form(&form("S, A ,T", "S,A; A,T;", "10, 5")).unwrap();

        assert_eq!(input.nodes, vec!["S", "A", "T"]);
        assert_eq!(
            input.edges,
            vec![
                ("S".to_string(), "A".to_string()),
                ("A".to_string(), "T".to_string())
            ]
        );
        assert_eq!(input.capacities, vec![10, 5]);
        assert_eq!(input.source, "S");

        let network = input.to_network().unwrap();
        assert_eq!(network.edge_count(), 2);
    }

    #[test]
    fn test_parse_form_errors() {
        let err = parse_form::<i64>(&form("S,T", "S,T,X", "1")).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));

        let err = parse_form::<i64>(&form("S,T", "S,T", "abc")).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));

        // 解析成功但校验失败：容量数与边数不一致
        let input = parse_form::<i64>(&form("S,T", "S,T", "1,2")).unwrap();
        assert!(matches!(
            input.to_network(),
            Err(Error::CapacityCountMismatch { .. })
        ));
    }

    #[test]
    fn test_form_round_trip() {
        let original: GraphInput<i64> = parse_form(&form("S,A,T", "S,A;A,T", "10,5")).unwrap();
        let reparsed: GraphInput<i64> = parse_form(&FormInput::from(&original)).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_parse_float_capacities() {
        let input: GraphInput<f64> = parse_form(&form("S,T", "S,T", "2.5")).unwrap();
        assert_eq!(input.capacities, vec![2.5]);
    }

    #[test]
    fn test_read_form_text() {
        let text = "# diamond\nnodes: S,A,B,T\nedges: S,A;A,T;S,B;B,T\ncapacities: 1,100,100,1\nsource: S\nsink: T\n";
        let form = read_form(Cursor::new(text)).unwrap();
        let input: GraphInput<i64> = parse_form(&form).unwrap();
        assert_eq!(input.nodes.len(), 4);
        assert_eq!(input.capacities, vec![1, 100, 100, 1]);

        let err = read_form(Cursor::new("colour: red\n")).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn test_parse_csv_node_order() {
        let data = "source,target,capacity\nS,B,4\nB,T,3\nS,A,2\n";
        let input: GraphInput<i64> = parse_csv(Cursor::new(data), "S", "T").unwrap();

        assert_eq!(input.nodes, vec!["S", "B", "T", "A"]);
        assert_eq!(input.capacities, vec![4, 3, 2]);
        assert_eq!(input.to_network().unwrap().node_count(), 4);
    }

    #[test]
    fn test_csv_round_trip() {
        let original = GraphInput {
            nodes: vec!["S".to_string(), "A".to_string(), "T".to_string()],
            edges: vec![
                ("S".to_string(), "A".to_string()),
                ("A".to_string(), "T".to_string()),
                ("S".to_string(), "T".to_string()),
            ],
            capacities: vec![2.5f64, 4.0, 1.0],
            source: "S".to_string(),
            sink: "T".to_string(),
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["source", "target", "capacity"]).unwrap();
        for ((from, to), capacity) in original.edges.iter().zip(&original.capacities) {
            writer
                .write_record([from.as_str(), to.as_str(), &capacity.to_string()])
                .unwrap();
        }
        let bytes = writer.into_inner().unwrap();

        let parsed: GraphInput<f64> = parse_csv(bytes.as_slice(), "S", "T").unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_csv_isolated_sink() {
        let data = "source,target,capacity\nS,A,4\n";
        let input: GraphInput<i64> = parse_csv(Cursor::new(data), "S", "T").unwrap();
        assert_eq!(input.nodes, vec!["S", "A", "T"]);
    }

    #[test]
    fn test_import_json_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"nodes":["S","T"],"edges":[["S","T"]],"capacities":[5],"source":"S","sink":"T"}}"#
        )
        .unwrap();

        let input: GraphInput<i64> = GraphImporter::new().load(file.path()).unwrap();
        assert_eq!(input.capacities, vec![5]);
        assert_eq!(input.sink, "T");
    }

    #[test]
    fn test_import_csv_file_requires_endpoints() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "source,target,capacity").unwrap();
        writeln!(file, "S,T,5").unwrap();

        let err = GraphImporter::new()
            .load::<i64, _>(file.path())
            .unwrap_err();
        assert!(matches!(err, Error::ImportError(_)));

        let input: GraphInput<i64> = GraphImporter::new()
            .with_endpoints(Some("S".into()), Some("T".into()))
            .load(file.path())
            .unwrap();
        assert_eq!(input.edges.len(), 1);
    }

    #[test]
    fn test_import_form_file_with_override() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "nodes: S,A,T").unwrap();
        writeln!(file, "edges: S,A;A,T").unwrap();
        writeln!(file, "capacities: 3,4").unwrap();
        writeln!(file, "source: S").unwrap();
        writeln!(file, "sink: T").unwrap();

        let input: GraphInput<i64> = GraphImporter::new()
            .with_endpoints(None, Some("A".into()))
            .load(file.path())
            .unwrap();
        assert_eq!(input.source, "S");
        assert_eq!(input.sink, "A");
    }

    #[test]
    fn test_missing_file() {
        let err = GraphImporter::new()
            .load::<i64, _>("/nonexistent/graph.json")
            .unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
