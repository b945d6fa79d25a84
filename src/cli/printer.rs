//! 结果打印器
//!
//! 提供表格和垂直格式的步骤与结果输出

use crate::algorithm::{GraphSnapshot, MaxFlowResult, MinCut, Step, StepPhase};
use crate::import::GraphInput;
use crate::types::FlowValue;
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

impl std::str::FromStr for PrintMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "t" => Ok(PrintMode::Table),
            "vertical" | "v" => Ok(PrintMode::Vertical),
            other => Err(format!("未知的显示模式: {}", other)),
        }
    }
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

const EDGE_COLUMNS: [&str; 6] = ["Edge", "Flow/Cap", "InPath", "Saturated", "Blocked", "Backward"];

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> PrintMode {
        self.mode
    }

    /// 打印单个步骤：标题行加边状态表
    pub fn print_step<N: FlowValue>(&self, step: &Step<N>) -> String {
        let phase = match step.phase {
            StepPhase::Initial => "INITIAL".cyan(),
            StepPhase::PathFound => "PATH".yellow(),
            StepPhase::FlowUpdated => "UPDATE".green(),
            StepPhase::Final => "FINAL".magenta(),
        };
        let mut output = format!(
            "{} {} {}\n",
            format!("[#{}]", step.index).bold(),
            phase.bold(),
            step.description
        );
        if step.is_augmenting() {
            output.push_str(&format!(
                "  path: {}  bottleneck: {}\n",
                step.path.join(" → "),
                step.path_flow
            ));
        }
        output.push_str(&format!("  total flow: {}\n", step.total_flow));
        output.push_str(&self.print_snapshot(&step.elements));
        output
    }

    /// 打印图快照中的边状态
    pub fn print_snapshot<N: FlowValue>(&self, snapshot: &GraphSnapshot<N>) -> String {
        let columns: Vec<String> = EDGE_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows: Vec<Vec<String>> = snapshot
            .edges
            .iter()
            .map(|edge| {
                vec![
                    format!("{} → {}", edge.source, edge.target),
                    edge.label.clone(),
                    flag(edge.is_in_path),
                    flag(edge.saturated),
                    flag(edge.blocked),
                    flag(edge.is_backward_edge),
                ]
            })
            .collect();

        if rows.is_empty() {
            return "Empty set\n".to_string();
        }

        match self.mode {
            PrintMode::Table => self.format_table(&columns, &rows),
            PrintMode::Vertical => self.format_vertical(&columns, &rows),
        }
    }

    /// 打印计算摘要
    pub fn print_summary<N: FlowValue>(
        &self,
        max_flow: N,
        iterations: usize,
        min_cut: Option<&MinCut<N>>,
        snapshot: &GraphSnapshot<N>,
    ) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Max Flow", max_flow.to_string()]);
        table.add_row(row!["Iterations", iterations.to_string()]);

        if let Some(cut) = min_cut {
            table.add_row(row!["Min Cut Capacity", cut.capacity.to_string()]);
            table.add_row(row!["Source Side", cut.source_side.join(", ")]);
            let cut_edges: Vec<String> = cut
                .edges
                .iter()
                .filter_map(|&i| snapshot.edge(i))
                .map(|edge| format!("{}→{}", edge.source, edge.target))
                .collect();
            table.add_row(row!["Cut Edges", cut_edges.join(", ")]);
        }

        table.to_string()
    }

    /// 打印完整结果摘要（不含逐步轨迹）
    pub fn print_result<N: FlowValue>(&self, result: &MaxFlowResult<N>) -> String {
        let mut output = String::new();
        if !result.is_final {
            output.push_str(&format!("{}\n", "计算未完成：超过迭代上限".red()));
        }
        for (i, path) in result.paths().iter().enumerate() {
            output.push_str(&format!("  {}: {}\n", i + 1, path.join(" → ")));
        }
        output.push_str(&self.print_snapshot(&result.final_graph));
        output.push_str(&self.print_summary(
            result.max_flow,
            result.iterations,
            result.min_cut.as_ref(),
            &result.final_graph,
        ));
        output.push_str(&format!("{} step(s) recorded\n", result.steps.len()));
        output
    }

    /// 打印输入图
    pub fn print_input<N: FlowValue>(&self, input: &GraphInput<N>) -> String {
        let mut output = format!(
            "nodes: {}\nsource: {}  sink: {}\n",
            input.nodes.join(", "),
            input.source,
            input.sink
        );

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Source", "Target", "Capacity"]);
        for (i, (u, v)) in input.edges.iter().enumerate() {
            let capacity = input
                .capacities
                .get(i)
                .map(|c| c.to_string())
                .unwrap_or_else(|| "?".to_string());
            table.add_row(row![u, v, capacity]);
        }
        output.push_str(&table.to_string());
        output
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. edge ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   FlowTrace CLI 命令帮助
═══════════════════════════════════════════════════════════════

输入命令:
  nodes <列表>         设置节点，逗号分隔
                       示例: nodes S, A, B, T
  edges <列表>         设置边，分号分隔，每条边 "起点,终点"
                       示例: edges S,A; A,T; S,B; B,T
  capacities <列表>    设置容量，逗号分隔，与边一一对应
                       示例: capacities 3, 2, 2, 3
  source <节点>        设置源点
  sink <节点>          设置汇点
  load <文件>          从 .json / .csv / 表单文本加载图
  show                 显示当前输入

计算与回放:
  run                  计算最大流并显示结果摘要
  next, n              显示下一个步骤
  step <k>             跳转到第 k 个步骤
  reset                清除计算结果，回到第 0 步

其它:
  mode table|vertical  切换边表显示模式
  help, h, ?           显示帮助
  quit, exit, q        退出程序

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

fn flag(value: bool) -> String {
    let text = if value { "yes" } else { "-" };
    text.to_string()
}
