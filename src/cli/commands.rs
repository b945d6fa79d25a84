//! 交互命令处理
//!
//! 会话保存表单输入与最近一次的计算结果，`next`/`step` 在已记录的轨迹上回放

use super::printer::{PrintMode, Printer};
use crate::algorithm::{EdmondsKarp, MaxFlowResult};
use crate::import::{parse_form, FormInput, GraphImporter, GraphInput};
use tracing::debug;

/// 命令执行结果
#[derive(Debug)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 交互会话
pub struct Session {
    form: FormInput,
    printer: Printer,
    result: Option<MaxFlowResult<f64>>,
    /// 下一个要显示的步骤
    cursor: usize,
    max_iterations: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(FormInput::default(), PrintMode::Table)
    }
}

impl Session {
    pub fn new(form: FormInput, mode: PrintMode) -> Self {
        Self {
            form,
            printer: Printer::new(mode),
            result: None,
            cursor: 0,
            max_iterations: None,
        }
    }

    /// 设置迭代上限
    pub fn with_max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn result(&self) -> Option<&MaxFlowResult<f64>> {
        self.result.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 解析并执行一行命令
    pub fn execute(&mut self, input: &str) -> CommandResult {
        let input = input.trim();
        let parts: Vec<&str> = input.splitn(2, char::is_whitespace).collect();
        let cmd = parts[0].to_lowercase();
        let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "" => CommandResult::Continue,

            "help" | "h" | "?" => CommandResult::Message(Printer::print_help()),

            "quit" | "exit" | "q" => CommandResult::Exit,

            "nodes" => self.set_field(|form| &mut form.nodes, args, "nodes"),
            "edges" => self.set_field(|form| &mut form.edges, args, "edges"),
            "capacities" | "caps" => {
                self.set_field(|form| &mut form.capacities, args, "capacities")
            }
            "source" => self.set_field(|form| &mut form.source, args, "source"),
            "sink" => self.set_field(|form| &mut form.sink, args, "sink"),

            "show" => match parse_form::<f64>(&self.form) {
                Ok(input) => CommandResult::Message(self.printer.print_input(&input)),
                Err(e) => CommandResult::Error(e.to_string()),
            },

            "load" => {
                if args.is_empty() {
                    return CommandResult::Error("用法: load <文件>".to_string());
                }
                let importer = GraphImporter::new().with_endpoints(
                    non_empty(&self.form.source),
                    non_empty(&self.form.sink),
                );
                match importer.load::<f64, _>(args) {
                    Ok(input) => {
                        self.replace_input(&input);
                        CommandResult::Message(format!(
                            "已加载 {} 个节点, {} 条边",
                            input.nodes.len(),
                            input.edges.len()
                        ))
                    }
                    Err(e) => CommandResult::Error(e.to_string()),
                }
            }

            "run" => self.run(),

            "next" | "n" => {
                let cursor = self.cursor;
                self.show_step(cursor)
            }

            "step" => match args.parse::<usize>() {
                Ok(k) => self.show_step(k),
                Err(_) => CommandResult::Error("用法: step <序号>".to_string()),
            },

            "reset" => {
                self.result = None;
                self.cursor = 0;
                CommandResult::Message("已重置".to_string())
            }

            "mode" => match args.parse::<PrintMode>() {
                Ok(mode) => {
                    self.printer.set_mode(mode);
                    CommandResult::Message(format!("显示模式: {:?}", mode))
                }
                Err(e) => CommandResult::Error(e),
            },

            _ => CommandResult::Error(format!("未知命令: {}。输入 'help' 查看帮助。", cmd)),
        }
    }

    fn set_field(
        &mut self,
        field: impl FnOnce(&mut FormInput) -> &mut String,
        value: &str,
        name: &str,
    ) -> CommandResult {
        *field(&mut self.form) = value.to_string();
        self.result = None;
        self.cursor = 0;
        CommandResult::Message(format!("{} = {}", name, value))
    }

    fn replace_input(&mut self, input: &GraphInput<f64>) {
        self.form = FormInput::from(input);
        self.result = None;
        self.cursor = 0;
    }

    fn run(&mut self) -> CommandResult {
        let input = match parse_form::<f64>(&self.form) {
            Ok(input) => input,
            Err(e) => return CommandResult::Error(e.to_string()),
        };
        let network = match input.to_network() {
            Ok(network) => network,
            Err(e) => return CommandResult::Error(e.to_string()),
        };

        let mut algo = EdmondsKarp::new(&network);
        if let Some(limit) = self.max_iterations {
            algo = algo.with_iteration_limit(limit);
        }

        let (result, warning) = match algo.run() {
            Ok(result) => (result, None),
            Err(e) => {
                let message = e.to_string();
                match e.partial() {
                    Some(partial) => (partial.clone(), Some(message)),
                    None => return CommandResult::Error(message),
                }
            }
        };

        debug!(steps = result.steps.len(), "session run finished");
        let mut output = self.printer.print_result(&result);
        if let Some(warning) = warning {
            output.push_str(&format!("警告: {}\n", warning));
        }
        self.result = Some(result);
        self.cursor = 0;
        CommandResult::Message(output)
    }

    fn show_step(&mut self, index: usize) -> CommandResult {
        let Some(result) = self.result.as_ref() else {
            return CommandResult::Error("尚未计算，请先执行 run".to_string());
        };
        match result.steps.get(index) {
            Some(step) => {
                self.cursor = index + 1;
                CommandResult::Message(self.printer.print_step(step))
            }
            None if index == result.steps.len() => {
                CommandResult::Message("已到达最后一步".to_string())
            }
            None => CommandResult::Error(format!(
                "步骤 {} 不存在（共 {} 步）",
                index,
                result.steps.len()
            )),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
