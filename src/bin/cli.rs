//! FlowTrace CLI 工具
//!
//! 单次计算并逐步打印轨迹，或进入交互模式逐步回放

use anyhow::Context;
use clap::{Parser, ValueEnum};
use flowtrace::cli::{CommandResult, PrintMode, Printer, Session};
use flowtrace::import::{parse_form, FormInput, GraphImporter, GraphInput};
use flowtrace::{EdmondsKarp, FlowNetwork};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Vertical,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "flowtrace-cli")]
#[command(about = "FlowTrace 命令行工具")]
struct Args {
    /// 图文件（.json、.csv 或表单文本）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 节点列表，逗号分隔
    #[arg(long)]
    nodes: Option<String>,

    /// 边列表，分号分隔，每条边 "起点,终点"
    #[arg(long)]
    edges: Option<String>,

    /// 容量列表，逗号分隔
    #[arg(long)]
    capacities: Option<String>,

    /// 源点
    #[arg(short, long)]
    source: Option<String>,

    /// 汇点
    #[arg(short = 't', long)]
    sink: Option<String>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// 迭代上限（缺省为 2·V·E）
    #[arg(long)]
    max_iterations: Option<usize>,

    /// 进入交互模式
    #[arg(long)]
    interactive: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn has_graph(&self) -> bool {
        self.input.is_some() || self.nodes.is_some() || self.edges.is_some()
    }

    fn load_input(&self) -> anyhow::Result<GraphInput<f64>> {
        if let Some(path) = &self.input {
            let input = GraphImporter::new()
                .with_endpoints(self.source.clone(), self.sink.clone())
                .load(path)
                .with_context(|| format!("无法加载图文件 {}", path.display()))?;
            return Ok(input.with_endpoints(self.source.as_deref(), self.sink.as_deref()));
        }

        let input = parse_form(&self.form())?;
        Ok(input)
    }

    fn form(&self) -> FormInput {
        FormInput {
            nodes: self.nodes.clone().unwrap_or_default(),
            edges: self.edges.clone().unwrap_or_default(),
            capacities: self.capacities.clone().unwrap_or_default(),
            source: self.source.clone().unwrap_or_default(),
            sink: self.sink.clone().unwrap_or_default(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "flowtrace=debug" } else { "flowtrace=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mode = match args.format {
        OutputFormat::Vertical => PrintMode::Vertical,
        _ => PrintMode::Table,
    };

    if args.interactive || !args.has_graph() {
        let form = if args.has_graph() {
            FormInput::from(&args.load_input()?)
        } else {
            args.form()
        };
        let session = Session::new(form, mode).with_max_iterations(args.max_iterations);
        return interactive(session);
    }

    let input = args.load_input()?;
    let network = input.to_network()?;

    match args.format {
        OutputFormat::Json => print_json(&network, args.max_iterations),
        _ => print_steps(&network, Printer::new(mode), args.max_iterations),
    }
}

fn algorithm(network: &FlowNetwork<f64>, limit: Option<usize>) -> EdmondsKarp<'_, f64> {
    let algo = EdmondsKarp::new(network);
    match limit {
        Some(limit) => algo.with_iteration_limit(limit),
        None => algo,
    }
}

/// 边计算边打印每个步骤
fn print_steps(
    network: &FlowNetwork<f64>,
    printer: Printer,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let mut run = algorithm(network, limit).steps();
    let mut last = None;
    let mut outcome = Ok(());

    for step in run.by_ref() {
        match step {
            Ok(step) => {
                println!("{}", printer.print_step(&step));
                last = Some(step);
            }
            Err(e) => {
                outcome = Err(e);
                break;
            }
        }
    }

    if let Some(step) = last {
        let min_cut = run.min_cut();
        println!(
            "{}",
            printer.print_summary(
                run.total_flow(),
                run.iterations(),
                min_cut.as_ref(),
                &step.elements
            )
        );
    }
    outcome.map_err(Into::into)
}

/// 输出完整结果 JSON；超过迭代上限时仍输出部分结果
fn print_json(network: &FlowNetwork<f64>, limit: Option<usize>) -> anyhow::Result<()> {
    match algorithm(network, limit).run() {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            if let Some(partial) = e.partial() {
                println!("{}", serde_json::to_string_pretty(partial)?);
            }
            Err(flowtrace::Error::from(e).into())
        }
    }
}

fn interactive(mut session: Session) -> anyhow::Result<()> {
    println!("FlowTrace CLI - 最大流算法执行轨迹");
    println!("==================================");
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let stdin = io::stdin();
    loop {
        print!("flowtrace> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match session.execute(&line) {
            CommandResult::Continue => {}
            CommandResult::Exit => break,
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Error(e) => println!("错误: {}", e),
        }
    }

    println!("再见！");
    Ok(())
}
