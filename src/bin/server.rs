//! FlowTrace 服务器入口
//!
//! 启动 HTTP API 服务器

use clap::Parser;
use flowtrace::server::{start_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowtrace-server")]
#[command(about = "FlowTrace 最大流轨迹 HTTP API 服务器")]
struct Args {
    /// 监听地址
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// 监听端口
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// 单个图允许的最大节点数
    #[arg(long, default_value = "64")]
    max_nodes: usize,

    /// 迭代上限（缺省为 2·V·E）
    #[arg(long)]
    max_iterations: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flowtrace=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    println!("FlowTrace - 最大流算法执行轨迹");
    println!("==============================");
    println!("最大节点数: {}", args.max_nodes);
    if let Some(limit) = args.max_iterations {
        println!("迭代上限: {}", limit);
    }

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        max_nodes: args.max_nodes,
        max_iterations: args.max_iterations,
    };

    start_server(config).await?;

    Ok(())
}
