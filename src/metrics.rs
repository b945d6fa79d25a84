//! 性能指标收集模块
//!
//! 统计最大流计算的运行次数、增广次数与耗时，并导出为 Prometheus 格式

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 系统全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 计算统计
    run_stats: RunStats,
    /// 轨迹统计
    trace_stats: TraceStats,
    /// 启动时间
    start_time: Instant,
}

/// 计算统计
#[derive(Debug)]
struct RunStats {
    /// 总计算次数
    total_runs: AtomicU64,
    /// 正常完成次数
    completed_runs: AtomicU64,
    /// 输入校验失败次数
    rejected_runs: AtomicU64,
    /// 超过迭代上限次数
    aborted_runs: AtomicU64,
    /// 计算总耗时（微秒）
    total_duration_us: AtomicU64,
}

/// 轨迹统计
#[derive(Debug)]
struct TraceStats {
    /// 增广路径总数
    augmentations: AtomicU64,
    /// 生成的步骤总数
    steps_recorded: AtomicU64,
}

/// 计算结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 正常终止
    Completed,
    /// 输入被拒绝
    Rejected,
    /// 超过迭代上限
    Aborted,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // 计算指标
    pub total_runs: u64,
    pub completed_runs: u64,
    pub rejected_runs: u64,
    pub aborted_runs: u64,
    pub avg_run_duration_ms: f64,

    // 轨迹指标
    pub augmentations: u64,
    pub steps_recorded: u64,

    // 系统指标
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            run_stats: RunStats {
                total_runs: AtomicU64::new(0),
                completed_runs: AtomicU64::new(0),
                rejected_runs: AtomicU64::new(0),
                aborted_runs: AtomicU64::new(0),
                total_duration_us: AtomicU64::new(0),
            },
            trace_stats: TraceStats {
                augmentations: AtomicU64::new(0),
                steps_recorded: AtomicU64::new(0),
            },
            start_time: Instant::now(),
        }
    }

    /// 记录计算开始
    pub fn record_run_start(&self) -> RunTimer {
        self.run_stats.total_runs.fetch_add(1, Ordering::Relaxed);
        RunTimer::new()
    }

    /// 记录计算结束
    pub fn record_run_complete(&self, timer: RunTimer, outcome: RunOutcome) {
        let counter = match outcome {
            RunOutcome::Completed => &self.run_stats.completed_runs,
            RunOutcome::Rejected => &self.run_stats.rejected_runs,
            RunOutcome::Aborted => &self.run_stats.aborted_runs,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        self.run_stats
            .total_duration_us
            .fetch_add(timer.elapsed().as_micros() as u64, Ordering::Relaxed);
    }

    /// 记录一次计算产生的轨迹规模
    pub fn record_trace(&self, augmentations: usize, steps: usize) {
        self.trace_stats
            .augmentations
            .fetch_add(augmentations as u64, Ordering::Relaxed);
        self.trace_stats
            .steps_recorded
            .fetch_add(steps as u64, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_runs = self.run_stats.total_runs.load(Ordering::Relaxed);
        let total_duration_us = self.run_stats.total_duration_us.load(Ordering::Relaxed);

        let avg_run_duration_ms = if total_runs > 0 {
            (total_duration_us as f64) / (total_runs as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_runs,
            completed_runs: self.run_stats.completed_runs.load(Ordering::Relaxed),
            rejected_runs: self.run_stats.rejected_runs.load(Ordering::Relaxed),
            aborted_runs: self.run_stats.aborted_runs.load(Ordering::Relaxed),
            avg_run_duration_ms,
            augmentations: self.trace_stats.augmentations.load(Ordering::Relaxed),
            steps_recorded: self.trace_stats.steps_recorded.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let mut content = String::new();
        let mut metric = |name: &str, kind: &str, help: &str, value: String| {
            content.push_str(&format!("# HELP flowtrace_{} {}\n", name, help));
            content.push_str(&format!("# TYPE flowtrace_{} {}\n", name, kind));
            content.push_str(&format!("flowtrace_{} {}\n", name, value));
        };

        // 计算指标
        metric(
            "runs_total",
            "counter",
            "Total number of max flow computations",
            snapshot.total_runs.to_string(),
        );
        metric(
            "runs_completed_total",
            "counter",
            "Computations that terminated normally",
            snapshot.completed_runs.to_string(),
        );
        metric(
            "runs_rejected_total",
            "counter",
            "Computations rejected by input validation",
            snapshot.rejected_runs.to_string(),
        );
        metric(
            "runs_aborted_total",
            "counter",
            "Computations that exceeded the iteration limit",
            snapshot.aborted_runs.to_string(),
        );
        metric(
            "run_duration_avg_ms",
            "gauge",
            "Average computation duration in milliseconds",
            format!("{:.2}", snapshot.avg_run_duration_ms),
        );

        // 轨迹指标
        metric(
            "augmentations_total",
            "counter",
            "Augmenting paths found",
            snapshot.augmentations.to_string(),
        );
        metric(
            "steps_recorded_total",
            "counter",
            "Trace steps recorded",
            snapshot.steps_recorded.to_string(),
        );

        // 系统指标
        metric(
            "uptime_seconds",
            "counter",
            "System uptime in seconds",
            snapshot.uptime_seconds.to_string(),
        );

        PrometheusMetrics { content }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 计算计时器
pub struct RunTimer {
    start: Instant,
}

impl RunTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        let timer = metrics.record_run_start();
        std::thread::sleep(Duration::from_millis(5));
        metrics.record_run_complete(timer, RunOutcome::Completed);

        let timer = metrics.record_run_start();
        metrics.record_run_complete(timer, RunOutcome::Rejected);

        metrics.record_trace(2, 6);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_runs, 2);
        assert_eq!(snapshot.completed_runs, 1);
        assert_eq!(snapshot.rejected_runs, 1);
        assert_eq!(snapshot.aborted_runs, 0);
        assert_eq!(snapshot.augmentations, 2);
        assert_eq!(snapshot.steps_recorded, 6);
        assert!(snapshot.avg_run_duration_ms >= 2.5);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.record_run_start();
        metrics.record_trace(1, 4);

        let prom = metrics.to_prometheus();
        assert!(prom.content.contains("flowtrace_runs_total 1"));
        assert!(prom.content.contains("# TYPE flowtrace_augmentations_total counter"));
        assert!(prom.content.contains("flowtrace_steps_recorded_total 4"));
    }
}
