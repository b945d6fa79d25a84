//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson），
//! 并逐步记录执行轨迹用于动画演示。
//!
//! 状态机：`INIT → SEARCHING → (FOUND_PATH → UPDATING → SEARCHING)* → TERMINATED`

use super::augmenting_path::{find_augmenting_path, AugmentingPath};
use super::min_cut::MinCut;
use super::residual::ResidualState;
use super::trace::{GraphSnapshot, Step, TraceRecorder};
use crate::error::Error;
use crate::graph::FlowNetwork;
use crate::types::FlowValue;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

/// 最大流结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxFlowResult<N> {
    /// 最大流量值
    pub max_flow: N,
    /// 执行轨迹（首个为初始状态，最后一个为终止状态）
    pub steps: Vec<Step<N>>,
    /// 最终图快照
    pub final_graph: GraphSnapshot<N>,
    /// 找到的增广路径数
    pub iterations: usize,
    /// 是否为完整结果（超过迭代上限时为 false）
    pub is_final: bool,
    /// 最小割（仅完整结果）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cut: Option<MinCut<N>>,
}

impl<N: FlowValue> MaxFlowResult<N> {
    fn assemble(
        steps: Vec<Step<N>>,
        max_flow: N,
        iterations: usize,
        is_final: bool,
        min_cut: Option<MinCut<N>>,
    ) -> Self {
        let final_graph = steps
            .last()
            .map(|step| step.elements.clone())
            .unwrap_or(GraphSnapshot {
                nodes: Vec::new(),
                edges: Vec::new(),
            });

        Self {
            max_flow,
            steps,
            final_graph,
            iterations,
            is_final,
            min_cut,
        }
    }

    /// 增广步骤（找到路径的步骤）
    pub fn augmenting_steps(&self) -> impl Iterator<Item = &Step<N>> {
        self.steps.iter().filter(|step| step.is_augmenting())
    }

    /// 按顺序排列的增广路径
    pub fn paths(&self) -> Vec<Vec<String>> {
        self.augmenting_steps().map(|step| step.path.clone()).collect()
    }
}

/// 一次计算的失败结果
#[derive(ThisError, Debug)]
pub enum RunError<N: FlowValue> {
    /// 输入校验失败或内部错误，未产生结果
    #[error(transparent)]
    Failed(#[from] Error),

    /// 超过迭代上限；携带已累计的部分结果（`is_final == false`）
    #[error("迭代次数超过上限 {limit} (结果不完整)")]
    IterationLimitExceeded {
        limit: usize,
        partial: Box<MaxFlowResult<N>>,
    },
}

impl<N: FlowValue> RunError<N> {
    /// 部分结果（仅超过迭代上限时存在）
    pub fn partial(&self) -> Option<&MaxFlowResult<N>> {
        match self {
            RunError::IterationLimitExceeded { partial, .. } => Some(&**partial),
            RunError::Failed(_) => None,
        }
    }
}

impl<N: FlowValue> From<RunError<N>> for Error {
    fn from(e: RunError<N>) -> Self {
        match e {
            RunError::Failed(e) => e,
            RunError::IterationLimitExceeded { limit, partial } => Error::IterationLimitExceeded {
                limit,
                flow: partial.max_flow.to_string(),
            },
        }
    }
}

/// 默认迭代上限：Edmonds-Karp 的阶段数上界 O(|V|·|E|)，
/// 残量图边数按原始边数的两倍计
pub fn default_iteration_limit(node_count: usize, edge_count: usize) -> usize {
    node_count
        .saturating_mul(edge_count)
        .saturating_mul(2)
        .max(1)
}

/// Edmonds-Karp 最大流算法
pub struct EdmondsKarp<'a, N> {
    network: &'a FlowNetwork<N>,
    iteration_limit: usize,
}

impl<'a, N: FlowValue> EdmondsKarp<'a, N> {
    /// 创建算法实例
    pub fn new(network: &'a FlowNetwork<N>) -> Self {
        Self {
            network,
            iteration_limit: default_iteration_limit(network.node_count(), network.edge_count()),
        }
    }

    /// 设置迭代上限
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = limit;
        self
    }

    /// 逐步执行（每次产出一个步骤）
    pub fn steps(&self) -> FlowRun<'a, N> {
        FlowRun::new(self.network, self.iteration_limit)
    }

    /// 执行到终止，返回完整结果
    pub fn run(&self) -> Result<MaxFlowResult<N>, RunError<N>> {
        let mut run = self.steps();
        let mut steps = Vec::new();

        loop {
            match run.next_step() {
                Ok(Some(step)) => steps.push(step),
                Ok(None) => break,
                Err(Error::IterationLimitExceeded { limit, flow }) => {
                    warn!(
                        limit,
                        flow = %flow,
                        source = self.network.source_id(),
                        sink = self.network.sink_id(),
                        "max flow iteration limit exceeded"
                    );
                    let partial = MaxFlowResult::assemble(
                        steps,
                        run.total_flow(),
                        run.iterations(),
                        false,
                        None,
                    );
                    return Err(RunError::IterationLimitExceeded {
                        limit,
                        partial: Box::new(partial),
                    });
                }
                Err(e) => return Err(RunError::Failed(e)),
            }
        }

        info!(
            source = self.network.source_id(),
            sink = self.network.sink_id(),
            max_flow = %run.total_flow(),
            iterations = run.iterations(),
            steps = steps.len(),
            "max flow computed"
        );

        let min_cut = run.min_cut();
        Ok(MaxFlowResult::assemble(
            steps,
            run.total_flow(),
            run.iterations(),
            true,
            min_cut,
        ))
    }
}

/// 计算最大流（入口函数）
///
/// 先校验输入，再以默认迭代上限执行 Edmonds-Karp。
pub fn compute_max_flow<N, S, E>(
    nodes: &[S],
    edges: &[(E, E)],
    capacities: &[N],
    source: &str,
    sink: &str,
) -> Result<MaxFlowResult<N>, RunError<N>>
where
    N: FlowValue,
    S: AsRef<str>,
    E: AsRef<str>,
{
    let network = FlowNetwork::new(nodes, edges, capacities, source, sink)?;
    EdmondsKarp::new(&network).run()
}

enum Phase<N> {
    Init,
    Searching,
    Updating { path: AugmentingPath, bottleneck: N },
    Done,
    Failed,
}

/// 逐步执行的一次计算
///
/// 独占自己的残量状态；步骤严格按生成顺序产出。
/// 超过迭代上限后返回一次错误，之后不再产出。
pub struct FlowRun<'a, N> {
    network: &'a FlowNetwork<N>,
    state: ResidualState<N>,
    recorder: TraceRecorder<'a, N>,
    phase: Phase<N>,
    total_flow: N,
    iterations: usize,
    iteration_limit: usize,
}

impl<'a, N: FlowValue> FlowRun<'a, N> {
    fn new(network: &'a FlowNetwork<N>, iteration_limit: usize) -> Self {
        Self {
            network,
            state: ResidualState::from_network(network),
            recorder: TraceRecorder::new(network),
            phase: Phase::Init,
            total_flow: N::ZERO,
            iterations: 0,
            iteration_limit,
        }
    }

    /// 累计流量
    pub fn total_flow(&self) -> N {
        self.total_flow
    }

    /// 已找到的增广路径数
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// 已产出的步骤数
    pub fn steps_emitted(&self) -> usize {
        self.recorder.recorded()
    }

    /// 是否已结束（终止或失败）
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done | Phase::Failed)
    }

    /// 当前残量状态（只读）
    pub fn residual_state(&self) -> &ResidualState<N> {
        &self.state
    }

    /// 最小割，仅在正常终止后可用
    pub fn min_cut(&self) -> Option<MinCut<N>> {
        match self.phase {
            Phase::Done => Some(MinCut::from_residual(self.network, &self.state)),
            _ => None,
        }
    }

    /// 推进状态机，产出下一个步骤；`Ok(None)` 表示已结束
    pub fn next_step(&mut self) -> crate::Result<Option<Step<N>>> {
        let result = self.advance();
        if result.is_err() {
            self.phase = Phase::Failed;
        }
        result
    }

    fn advance(&mut self) -> crate::Result<Option<Step<N>>> {
        match std::mem::replace(&mut self.phase, Phase::Failed) {
            Phase::Init => {
                let step = self.recorder.initial(&self.state);
                debug!(
                    nodes = self.network.node_count(),
                    edges = self.network.edge_count(),
                    "initial state recorded"
                );
                self.phase = Phase::Searching;
                Ok(Some(step))
            }
            Phase::Searching => {
                let path = match find_augmenting_path(
                    &self.state,
                    self.network.source(),
                    self.network.sink(),
                ) {
                    Some(path) => path,
                    None => return self.terminate(),
                };

                if self.iterations >= self.iteration_limit {
                    return Err(Error::IterationLimitExceeded {
                        limit: self.iteration_limit,
                        flow: self.total_flow.to_string(),
                    });
                }
                self.iterations += 1;

                let bottleneck = self.state.bottleneck(&path)?;
                debug!(
                    iteration = self.iterations,
                    path = %self.network.labels(path.nodes()).join("→"),
                    bottleneck = %bottleneck,
                    "augmenting path found"
                );

                let step = self
                    .recorder
                    .path_found(&self.state, &path, bottleneck, self.total_flow);
                self.phase = Phase::Updating { path, bottleneck };
                Ok(Some(step))
            }
            Phase::Updating { path, bottleneck } => {
                self.state.augment(&path, bottleneck)?;
                self.total_flow += bottleneck;
                debug!(
                    iteration = self.iterations,
                    total_flow = %self.total_flow,
                    "flows updated"
                );

                let step = self.recorder.flow_updated(&self.state, self.total_flow);
                self.phase = Phase::Searching;
                Ok(Some(step))
            }
            Phase::Done => {
                self.phase = Phase::Done;
                Ok(None)
            }
            Phase::Failed => Ok(None),
        }
    }

    fn terminate(&mut self) -> crate::Result<Option<Step<N>>> {
        let step = self
            .recorder
            .final_state(&self.state, self.total_flow, self.iterations);
        self.phase = Phase::Done;
        Ok(Some(step))
    }
}

impl<'a, N: FlowValue> Iterator for FlowRun<'a, N> {
    type Item = crate::Result<Step<N>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_step().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::trace::StepPhase;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn network(
        nodes: &[&str],
        edges: &[(&str, &str)],
        caps: &[i64],
        source: &str,
        sink: &str,
    ) -> FlowNetwork<i64> {
        FlowNetwork::new(nodes, edges, caps, source, sink).unwrap()
    }

    /// 对每个步骤检查容量约束与流量守恒
    fn assert_step_invariants(net: &FlowNetwork<i64>, result: &MaxFlowResult<i64>) {
        for step in &result.steps {
            assert_eq!(step.flows.len(), net.edge_count());
            let mut balance = vec![0i64; net.node_count()];
            for (edge, &flow) in net.edges().iter().zip(&step.flows) {
                assert!(flow >= 0 && flow <= edge.capacity(), "step {}", step.index);
                balance[edge.source()] -= flow;
                balance[edge.target()] += flow;
            }
            for (node, &b) in balance.iter().enumerate() {
                if node != net.source() && node != net.sink() {
                    assert_eq!(b, 0, "conservation violated at node {} step {}", node, step.index);
                }
            }
            // 源点净流出等于累计流量
            assert_eq!(-balance[net.source()], step.total_flow);
        }
    }

    #[test]
    fn test_scenario_a_two_parallel_routes() {
        let net = network(
            &["S", "A", "B", "T"],
            &[("S", "A"), ("S", "B"), ("A", "T"), ("B", "T")],
            &[10, 10, 10, 10],
            "S",
            "T",
        );
        let result = EdmondsKarp::new(&net).run().unwrap();

        assert_eq!(result.max_flow, 20);
        assert_eq!(result.iterations, 2);
        assert_eq!(result.augmenting_steps().count(), 2);
        assert_eq!(result.paths(), vec![vec!["S", "A", "T"], vec!["S", "B", "T"]]);
        assert!(result.is_final);
        assert_step_invariants(&net, &result);
    }

    #[test]
    fn test_scenario_b_single_edge() {
        let net = network(&["S", "T"], &[("S", "T")], &[5], "S", "T");
        let mut run = EdmondsKarp::new(&net).steps();
        let steps: Vec<_> = run.by_ref().collect::<crate::Result<_>>().unwrap();

        assert!(run.is_finished());
        assert_eq!(run.total_flow(), 5);
        assert_eq!(run.iterations(), 1);
        assert_eq!(steps.iter().filter(|s| s.is_augmenting()).count(), 1);
        assert_eq!(run.residual_state().residual(0, 1), 0);
        assert_eq!(run.residual_state().residual(1, 0), 5);

        let last = steps.last().unwrap();
        assert_eq!(last.phase, StepPhase::Final);
        let edge = last.elements.edge(0).unwrap();
        assert_eq!(edge.label, "5/5");
        assert!(edge.saturated);
    }

    #[test]
    fn test_scenario_c_disconnected_sink() {
        let net = network(&["S", "A", "T"], &[("S", "A")], &[7], "S", "T");
        let result = EdmondsKarp::new(&net).run().unwrap();

        assert_eq!(result.max_flow, 0);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[0].phase, StepPhase::Initial);
        assert_eq!(result.steps[1].phase, StepPhase::Final);
        assert_eq!(
            result.steps[1].description,
            "final state, flow = 0 after 0 iterations"
        );
        assert_eq!(result.min_cut.unwrap().capacity, 0);
    }

    #[test]
    fn test_scenario_d_diamond_bottleneck() {
        let net = network(
            &["S", "A", "B", "T"],
            &[("S", "A"), ("A", "T"), ("S", "B"), ("B", "T")],
            &[1, 100, 100, 1],
            "S",
            "T",
        );
        let result = EdmondsKarp::new(&net).run().unwrap();

        assert_eq!(result.max_flow, 2);
        let cut = result.min_cut.as_ref().unwrap();
        assert_eq!(cut.capacity, 2);
        assert_eq!(cut.edges, vec![0, 3]);
        assert_step_invariants(&net, &result);
    }

    #[test]
    fn test_scenario_e_reverse_edge_cancellation() {
        // 最短路径 S→A→B→T 占用了 A→B，最优解需要通过 B→A 的反向残量撤销它
        let net = network(
            &["S", "A", "B", "C", "D", "F", "G", "T"],
            &[
                ("S", "A"),
                ("A", "B"),
                ("B", "T"),
                ("A", "C"),
                ("C", "D"),
                ("D", "T"),
                ("S", "F"),
                ("F", "G"),
                ("G", "B"),
            ],
            &[1, 1, 1, 1, 1, 1, 1, 1, 1],
            "S",
            "T",
        );
        let result = EdmondsKarp::new(&net).run().unwrap();

        assert_eq!(result.max_flow, 2);
        assert_eq!(
            result.paths(),
            vec![
                vec!["S", "A", "B", "T"],
                vec!["S", "F", "G", "B", "A", "C", "D", "T"],
            ]
        );

        // 第二条路径的快照中 A→B 被标记为反向边
        let second = result.augmenting_steps().nth(1).unwrap();
        let ab = second.elements.edge(1).unwrap();
        assert!(ab.is_backward_edge);
        assert_eq!(
            second.description,
            "augmenting path found: S→F→G→B→A→C→D→T, bottleneck 1"
        );

        // 撤销后 A→B 不再有流量
        assert_eq!(result.final_graph.edge(1).unwrap().flow, 0);
        assert_step_invariants(&net, &result);
    }

    #[test]
    fn test_step_sequence_shape() {
        let net = network(
            &["S", "A", "B", "T"],
            &[("S", "A"), ("S", "B"), ("A", "T"), ("B", "T")],
            &[10, 10, 10, 10],
            "S",
            "T",
        );
        let result = EdmondsKarp::new(&net).run().unwrap();

        let phases: Vec<StepPhase> = result.steps.iter().map(|s| s.phase).collect();
        assert_eq!(
            phases,
            vec![
                StepPhase::Initial,
                StepPhase::PathFound,
                StepPhase::FlowUpdated,
                StepPhase::PathFound,
                StepPhase::FlowUpdated,
                StepPhase::Final,
            ]
        );
        for (i, step) in result.steps.iter().enumerate() {
            assert_eq!(step.index, i);
        }
        assert_eq!(result.steps[2].description, "flows updated, cumulative flow = 10");
        assert_eq!(
            result.steps[5].description,
            "final state, flow = 20 after 2 iterations"
        );
        assert_eq!(&result.final_graph, &result.steps[5].elements);
    }

    #[test]
    fn test_total_flow_monotonic_and_matches_path_flows() {
        let net = network(
            &["S", "A", "B", "C", "T"],
            &[("S", "A"), ("S", "B"), ("A", "B"), ("A", "C"), ("B", "C"), ("C", "T"), ("B", "T")],
            &[7, 5, 3, 4, 6, 8, 2],
            "S",
            "T",
        );
        let result = EdmondsKarp::new(&net).run().unwrap();

        let mut previous = 0;
        for step in &result.steps {
            assert!(step.total_flow >= previous);
            previous = step.total_flow;
        }
        let pushed: i64 = result.steps.iter().map(|s| s.path_flow).sum();
        assert_eq!(pushed, result.max_flow);
        assert_eq!(result.min_cut.as_ref().unwrap().capacity, result.max_flow);
        assert_step_invariants(&net, &result);
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let nodes = ["S", "A", "B", "C", "T"];
        let edges = [("S", "A"), ("S", "B"), ("A", "C"), ("B", "C"), ("C", "T"), ("A", "T")];
        let caps = [4i64, 6, 3, 5, 7, 2];

        let first = compute_max_flow(&nodes, &edges, &caps, "S", "T").unwrap();
        let second = compute_max_flow(&nodes, &edges, &caps, "S", "T").unwrap();

        assert_eq!(first.max_flow, second.max_flow);
        assert_eq!(first.steps.len(), second.steps.len());
        assert_eq!(first.paths(), second.paths());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_iteration_limit_returns_partial() {
        let net = network(
            &["S", "A", "B", "T"],
            &[("S", "A"), ("S", "B"), ("A", "T"), ("B", "T")],
            &[10, 10, 10, 10],
            "S",
            "T",
        );
        let err = EdmondsKarp::new(&net)
            .with_iteration_limit(1)
            .run()
            .unwrap_err();

        let partial = err.partial().unwrap();
        assert!(!partial.is_final);
        assert_eq!(partial.max_flow, 10);
        assert_eq!(partial.iterations, 1);
        assert_eq!(partial.steps.len(), 3);
        assert!(partial.min_cut.is_none());

        let crate_err: Error = err.into();
        assert!(matches!(
            crate_err,
            Error::IterationLimitExceeded { limit: 1, ref flow } if flow == "10"
        ));
    }

    #[test]
    fn test_flow_run_stops_after_limit_error() {
        let net = network(&["S", "T"], &[("S", "T"), ("S", "T")], &[1, 1], "S", "T");
        let mut run = EdmondsKarp::new(&net).with_iteration_limit(0).steps();

        assert!(run.next().unwrap().is_ok());
        assert!(run.next().unwrap().is_err());
        assert!(run.next().is_none());
        assert_eq!(run.steps_emitted(), 1);
        assert!(run.min_cut().is_none());
    }

    #[test]
    fn test_validation_error_produces_no_result() {
        let err = compute_max_flow(&["S", "T"], &[("S", "T")], &[-1i64], "S", "T").unwrap_err();
        assert!(err.partial().is_none());
        assert!(matches!(err, RunError::Failed(Error::InvalidCapacity { .. })));
    }

    #[test]
    fn test_huge_capacities_rejected_before_running() {
        let nodes = ["S", "A", "B", "T"];
        let edges = [("S", "A"), ("A", "T"), ("S", "B"), ("B", "T")];

        let err = compute_max_flow(&nodes, &edges, &[i64::MAX; 4], "S", "T").unwrap_err();
        assert!(matches!(err, RunError::Failed(Error::CapacityOverflow { .. })));

        let err = compute_max_flow(&nodes, &edges, &[1e308f64; 4], "S", "T").unwrap_err();
        assert!(matches!(err, RunError::Failed(Error::CapacityOverflow { .. })));

        let err = compute_max_flow(&["S", "T"], &[("S", "T"), ("S", "T")], &[1e308f64; 2], "S", "T")
            .unwrap_err();
        assert!(err.partial().is_none());

        // 最大可表示的总和仍能得到精确结果
        let half = i64::MAX / 2;
        let result = compute_max_flow(&nodes, &edges, &[half, half, 0, 0], "S", "T").unwrap();
        assert_eq!(result.max_flow, half);
    }

    #[test]
    fn test_default_iteration_limit() {
        assert_eq!(default_iteration_limit(4, 5), 40);
        assert_eq!(default_iteration_limit(2, 0), 1);
        assert_eq!(default_iteration_limit(usize::MAX, 3), usize::MAX);
    }

    #[test]
    fn test_float_capacities_agree_with_integers() {
        let nodes = ["S", "A", "B", "T"];
        let edges = [("S", "A"), ("A", "B"), ("B", "T"), ("S", "B"), ("A", "T")];
        let int_result = compute_max_flow(&nodes, &edges, &[3i64, 2, 4, 2, 1], "S", "T").unwrap();
        let float_result =
            compute_max_flow(&nodes, &edges, &[3.0f64, 2.0, 4.0, 2.0, 1.0], "S", "T").unwrap();

        assert_eq!(int_result.max_flow as f64, float_result.max_flow);
        assert_eq!(int_result.paths(), float_result.paths());

        let fractional = compute_max_flow(&["S", "T"], &[("S", "T")], &[2.5f64], "S", "T").unwrap();
        assert_eq!(fractional.max_flow, 2.5);
        assert_eq!(fractional.final_graph.edge(0).unwrap().label, "2.5/2.5");
    }

    #[test]
    fn test_self_loop_and_antiparallel_edges() {
        let net = network(
            &["S", "A", "T"],
            &[("S", "A"), ("A", "A"), ("A", "S"), ("A", "T")],
            &[5, 9, 3, 4],
            "S",
            "T",
        );
        let result = EdmondsKarp::new(&net).run().unwrap();

        assert_eq!(result.max_flow, 4);
        let flows = &result.final_graph;
        assert_eq!(flows.edge(1).unwrap().flow, 0);
        assert_eq!(flows.edge(2).unwrap().flow, 0);
        assert_step_invariants(&net, &result);
    }

    /// 枚举所有 S-T 割求最小割容量
    fn brute_force_min_cut(net: &FlowNetwork<i64>) -> i64 {
        let n = net.node_count();
        let (s, t) = (net.source(), net.sink());
        let mut best = i64::MAX;
        for mask in 0u32..(1 << n) {
            if mask & (1 << s) == 0 || mask & (1 << t) != 0 {
                continue;
            }
            let cut: i64 = net
                .edges()
                .iter()
                .filter(|e| mask & (1 << e.source()) != 0 && mask & (1 << e.target()) == 0)
                .map(|e| e.capacity())
                .sum();
            best = best.min(cut);
        }
        best
    }

    #[test]
    fn test_max_flow_equals_brute_force_min_cut() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let n = rng.gen_range(2..=7);
            let names: Vec<String> = (0..n).map(|i| format!("N{}", i)).collect();
            let edge_count = rng.gen_range(0..=n * 3);

            let mut edges = Vec::new();
            let mut caps = Vec::new();
            for _ in 0..edge_count {
                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                edges.push((names[u].clone(), names[v].clone()));
                caps.push(rng.gen_range(0..=10i64));
            }

            let net = FlowNetwork::new(&names, &edges, &caps, &names[0], &names[n - 1]).unwrap();
            let result = EdmondsKarp::new(&net).run().unwrap();

            assert_eq!(result.max_flow, brute_force_min_cut(&net));
            assert_eq!(result.min_cut.as_ref().unwrap().capacity, result.max_flow);
            assert_step_invariants(&net, &result);
        }
    }
}
