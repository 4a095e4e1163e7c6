use super::GraphError;
use crate::task::Task;
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Dependency graph over a built task list: one node per task id, one edge
/// per `pred -> task` pair. Predecessor ids with no matching task are
/// skipped, so foreign task lists degrade instead of failing.
pub struct ScheduleDag {
    pub graph: DiGraph<i32, ()>,
    pub id_to_index: HashMap<i32, NodeIndex>,
}

impl ScheduleDag {
    pub fn build(tasks: &[Task]) -> Self {
        let mut graph: DiGraph<i32, ()> = DiGraph::new();
        let mut id_to_index: HashMap<i32, NodeIndex> = HashMap::new();

        for task in tasks {
            let node_ix = graph.add_node(task.id);
            id_to_index.insert(task.id, node_ix);
        }

        for task in tasks {
            for &pred_id in &task.predecessor_ids {
                if let (Some(&u), Some(&v)) =
                    (id_to_index.get(&pred_id), id_to_index.get(&task.id))
                {
                    graph.add_edge(u, v, ());
                }
            }
        }

        Self { graph, id_to_index }
    }

    /// Task ids in topological order, or an error when the list carries a
    /// dependency cycle.
    pub fn toposort_ids(&self) -> Result<Vec<i32>, GraphError> {
        let order = toposort(&self.graph, None).map_err(|_| GraphError::Cycle)?;
        Ok(order.into_iter().map(|ix| self.graph[ix]).collect())
    }

    /// Sorted, deduplicated ids of tasks that list the given task as a
    /// predecessor. Unknown ids yield an empty list.
    pub fn successors_of(&self, task_id: i32) -> Vec<i32> {
        let Some(&node_ix) = self.id_to_index.get(&task_id) else {
            return Vec::new();
        };
        let mut successors: Vec<i32> = self
            .graph
            .neighbors_directed(node_ix, Direction::Outgoing)
            .map(|ix| self.graph[ix])
            .collect();
        successors.sort_unstable();
        successors.dedup();
        successors
    }

    /// Successor lists for every task id in the graph.
    pub fn successor_map(&self) -> HashMap<i32, Vec<i32>> {
        self.id_to_index
            .keys()
            .map(|&id| (id, self.successors_of(id)))
            .collect()
    }
}
