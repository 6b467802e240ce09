//! Dependency graph building and deterministic topological ordering

use crate::asset::Asset;
use crate::asset_name::AssetName;
use crate::error::{CoreError, CoreResult};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Asset name -> sorted, deduplicated names it depends on
pub type DependencyMap = BTreeMap<AssetName, Vec<AssetName>>;

/// Validate every declared dependency across the whole discovered universe.
///
/// Fails when an asset names itself or names something that was never
/// discovered. Runs before selection so that dangling references anywhere
/// stop the run before any side effect.
pub fn resolve_dependencies(assets: &BTreeMap<AssetName, Asset>) -> CoreResult<DependencyMap> {
    let mut deps_map = DependencyMap::new();

    for (name, asset) in assets {
        let mut deps: BTreeSet<AssetName> = BTreeSet::new();
        for dep in &asset.depends {
            if dep == name {
                return Err(CoreError::SelfDependency {
                    asset: name.to_string(),
                    path: asset.path.display().to_string(),
                });
            }
            if !assets.contains_key(dep) {
                return Err(CoreError::UnknownDependency {
                    asset: name.to_string(),
                    dependency: dep.to_string(),
                    path: asset.path.display().to_string(),
                });
            }
            deps.insert(dep.clone());
        }
        deps_map.insert(name.clone(), deps.into_iter().collect());
    }

    Ok(deps_map)
}

/// Restrict a dependency map to `selected`.
///
/// Edges to assets outside the selection are dropped; callers pass a
/// selection already closed under dependencies, so none are lost.
pub fn restrict(deps_map: &DependencyMap, selected: &BTreeSet<AssetName>) -> DependencyMap {
    deps_map
        .iter()
        .filter(|(name, _)| selected.contains(*name))
        .map(|(name, deps)| {
            let kept = deps
                .iter()
                .filter(|d| selected.contains(*d))
                .cloned()
                .collect();
            (name.clone(), kept)
        })
        .collect()
}

/// A directed graph of asset dependencies
#[derive(Debug)]
pub struct AssetDag {
    /// The underlying graph; edges point from dependency to dependent
    graph: DiGraph<AssetName, ()>,

    /// Map from asset name to node index
    node_map: HashMap<AssetName, NodeIndex>,
}

impl AssetDag {
    fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    fn add_asset(&mut self, name: &AssetName) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            idx
        } else {
            let idx = self.graph.add_node(name.clone());
            self.node_map.insert(name.clone(), idx);
            idx
        }
    }

    /// Add a dependency edge (`from` depends on `to`)
    fn add_dependency(&mut self, from: &AssetName, to: &AssetName) {
        let from_idx = self.add_asset(from);
        let to_idx = self.add_asset(to);
        self.graph.update_edge(to_idx, from_idx, ());
    }

    /// Build the DAG from a dependency map, failing on cycles
    pub fn build(dependencies: &DependencyMap) -> CoreResult<Self> {
        let mut dag = Self::new();

        for name in dependencies.keys() {
            dag.add_asset(name);
        }

        for (name, deps) in dependencies {
            for dep in deps {
                dag.add_dependency(name, dep);
            }
        }

        dag.validate()?;

        Ok(dag)
    }

    /// Validate the DAG has no cycles
    pub fn validate(&self) -> CoreResult<()> {
        self.topological_order().map(|_| ())
    }

    /// Assets in dependency order.
    ///
    /// Among assets whose dependencies are all satisfied, the smallest name
    /// goes first, so the order is stable for a fixed input.
    pub fn topological_order(&self) -> CoreResult<Vec<AssetName>> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                let degree = self
                    .graph
                    .edges_directed(idx, Direction::Incoming)
                    .count();
                (idx, degree)
            })
            .collect();

        let mut ready: BTreeMap<&AssetName, NodeIndex> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&idx, _)| (&self.graph[idx], idx))
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some((name, idx)) = ready.pop_first() {
            order.push(name.clone());
            for edge in self.graph.edges_directed(idx, Direction::Outgoing) {
                let target = edge.target();
                if let Some(degree) = in_degree.get_mut(&target) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(&self.graph[target], target);
                    }
                }
            }
        }

        if order.len() < self.graph.node_count() {
            return Err(CoreError::CircularDependency {
                cycle: self.find_cycle_path(),
            });
        }

        Ok(order)
    }

    /// Describe one cycle as `a -> b -> a`, starting from its smallest name
    fn find_cycle_path(&self) -> String {
        let component = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .min_by(|a, b| self.min_name(a).cmp(&self.min_name(b)));

        let Some(component) = component else {
            return String::from("<unknown>");
        };

        let members: HashSet<NodeIndex> = component.iter().copied().collect();
        let start = component
            .iter()
            .copied()
            .min_by(|a, b| self.graph[*a].cmp(&self.graph[*b]))
            .unwrap_or(component[0]);

        // Follow dependencies (incoming edges) so the path reads
        // "dependent -> dependency", staying inside the component.
        let mut path: Vec<String> = vec![self.graph[start].to_string()];
        let mut visited = HashSet::new();
        visited.insert(start);
        let mut current = start;

        loop {
            let next = self
                .graph
                .edges_directed(current, Direction::Incoming)
                .map(|e| e.source())
                .filter(|n| members.contains(n))
                .min_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
            let Some(next) = next else { break };
            path.push(self.graph[next].to_string());
            if !visited.insert(next) {
                break;
            }
            current = next;
        }

        path.join(" -> ")
    }

    fn min_name<'a>(&'a self, nodes: &[NodeIndex]) -> Option<&'a AssetName> {
        nodes.iter().map(|idx| &self.graph[*idx]).min()
    }
}

#[cfg(test)]
#[path = "dag_test.rs"]
mod tests;
