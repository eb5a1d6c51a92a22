//! Dependency graph between schemes.
//!
//! A scheme depends on its parent and on every scheme its colours reach
//! through qualified references. Loaders use the topological order to
//! register parents first and populate referenced schemes before their
//! dependents.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A dependency graph keyed by scheme name.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Adjacency list: scheme -> schemes it depends on.
    dependencies: BTreeMap<String, BTreeSet<String>>,

    /// Reverse adjacency list: scheme -> schemes that depend on it.
    dependents: BTreeMap<String, BTreeSet<String>>,

    /// All known schemes (including those with no dependencies).
    nodes: BTreeSet<String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scheme in the graph (even if it has no dependencies).
    pub fn register(&mut self, name: impl Into<String>) {
        self.nodes.insert(name.into());
    }

    /// Add a dependency: `from` depends on `to`.
    ///
    /// `to` is not registered; dependencies on unknown schemes (already
    /// present in the registry, say) are ignored by the sort.
    pub fn add_dependency(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let to = to.into();
        self.nodes.insert(from.clone());

        self.dependencies
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        self.dependents.entry(to).or_default().insert(from);
    }

    /// Get all schemes that `name` depends on (direct dependencies).
    pub fn dependencies_of(&self, name: &str) -> impl Iterator<Item = &str> {
        self.dependencies
            .get(name)
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Perform topological sort using Kahn's algorithm.
    ///
    /// Returns schemes in dependency order (dependencies come before
    /// dependents), ties broken by name. Returns the cycle path if one
    /// exists.
    pub fn topological_sort(&self) -> Result<Vec<String>, Vec<String>> {
        // in_degree[x] = number of known schemes x still waits on
        let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
        for node in &self.nodes {
            let count = self
                .dependencies
                .get(node)
                .map_or(0, |deps| deps.iter().filter(|d| self.nodes.contains(*d)).count());
            in_degree.insert(node, count);
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &count)| count == 0)
            .map(|(&name, _)| name)
            .collect();

        let mut result = Vec::with_capacity(self.nodes.len());

        while let Some(node) = queue.pop_front() {
            result.push(node.to_string());

            for dependent in self.dependents.get(node).into_iter().flatten() {
                if let Some(count) = in_degree.get_mut(dependent.as_str()) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        queue.push_back(dependent.as_str());
                    }
                }
            }
        }

        if result.len() != self.nodes.len() {
            return Err(self.find_cycle());
        }

        Ok(result)
    }

    /// Find a cycle in the graph (for error reporting).
    fn find_cycle(&self) -> Vec<String> {
        let mut visited = BTreeSet::new();
        let mut on_stack = BTreeSet::new();
        let mut path = Vec::new();

        for start in &self.nodes {
            if !visited.contains(start.as_str()) {
                if let Some(cycle) = self.dfs_find_cycle(start, &mut visited, &mut on_stack, &mut path)
                {
                    return cycle;
                }
            }
        }

        Vec::new()
    }

    fn dfs_find_cycle<'a>(
        &'a self,
        node: &'a str,
        visited: &mut BTreeSet<&'a str>,
        on_stack: &mut BTreeSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        visited.insert(node);
        on_stack.insert(node);
        path.push(node);

        for dep in self.dependencies.get(node).into_iter().flatten() {
            if !self.nodes.contains(dep) {
                continue;
            }

            if !visited.contains(dep.as_str()) {
                if let Some(cycle) = self.dfs_find_cycle(dep, visited, on_stack, path) {
                    return Some(cycle);
                }
            } else if on_stack.contains(dep.as_str()) {
                let start = path.iter().position(|x| *x == dep.as_str())?;
                let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
                cycle.push(dep.clone());
                return Some(cycle);
            }
        }

        path.pop();
        on_stack.remove(node);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert!(graph.topological_sort().unwrap().is_empty());
    }

    #[test]
    fn test_parent_before_child() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("dark", "base");
        graph.add_dependency("base", "default");
        graph.register("base");
        graph.register("default");

        let sorted = graph.topological_sort().unwrap();
        assert_eq!(sorted, vec!["default", "base", "dark"]);
    }

    #[test]
    fn test_unknown_dependency_is_ignored() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("dark", "default");

        assert_eq!(graph.topological_sort().unwrap(), vec!["dark"]);
        assert_eq!(graph.dependencies_of("dark").collect::<Vec<_>>(), vec!["default"]);
    }

    #[test]
    fn test_diamond() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("b", "a");
        graph.add_dependency("c", "a");
        graph.add_dependency("d", "b");
        graph.add_dependency("d", "c");
        graph.register("a");

        assert_eq!(graph.topological_sort().unwrap(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "c");
        graph.add_dependency("c", "a");

        let cycle = graph.topological_sort().unwrap_err();
        assert_eq!(cycle, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn test_self_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("loop", "loop");
        assert_eq!(graph.topological_sort().unwrap_err(), vec!["loop", "loop"]);
    }
}
