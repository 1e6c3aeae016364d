//! Render graph with dependency-derived pass ordering.
//!
//! Passes declare which targets they read and write; the graph topologically
//! sorts them so a pass never samples a target the frame has not produced
//! yet. Registration order carries no meaning.

mod pass;
mod resource;

pub use pass::{PassContext, RenderPass};
pub use resource::{PassId, ResourceHandle};

use crate::{Error, Result};
use std::collections::{HashMap, VecDeque};

/// Render graph for automatic pass ordering
pub struct RenderGraph {
    passes: Vec<PassNode>,
    execution_order: Vec<usize>,
}

struct PassNode {
    pass: Box<dyn RenderPass>,
    reads: Vec<ResourceHandle>,
    writes: Vec<ResourceHandle>,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self { passes: Vec::new(), execution_order: Vec::new() }
    }

    /// Add a pass to the graph
    pub fn add_pass(&mut self, pass: impl RenderPass + 'static) -> PassId {
        let id = PassId(self.passes.len());

        let mut builder = PassResourceBuilder::new();
        pass.declare_resources(&mut builder);

        self.passes.push(PassNode {
            pass: Box::new(pass),
            reads: builder.reads,
            writes: builder.writes,
        });
        id
    }

    /// Resolve dependencies and determine execution order.
    pub fn build(&mut self) -> Result<()> {
        log::debug!("Building render graph with {} passes", self.passes.len());

        // Collect all writers first so ordering is independent of the order
        // passes were registered in.
        let mut resource_writers: HashMap<ResourceHandle, Vec<usize>> = HashMap::new();
        for (i, pass) in self.passes.iter().enumerate() {
            for &resource in &pass.writes {
                resource_writers.entry(resource).or_default().push(i);
            }
        }

        let mut in_degree = vec![0usize; self.passes.len()];
        let mut adj_list: Vec<Vec<usize>> = vec![Vec::new(); self.passes.len()];

        for (i, pass) in self.passes.iter().enumerate() {
            for resource in &pass.reads {
                for &writer in resource_writers.get(resource).into_iter().flatten() {
                    if writer != i {
                        adj_list[writer].push(i);
                        in_degree[i] += 1;
                    }
                }
            }
        }

        // Kahn's algorithm, FIFO so ties keep insertion order.
        let mut queue: VecDeque<usize> =
            (0..self.passes.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(self.passes.len());

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &neighbor in &adj_list[node] {
                in_degree[neighbor] -= 1;
                if in_degree[neighbor] == 0 {
                    queue.push_back(neighbor);
                }
            }
        }

        if order.len() != self.passes.len() {
            return Err(Error::Graph(
                "cyclic dependency detected in render graph".to_string(),
            ));
        }

        self.execution_order = order;

        for (i, &pass_idx) in self.execution_order.iter().enumerate() {
            log::debug!("  pass {}: {}", i, self.passes[pass_idx].pass.name());
        }
        Ok(())
    }

    /// Execute all passes in dependency order.
    pub fn execute(&mut self, ctx: &mut PassContext) -> Result<()> {
        for &pass_idx in &self.execution_order.clone() {
            let node = &mut self.passes[pass_idx];
            log::trace!("executing pass: {}", node.pass.name());
            node.pass.execute(ctx)?;
        }
        Ok(())
    }

    /// Pass names in resolved execution order.
    pub fn order(&self) -> Vec<&str> {
        self.execution_order
            .iter()
            .map(|&i| self.passes[i].pass.name())
            .collect()
    }
}

impl Default for RenderGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for declaring pass resource dependencies
pub struct PassResourceBuilder {
    reads: Vec<ResourceHandle>,
    writes: Vec<ResourceHandle>,
}

impl PassResourceBuilder {
    fn new() -> Self {
        Self { reads: Vec::new(), writes: Vec::new() }
    }

    /// Declare that this pass reads a resource
    pub fn read(&mut self, resource: ResourceHandle) -> &mut Self {
        self.reads.push(resource);
        self
    }

    /// Declare that this pass writes to a resource
    pub fn write(&mut self, resource: ResourceHandle) -> &mut Self {
        self.writes.push(resource);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubPass {
        name: &'static str,
        reads: Vec<ResourceHandle>,
        writes: Vec<ResourceHandle>,
    }

    impl StubPass {
        fn new(name: &'static str, reads: &[ResourceHandle], writes: &[ResourceHandle]) -> Self {
            Self { name, reads: reads.to_vec(), writes: writes.to_vec() }
        }
    }

    impl RenderPass for StubPass {
        fn name(&self) -> &str {
            self.name
        }

        fn declare_resources(&self, builder: &mut PassResourceBuilder) {
            for &r in &self.reads {
                builder.read(r);
            }
            for &w in &self.writes {
                builder.write(w);
            }
        }

        fn execute(&mut self, _ctx: &mut PassContext) -> Result<()> {
            Ok(())
        }
    }

    fn position(order: &[&str], name: &str) -> usize {
        order.iter().position(|&n| n == name).unwrap()
    }

    #[test]
    fn offscreen_passes_run_before_composite() {
        let mut graph = RenderGraph::new();
        graph.add_pass(StubPass::new("reflection", &[], &[ResourceHandle::reflection()]));
        graph.add_pass(StubPass::new("refraction", &[], &[ResourceHandle::refraction()]));
        graph.add_pass(StubPass::new(
            "composite",
            &[ResourceHandle::reflection(), ResourceHandle::refraction()],
            &[ResourceHandle::frame()],
        ));
        graph.build().unwrap();

        let order = graph.order();
        assert!(position(&order, "reflection") < position(&order, "composite"));
        assert!(position(&order, "refraction") < position(&order, "composite"));
    }

    #[test]
    fn registration_order_is_irrelevant() {
        let mut graph = RenderGraph::new();
        graph.add_pass(StubPass::new(
            "composite",
            &[ResourceHandle::reflection(), ResourceHandle::refraction()],
            &[ResourceHandle::frame()],
        ));
        graph.add_pass(StubPass::new("refraction", &[], &[ResourceHandle::refraction()]));
        graph.add_pass(StubPass::new("reflection", &[], &[ResourceHandle::reflection()]));
        graph.build().unwrap();

        let order = graph.order();
        assert_eq!(position(&order, "composite"), 2);
    }

    #[test]
    fn independent_passes_keep_insertion_order() {
        let mut graph = RenderGraph::new();
        graph.add_pass(StubPass::new("a", &[], &[ResourceHandle::named("a.out")]));
        graph.add_pass(StubPass::new("b", &[], &[ResourceHandle::named("b.out")]));
        graph.build().unwrap();
        assert_eq!(graph.order(), vec!["a", "b"]);
    }

    #[test]
    fn cycle_is_a_build_error() {
        let x = ResourceHandle::named("x");
        let y = ResourceHandle::named("y");
        let mut graph = RenderGraph::new();
        graph.add_pass(StubPass::new("first", &[y], &[x]));
        graph.add_pass(StubPass::new("second", &[x], &[y]));
        assert!(matches!(graph.build(), Err(Error::Graph(_))));
    }
}
