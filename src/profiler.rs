//! Scoped profiler: a tree of named timing intervals.
//!
//! A [`Profiler`] session owns an arena of nodes; [`Scope`] handles index
//! into it. Parent-to-child ownership is a strict tree held by the arena, and
//! the child-to-parent link is a bare index used for navigation only, so no
//! reference cycles or weak pointers are involved.
//!
//! Scopes are created started, stop idempotently, and force-stop any
//! still-running children when stopped. A scope that is dropped while running
//! is stopped on drop, so no node is ever abandoned in a permanently-running
//! state. None of these operations can fail.
//!
//! The profiler is meant for a single logical call chain and does no internal
//! locking (`Profiler` is not `Sync`).
//!
//! # Example
//!
//! ```
//! use chronograph::Profiler;
//!
//! let profiler = Profiler::new();
//! let root = profiler.start("request");
//! let parse = root.child("parse");
//! parse.stop();
//! let eval = root.child("eval");
//! eval.stop();
//! root.stop();
//! let report = root.report();
//! assert_eq!(report.lines().count(), 3);
//! ```

use std::cell::RefCell;
use std::time::Instant;

/// One timed interval in the arena.
#[derive(Debug)]
struct NodeData {
    name: String,
    started: Instant,
    /// Frozen elapsed seconds; `None` while still running.
    elapsed: Option<f64>,
    children: Vec<usize>,
    /// Navigation-only back-link; `None` for roots.
    parent: Option<usize>,
}

/// A profiling session owning the node arena.
#[derive(Debug, Default)]
pub struct Profiler {
    nodes: RefCell<Vec<NodeData>>,
}

impl Profiler {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root scope and start its timer immediately.
    ///
    /// Construction and start are atomic: no scope ever exists un-started.
    pub fn start(&self, name: impl Into<String>) -> Scope<'_> {
        let id = self.insert(name.into(), None);
        Scope { profiler: self, id }
    }

    /// Render every root's subtree, roots in creation order.
    pub fn report(&self) -> String {
        let roots: Vec<usize> = {
            let nodes = self.nodes.borrow();
            (0..nodes.len())
                .filter(|&id| nodes[id].parent.is_none())
                .collect()
        };
        let mut out = String::new();
        for root in roots {
            self.render(root, 0, &mut out);
        }
        out
    }

    fn insert(&self, name: String, parent: Option<usize>) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        let id = nodes.len();
        if let Some(parent_id) = parent {
            nodes[parent_id].children.push(id);
        }
        nodes.push(NodeData {
            name,
            started: Instant::now(),
            elapsed: None,
            children: Vec::new(),
            parent,
        });
        id
    }

    /// Stop a node, freezing its elapsed time, then force-close any children
    /// still running. Idempotent: an already-stopped node returns its frozen
    /// value and its children are left untouched.
    fn stop_node(&self, id: usize) -> f64 {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(frozen) = nodes[id].elapsed {
            return frozen;
        }
        let frozen = nodes[id].started.elapsed().as_secs_f64();
        nodes[id].elapsed = Some(frozen);

        // The parent does not wait for its children; it forces closure.
        let mut pending = nodes[id].children.clone();
        while let Some(child) = pending.pop() {
            if nodes[child].elapsed.is_none() {
                nodes[child].elapsed = Some(nodes[child].started.elapsed().as_secs_f64());
            }
            pending.extend(nodes[child].children.iter().copied());
        }
        frozen
    }

    /// Frozen elapsed time, or a live `now - start` for a running node.
    fn elapsed_of(&self, id: usize) -> f64 {
        let nodes = self.nodes.borrow();
        nodes[id]
            .elapsed
            .unwrap_or_else(|| nodes[id].started.elapsed().as_secs_f64())
    }

    /// Render one subtree: `"<indent><name>: <elapsed>s"` per node, children
    /// at one level deeper in creation order, two spaces per level.
    fn render(&self, root: usize, level: usize, out: &mut String) {
        let nodes = self.nodes.borrow();
        let mut stack = vec![(root, level)];
        while let Some((id, depth)) = stack.pop() {
            let node = &nodes[id];
            let elapsed = node
                .elapsed
                .unwrap_or_else(|| node.started.elapsed().as_secs_f64());
            out.push_str(&format!(
                "{:indent$}{}: {:.4}s\n",
                "",
                node.name,
                elapsed,
                indent = depth * 2
            ));
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
}

/// Handle to one node in a [`Profiler`] session.
///
/// Dropping a running scope stops it. Stopping is idempotent, so dropping a
/// handle whose node was already stopped (explicitly, or transitively by a
/// parent) is a no-op.
#[derive(Debug)]
pub struct Scope<'p> {
    profiler: &'p Profiler,
    id: usize,
}

impl<'p> Scope<'p> {
    /// Create a child scope, append it to this node's child list, and start
    /// its timer. The session retains ownership of the child for its lifetime.
    pub fn child(&self, name: impl Into<String>) -> Scope<'p> {
        let id = self.profiler.insert(name.into(), Some(self.id));
        Scope {
            profiler: self.profiler,
            id,
        }
    }

    /// Stop this scope and return its elapsed seconds.
    ///
    /// On first call this freezes `elapsed = now - start`, then recursively
    /// stops every child not yet stopped. Subsequent calls return the frozen
    /// value without touching the tree.
    pub fn stop(&self) -> f64 {
        self.profiler.stop_node(self.id)
    }

    /// Elapsed seconds: frozen if stopped, otherwise a live reading.
    pub fn elapsed(&self) -> f64 {
        self.profiler.elapsed_of(self.id)
    }

    /// This node's name.
    pub fn name(&self) -> String {
        self.profiler.nodes.borrow()[self.id].name.clone()
    }

    /// Name of the parent node, or `None` for a root.
    pub fn parent_name(&self) -> Option<String> {
        let nodes = self.profiler.nodes.borrow();
        nodes[self.id].parent.map(|p| nodes[p].name.clone())
    }

    /// Render this node's subtree starting at indent level zero.
    ///
    /// A running node reports a live elapsed value rather than failing.
    pub fn report(&self) -> String {
        self.report_at(0)
    }

    /// Render this node's subtree starting at the given indent level.
    pub fn report_at(&self, level: usize) -> String {
        let mut out = String::new();
        self.profiler.render(self.id, level, &mut out);
        out
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.profiler.stop_node(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_stop_is_idempotent() {
        let profiler = Profiler::new();
        let scope = profiler.start("op");
        std::thread::sleep(Duration::from_millis(2));
        let first = scope.stop();
        std::thread::sleep(Duration::from_millis(2));
        let second = scope.stop();
        assert_eq!(first, second);
        assert!(first > 0.0);
    }

    #[test]
    fn test_stopping_root_force_stops_children() {
        let profiler = Profiler::new();
        let root = profiler.start("root");
        let a = root.child("a");
        let b = root.child("b");

        let root_elapsed = root.stop();
        let a_elapsed = a.elapsed();
        let b_elapsed = b.elapsed();

        assert!(root_elapsed.is_finite() && root_elapsed >= 0.0);
        assert!(a_elapsed.is_finite() && a_elapsed >= 0.0);
        assert!(b_elapsed.is_finite() && b_elapsed >= 0.0);

        // Children were frozen by the root's stop; later stops are no-ops.
        assert_eq!(a.stop(), a_elapsed);
        assert_eq!(b.stop(), b_elapsed);
    }

    #[test]
    fn test_report_shape_and_indentation() {
        let profiler = Profiler::new();
        let root = profiler.start("root");
        let _a = root.child("first");
        let _b = root.child("second");
        root.stop();

        let report = root.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("root: "));
        assert!(lines[1].starts_with("  first: "));
        assert!(lines[2].starts_with("  second: "));
        assert!(lines.iter().all(|l| l.ends_with('s')));
    }

    #[test]
    fn test_children_render_in_creation_order() {
        let profiler = Profiler::new();
        let root = profiler.start("root");
        for name in ["one", "two", "three"] {
            root.child(name).stop();
        }
        root.stop();

        let report = root.report();
        let one = report.find("one").expect("one present");
        let two = report.find("two").expect("two present");
        let three = report.find("three").expect("three present");
        assert!(one < two && two < three);
    }

    #[test]
    fn test_running_node_reports_live_elapsed() {
        let profiler = Profiler::new();
        let scope = profiler.start("running");
        let report = scope.report();
        assert!(report.starts_with("running: "));
        let early = scope.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert!(scope.elapsed() > early);
    }

    #[test]
    fn test_drop_stops_running_scope() {
        let profiler = Profiler::new();
        {
            let root = profiler.start("dropped");
            let _child = root.child("inner");
            // Both scopes leave this block running.
        }
        let report = profiler.report();
        assert_eq!(report.lines().count(), 2);

        // Elapsed values were frozen at drop, so the report is stable.
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(profiler.report(), report);
    }

    #[test]
    fn test_parent_navigation() {
        let profiler = Profiler::new();
        let root = profiler.start("root");
        let child = root.child("child");
        assert_eq!(root.parent_name(), None);
        assert_eq!(child.parent_name().as_deref(), Some("root"));
    }

    #[test]
    fn test_nested_grandchildren_report() {
        let profiler = Profiler::new();
        let root = profiler.start("root");
        let mid = root.child("mid");
        let _leaf = mid.child("leaf");
        root.stop();

        let report = root.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("  mid: "));
        assert!(lines[2].starts_with("    leaf: "));
    }
}
