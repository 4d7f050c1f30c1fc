use distcalc_core::{DomainError, Operator};

/// Index of a node inside its [`Ast`] arena.
pub type NodeId = usize;

/// One element of a compiled expression tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    Leaf(f64),
    Internal {
        op: Operator,
        left: NodeId,
        right: NodeId,
        /// Set once a task has been emitted for this node.
        scheduled: bool,
    },
}

impl Node {
    pub fn value(&self) -> Option<f64> {
        match self {
            Node::Leaf(v) => Some(*v),
            Node::Internal { .. } => None,
        }
    }
}

/// An internal node whose operands are both known and which has no task yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadyNode {
    pub node: NodeId,
    pub op: Operator,
    pub lhs: f64,
    pub rhs: f64,
}

/// Binary expression tree stored as an arena. Children always precede their
/// parent, so the structure cannot contain cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        debug_assert!(root < nodes.len());
        Self { nodes, root }
    }

    /// The final value once the whole tree has collapsed into its root.
    pub fn root_value(&self) -> Option<f64> {
        self.nodes[self.root].value()
    }

    /// Nodes ready for a task, in left-right-self post-order.
    ///
    /// Iterative so that long operator chains (which produce deep trees
    /// without any parentheses) cannot exhaust the stack.
    pub fn ready_nodes(&self) -> Vec<ReadyNode> {
        let mut ready = Vec::new();
        let mut stack = vec![(self.root, false)];

        while let Some((id, expanded)) = stack.pop() {
            let Node::Internal { op, left, right, scheduled } = self.nodes[id] else {
                continue;
            };
            if !expanded {
                stack.push((id, true));
                stack.push((right, false));
                stack.push((left, false));
                continue;
            }
            if scheduled {
                continue;
            }
            if let (Node::Leaf(lhs), Node::Leaf(rhs)) = (self.nodes[left], self.nodes[right]) {
                ready.push(ReadyNode { node: id, op, lhs, rhs });
            }
        }

        ready
    }

    pub fn mark_scheduled(&mut self, id: NodeId) {
        if let Some(Node::Internal { scheduled, .. }) = self.nodes.get_mut(id) {
            *scheduled = true;
        }
    }

    /// Collapse a node into a known value. Leaves are never reverted.
    pub fn resolve(&mut self, id: NodeId, value: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            *node = Node::Leaf(value);
        }
    }

    /// Direct recursive evaluation, left operand first.
    pub fn evaluate(&self) -> Result<f64, DomainError> {
        self.evaluate_node(self.root)
    }

    fn evaluate_node(&self, id: NodeId) -> Result<f64, DomainError> {
        match self.nodes[id] {
            Node::Leaf(v) => Ok(v),
            Node::Internal { op, left, right, .. } => {
                let lhs = self.evaluate_node(left)?;
                let rhs = self.evaluate_node(right)?;
                op.apply(lhs, rhs)
            }
        }
    }
}
