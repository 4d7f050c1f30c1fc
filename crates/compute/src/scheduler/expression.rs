use distcalc_core::{ExpressionStatus, ExpressionSummary};

use crate::compiler::Ast;

use super::types::ExpressionId;

/// Registry entry for one submitted expression. Owns its tree exclusively.
#[derive(Debug, Clone)]
pub struct Expression {
    pub id: ExpressionId,
    pub text: String,
    pub(crate) tree: Ast,
    status: ExpressionStatus,
    failed: bool,
}

impl Expression {
    pub fn new(id: ExpressionId, text: impl Into<String>, tree: Ast) -> Self {
        let mut expression = Self {
            id,
            text: text.into(),
            tree,
            status: ExpressionStatus::Pending,
            failed: false,
        };
        expression.refresh_status();
        expression
    }

    /// A task was claimed. Never moves a status backwards.
    pub fn mark_in_progress(&mut self) {
        if self.status == ExpressionStatus::Pending {
            self.status = ExpressionStatus::InProgress;
        }
    }

    /// A task reported failure. Permanent.
    pub fn mark_failed(&mut self) {
        self.failed = true;
        self.status = ExpressionStatus::Error;
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Status derived from the tree: terminal exactly when the root is a leaf
    /// or a task failed; otherwise the last recorded progress.
    pub fn status(&self) -> ExpressionStatus {
        if self.failed {
            ExpressionStatus::Error
        } else if self.tree.root_value().is_some() {
            ExpressionStatus::Completed
        } else {
            self.status
        }
    }

    pub fn result(&self) -> Option<f64> {
        if self.failed {
            return None;
        }
        self.tree.root_value()
    }

    pub(crate) fn refresh_status(&mut self) {
        self.status = self.status();
    }

    pub fn summary(&self) -> ExpressionSummary {
        ExpressionSummary {
            id: self.id.to_string(),
            expression: self.text.clone(),
            status: self.status(),
            result: self.result(),
        }
    }
}
