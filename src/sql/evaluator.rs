/// WHERE clause evaluation
///
/// Operands are walked strictly left to right. A true operand followed by OR
/// (or by nothing) decides the chain as true; a false operand followed by AND
/// (or by nothing) decides it as false. Anything else moves on to the next
/// operand, so `a OR b AND c` reads as `a OR (b AND c)` only when `a` is true.
use super::ast::{Comparison, Condition, Connective, Operand};
use super::token::CompareOp;
use crate::types::{Row, Value};
use std::cmp::Ordering;

impl Comparison {
    /// Test this comparison against one row
    ///
    /// A missing field reads as Null for `=`/`!=` and never satisfies a
    /// relational operator.
    pub fn matches(&self, row: &Row) -> bool {
        let field = row.get(&self.field);

        match self.op {
            CompareOp::Eq => field.unwrap_or(&Value::Null).loose_eq(&self.value),
            CompareOp::Ne => !field.unwrap_or(&Value::Null).loose_eq(&self.value),
            op => {
                let ordering = match field {
                    Some(v) => v.loose_cmp(&self.value),
                    None => return false,
                };
                match (op, ordering) {
                    (CompareOp::Lt, Some(o)) => o == Ordering::Less,
                    (CompareOp::Le, Some(o)) => o != Ordering::Greater,
                    (CompareOp::Gt, Some(o)) => o == Ordering::Greater,
                    (CompareOp::Ge, Some(o)) => o != Ordering::Less,
                    _ => false,
                }
            }
        }
    }
}

pub type Comparator = fn(&Comparison, &Row) -> bool;

/// Short-circuit evaluator over a condition tree
///
/// The comparator is pluggable so callers can count or trace comparisons.
pub struct ExprEvaluator<F = Comparator> {
    comparator: F,
}

impl ExprEvaluator<Comparator> {
    pub fn new() -> Self {
        Self {
            comparator: Comparison::matches,
        }
    }
}

impl Default for ExprEvaluator<Comparator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> ExprEvaluator<F>
where
    F: FnMut(&Comparison, &Row) -> bool,
{
    pub fn with_comparator(comparator: F) -> Self {
        Self { comparator }
    }

    pub fn eval(&mut self, condition: &Condition, row: &Row) -> bool {
        let mut current = self.eval_operand(&condition.first, row);

        for (connective, operand) in &condition.rest {
            match (current, connective) {
                (true, Connective::Or) => return true,
                (false, Connective::And) => return false,
                _ => current = self.eval_operand(operand, row),
            }
        }

        current
    }

    fn eval_operand(&mut self, operand: &Operand, row: &Row) -> bool {
        match operand {
            Operand::Constant(b) => *b,
            Operand::Compare(cmp) => (self.comparator)(cmp, row),
            Operand::Group(inner) => self.eval(inner, row),
        }
    }
}

/// Evaluate an optional WHERE clause; no clause matches every row
pub fn row_matches(condition: Option<&Condition>, row: &Row) -> bool {
    match condition {
        Some(cond) => ExprEvaluator::new().eval(cond, row),
        None => true,
    }
}
