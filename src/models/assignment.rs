//! Assignment (solution) model.
//!
//! Maps every expanded operation to exactly one employee. Operations and
//! employees are referred to by their row/column index in the
//! [`TimeMatrix`](crate::matrix::TimeMatrix) the assignment was built on.
//!
//! The assignment remembers the order in which operations were first
//! committed; reports list each employee's operations in that order.

/// A total, functional mapping from operation index to employee index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    owner: Vec<usize>,
    order: Vec<usize>,
}

impl Assignment {
    /// Builds an assignment from `(operation, employee)` commits.
    ///
    /// Returns `None` unless every operation in `0..op_count` is committed
    /// exactly once.
    pub fn from_commits(op_count: usize, commits: &[(usize, usize)]) -> Option<Self> {
        if commits.len() != op_count {
            return None;
        }
        let mut owner = vec![usize::MAX; op_count];
        let mut order = Vec::with_capacity(op_count);
        for &(op, emp) in commits {
            if op >= op_count || owner[op] != usize::MAX {
                return None;
            }
            owner[op] = emp;
            order.push(op);
        }
        Some(Self { owner, order })
    }

    /// Employee currently holding `op`.
    #[inline]
    pub fn owner_of(&self, op: usize) -> usize {
        self.owner[op]
    }

    /// Moves `op` to `emp`. Insertion order is unchanged.
    #[inline]
    pub fn set_owner(&mut self, op: usize, emp: usize) {
        self.owner[op] = emp;
    }

    /// Number of assigned operations.
    pub fn len(&self) -> usize {
        self.owner.len()
    }

    /// Whether no operation is assigned.
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    /// `(operation, employee)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.order.iter().map(move |&op| (op, self.owner[op]))
    }

    /// Operations held by `emp`, in insertion order.
    pub fn operations_of(&self, emp: usize) -> Vec<usize> {
        self.iter()
            .filter(|&(_, e)| e == emp)
            .map(|(op, _)| op)
            .collect()
    }

    /// Operation count per employee.
    pub fn counts(&self, employee_count: usize) -> Vec<usize> {
        let mut counts = vec![0; employee_count];
        for &emp in &self.owner {
            counts[emp] += 1;
        }
        counts
    }
}
