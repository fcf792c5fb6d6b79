//! Mutable search state and reversible moves.
//!
//! The optimizer owns exactly one [`SolverState`]: the current assignment
//! plus running per-employee loads and operation counts. Trial moves are
//! applied, scored and undone. [`SolverState::apply`] returns an
//! [`AppliedMove`] that remembers the loads it overwrote, so undo restores
//! them bit for bit instead of subtracting back.

use crate::matrix::TimeMatrix;
use crate::models::Assignment;

use super::objective::Objective;

/// A neighbourhood move over the assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Moves `op` from its current owner to `to`.
    Relocate { op: usize, to: usize },
    /// Exchanges the owners of `a` and `b`.
    Swap { a: usize, b: usize },
}

/// Undo record for a move that has been applied.
#[derive(Debug, Clone, Copy)]
#[must_use = "an applied move must be undone or committed"]
pub struct AppliedMove {
    mv: Move,
    from: usize,
    to: usize,
    load_from: f64,
    load_to: f64,
}

/// Current assignment with cached loads and counts.
#[derive(Debug, Clone)]
pub struct SolverState {
    assignment: Assignment,
    loads: Vec<f64>,
    counts: Vec<usize>,
}

impl SolverState {
    /// Builds the state for an assignment over `matrix`.
    pub fn new(matrix: &TimeMatrix, assignment: Assignment) -> Self {
        let (loads, counts) = tally(matrix, &assignment);
        Self {
            assignment,
            loads,
            counts,
        }
    }

    /// Current assignment.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Consumes the state, returning the assignment.
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    /// Per-employee loads.
    pub fn loads(&self) -> &[f64] {
        &self.loads
    }

    /// Per-employee operation counts.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Current owner of `op`.
    #[inline]
    pub fn owner_of(&self, op: usize) -> usize {
        self.assignment.owner_of(op)
    }

    /// Scores the current state.
    pub fn score(&self, objective: &Objective) -> f64 {
        objective.score(&self.loads, &self.counts)
    }

    /// Applies a move.
    ///
    /// A relocate onto the current owner, or a swap between operations of
    /// the same employee, is a no-op that still yields a valid undo record.
    pub fn apply(&mut self, matrix: &TimeMatrix, mv: Move) -> AppliedMove {
        match mv {
            Move::Relocate { op, to } => {
                let from = self.assignment.owner_of(op);
                let applied = self.record(mv, from, to);
                if from != to {
                    self.loads[from] -= matrix.time(op, from);
                    self.loads[to] += matrix.time(op, to);
                    self.counts[from] -= 1;
                    self.counts[to] += 1;
                    self.assignment.set_owner(op, to);
                }
                applied
            }
            Move::Swap { a, b } => {
                let ea = self.assignment.owner_of(a);
                let eb = self.assignment.owner_of(b);
                let applied = self.record(mv, ea, eb);
                if ea != eb {
                    self.loads[ea] += matrix.time(b, ea) - matrix.time(a, ea);
                    self.loads[eb] += matrix.time(a, eb) - matrix.time(b, eb);
                    self.assignment.set_owner(a, eb);
                    self.assignment.set_owner(b, ea);
                }
                applied
            }
        }
    }

    /// Reverts a move returned by [`apply`](Self::apply).
    ///
    /// Must be called before any other move is applied.
    pub fn undo(&mut self, applied: AppliedMove) {
        let AppliedMove {
            mv,
            from,
            to,
            load_from,
            load_to,
        } = applied;
        if from == to {
            return;
        }
        match mv {
            Move::Relocate { op, .. } => {
                self.counts[to] -= 1;
                self.counts[from] += 1;
                self.assignment.set_owner(op, from);
            }
            Move::Swap { a, b } => {
                self.assignment.set_owner(a, from);
                self.assignment.set_owner(b, to);
            }
        }
        self.loads[from] = load_from;
        self.loads[to] = load_to;
    }

    fn record(&self, mv: Move, from: usize, to: usize) -> AppliedMove {
        AppliedMove {
            mv,
            from,
            to,
            load_from: self.loads[from],
            load_to: self.loads[to],
        }
    }
}

/// Recomputes loads and counts from scratch.
pub fn tally(matrix: &TimeMatrix, assignment: &Assignment) -> (Vec<f64>, Vec<usize>) {
    let n = matrix.employee_count();
    let mut loads = vec![0.0; n];
    let mut counts = vec![0; n];
    for (op, emp) in assignment.iter() {
        loads[emp] += matrix.time(op, emp);
        counts[emp] += 1;
    }
    (loads, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpandedOperation, ObjectiveWeights, Operation};

    /// 3 ops × 2 employees.
    fn sample_matrix() -> TimeMatrix {
        let ops = ["OP1", "OP2", "OP3"]
            .iter()
            .enumerate()
            .map(|(i, id)| ExpandedOperation::whole(&Operation::new(*id, i as i32, 1.0)))
            .collect();
        TimeMatrix::from_times(
            ops,
            vec!["E1".into(), "E2".into()],
            vec![
                10.0, 20.0, //
                5.0, 4.0, //
                7.0, 3.5,
            ],
        )
    }

    fn sample_state(matrix: &TimeMatrix) -> SolverState {
        let assignment = Assignment::from_commits(3, &[(0, 0), (1, 0), (2, 1)]).unwrap();
        SolverState::new(matrix, assignment)
    }

    #[test]
    fn test_initial_tally() {
        let m = sample_matrix();
        let s = sample_state(&m);
        assert_eq!(s.loads(), &[15.0, 3.5]);
        assert_eq!(s.counts(), &[2, 1]);
    }

    #[test]
    fn test_relocate_apply_and_undo() {
        let m = sample_matrix();
        let mut s = sample_state(&m);
        let before = s.clone();

        let applied = s.apply(&m, Move::Relocate { op: 1, to: 1 });
        assert_eq!(s.owner_of(1), 1);
        assert_eq!(s.loads(), &[10.0, 7.5]);
        assert_eq!(s.counts(), &[1, 2]);

        s.undo(applied);
        assert_eq!(s.assignment(), before.assignment());
        assert_eq!(s.loads(), before.loads());
        assert_eq!(s.counts(), before.counts());
    }

    #[test]
    fn test_swap_apply_and_undo() {
        let m = sample_matrix();
        let mut s = sample_state(&m);
        let before = s.clone();

        let applied = s.apply(&m, Move::Swap { a: 0, b: 2 });
        assert_eq!(s.owner_of(0), 1);
        assert_eq!(s.owner_of(2), 0);
        // E1: OP2 (5) + OP3 (7); E2: OP1 (20)
        assert_eq!(s.loads(), &[12.0, 20.0]);
        assert_eq!(s.counts(), &[2, 1]);

        s.undo(applied);
        assert_eq!(s.assignment(), before.assignment());
        assert_eq!(s.loads(), before.loads());
    }

    #[test]
    fn test_noop_moves() {
        let m = sample_matrix();
        let mut s = sample_state(&m);
        let before = s.clone();

        let applied = s.apply(&m, Move::Relocate { op: 0, to: 0 });
        assert_eq!(s.loads(), before.loads());
        s.undo(applied);

        let applied = s.apply(&m, Move::Swap { a: 0, b: 1 });
        assert_eq!(s.assignment(), before.assignment());
        s.undo(applied);
        assert_eq!(s.loads(), before.loads());
    }

    #[test]
    fn test_committed_moves_match_tally() {
        let m = sample_matrix();
        let mut s = sample_state(&m);
        let _ = s.apply(&m, Move::Relocate { op: 1, to: 1 });
        let _ = s.apply(&m, Move::Swap { a: 0, b: 2 });

        let (loads, counts) = tally(&m, s.assignment());
        for (a, b) in s.loads().iter().zip(&loads) {
            assert!((a - b).abs() < 1e-10);
        }
        assert_eq!(s.counts(), counts.as_slice());
    }

    #[test]
    fn test_score_tracks_state() {
        let m = sample_matrix();
        let s = sample_state(&m);
        let obj = Objective::new(ObjectiveWeights::new(1.0, 0.0, 0.0, 0.0), 3);
        // max 15 / total 18.5
        assert!((s.score(&obj) - 15.0 / 18.5).abs() < 1e-10);
    }
}
