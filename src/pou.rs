//! Points of uncertainty: checkpoint/rollback over [`ParseState`], with a
//! scoped guard standing in for the source's closure-based
//! `withPointOfUncertainty`.

use crate::pos::BitPos;
use crate::state::{ParseState, ProcessorStatus};

/// A handle to a previously taken snapshot. Only the top of the PoU stack
/// may be discarded, reset, or queried — mis-nesting (e.g. holding two marks
/// and releasing them out of order) is a programmer error and panics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PoUMark {
    id: u64,
}

#[derive(Debug, Clone)]
struct Snapshot {
    bit_pos: BitPos,
    processor_status: ProcessorStatus,
    infoset_len: usize,
    array_pos: u64,
    group_pos: u64,
    group_index_depth: usize,
}

#[derive(Debug)]
pub(crate) struct PoUEntry {
    id: u64,
    label: String,
    context: String,
    snapshot: Snapshot,
    resolved: bool,
}

impl ParseState {
    /// Snapshots the current state and pushes a new point of uncertainty.
    ///
    /// `label` and `context` are carried only for diagnostics (PoU labeling
    /// per the design); they don't affect rollback behavior.
    #[inline]
    pub fn mark(&mut self, label: impl Into<String>, context: impl Into<String>) -> PoUMark {
        let label = label.into();
        let context = context.into();
        let id = self.next_mark_id;
        self.next_mark_id += 1;

        let snapshot = Snapshot {
            bit_pos: self.bit_pos,
            processor_status: self.processor_status.clone(),
            infoset_len: self.infoset.child_count(),
            array_pos: self.array_pos,
            group_pos: self.group_pos,
            group_index_depth: self.group_index_stack().depth(),
        };

        self.pou_stack.push(PoUEntry {
            id,
            label,
            context,
            snapshot,
            resolved: false,
        });

        tracing::trace!(label, context, "pou.mark");

        PoUMark { id }
    }

    /// Commits the point of uncertainty: drops the snapshot, retaining all
    /// side effects made since `mark` was taken.
    ///
    /// Panics if `mark` isn't the top of the PoU stack.
    #[inline]
    pub fn discard(&mut self, mark: PoUMark) {
        let entry = self.pop_checked(mark);
        tracing::trace!(label = entry.label, "pou.discard");
    }

    /// Rolls back to the point of uncertainty: restores the snapshotted bit
    /// position, infoset length, counters, and group-index depth, then
    /// re-`Success`es the status (a PoU reset always recovers a soft
    /// failure).
    ///
    /// Panics if `mark` isn't the top of the PoU stack.
    #[inline]
    pub fn reset(&mut self, mark: PoUMark) {
        assert!(
            !self.is_fatal(),
            "attempted to PoU-reset a fatal, unrecoverable error"
        );
        let entry = self.pop_checked(mark);
        let snap = entry.snapshot;

        self.bit_pos = snap.bit_pos;
        self.infoset.truncate_children_to(snap.infoset_len);
        self.array_pos = snap.array_pos;
        self.group_pos = snap.group_pos;
        assert_eq!(
            self.group_index_stack().depth(),
            snap.group_index_depth,
            "group index stack depth changed across a point of uncertainty"
        );
        self.set_success();

        tracing::trace!(label = entry.label, "pou.reset");
    }

    /// `true` if the child parser conclusively decided (e.g. consumed a
    /// discriminator) before the eventual failure; a resolved PoU must not
    /// be backtracked into.
    ///
    /// Panics if `mark` isn't the top of the PoU stack.
    #[inline]
    pub fn is_resolved(&self, mark: PoUMark) -> bool {
        self.peek_checked(mark).resolved
    }

    /// Flags the point of uncertainty as resolved/discriminated. Called by
    /// (or on behalf of) child parsers that consume a discriminator before
    /// potentially failing.
    ///
    /// Panics if `mark` isn't the top of the PoU stack.
    #[inline]
    pub fn discriminate(&mut self, mark: PoUMark) {
        let top = self
            .pou_stack
            .last_mut()
            .unwrap_or_else(|| panic!("PoU stack is empty, cannot discriminate {:?}", mark));
        assert_eq!(
            top.id, mark.id,
            "mis-nested PoU: tried to discriminate a mark that isn't on top of the stack"
        );
        top.resolved = true;
    }

    #[inline]
    fn pop_checked(&mut self, mark: PoUMark) -> PoUEntry {
        let entry = self
            .pou_stack
            .pop()
            .unwrap_or_else(|| panic!("PoU stack is empty, cannot resolve {:?}", mark));
        assert_eq!(
            entry.id, mark.id,
            "mis-nested PoU: {:?} wasn't the top of the stack (found label {:?} / context {:?})",
            mark, entry.label, entry.context,
        );
        entry
    }

    #[inline]
    fn peek_checked(&self, mark: PoUMark) -> &PoUEntry {
        let top = self
            .pou_stack
            .last()
            .unwrap_or_else(|| panic!("PoU stack is empty, cannot query {:?}", mark));
        assert_eq!(
            top.id, mark.id,
            "mis-nested PoU: {:?} wasn't the top of the stack",
            mark
        );
        top
    }

    /// `true` if no point of uncertainty is outstanding. Used by tests to
    /// assert PoU balance after a driver invocation.
    #[inline]
    pub fn pou_stack_is_empty(&self) -> bool {
        self.pou_stack.is_empty()
    }

    /// Releases the mark without restoring or committing explicitly: falls
    /// back to a rollback, matching the scoped helper's guarantee that a
    /// mark is always released on every exit path. Used only by
    /// [`PoUScope`]'s `Drop` impl.
    ///
    /// A fatal, unrecoverable error (`TunableLimitExceeded`, an invariant
    /// violation) must never be healed by an abandoned PoU scope, so in that
    /// case this only pops the stack entry instead of rolling back.
    #[inline]
    fn force_release(&mut self, mark: PoUMark) {
        let is_top = self
            .pou_stack
            .last()
            .map(|top| top.id == mark.id)
            .unwrap_or(false);
        if !is_top {
            return;
        }
        if self.is_fatal() {
            self.pou_stack.pop();
        } else {
            self.reset(mark);
        }
    }
}

/// A scoped point of uncertainty, handed to the body closure of
/// [`with_point_of_uncertainty`]. Wraps the owning `ParseState` so the body
/// can keep parsing through it while retaining the ability to commit or roll
/// back the enclosing mark.
pub struct PoUScope<'a> {
    /// The parse state the mark was taken against. The body may use this
    /// directly to continue parsing.
    pub pstate: &'a mut ParseState,
    mark: PoUMark,
    released: bool,
}

impl<'a> PoUScope<'a> {
    /// The mark this scope owns.
    #[inline]
    pub fn mark(&self) -> PoUMark {
        self.mark
    }

    /// Commits: see [`ParseState::discard`].
    #[inline]
    pub fn discard(&mut self) {
        self.pstate.discard(self.mark);
        self.released = true;
    }

    /// Rolls back: see [`ParseState::reset`].
    #[inline]
    pub fn reset(&mut self) {
        self.pstate.reset(self.mark);
        self.released = true;
    }

    /// See [`ParseState::is_resolved`].
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.pstate.is_resolved(self.mark)
    }

    /// See [`ParseState::discriminate`].
    #[inline]
    pub fn discriminate(&mut self) {
        self.pstate.discriminate(self.mark);
    }
}

impl<'a> Drop for PoUScope<'a> {
    #[inline]
    fn drop(&mut self) {
        if !self.released {
            self.pstate.force_release(self.mark);
        }
    }
}

/// Takes a point of uncertainty, runs `body` against a [`PoUScope`]
/// wrapping it, and guarantees the mark is released on every exit path —
/// including early returns and panics inside `body` — even if `body` never
/// explicitly calls `discard`/`reset` itself.
#[inline]
pub fn with_point_of_uncertainty<T>(
    pstate: &mut ParseState,
    label: impl Into<String>,
    context: impl Into<String>,
    body: impl FnOnce(&mut PoUScope<'_>) -> T,
) -> T {
    let mark = pstate.mark(label, context);
    let mut scope = PoUScope {
        pstate,
        mark,
        released: false,
    };
    body(&mut scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Tunables;

    #[test]
    fn discard_keeps_side_effects() {
        let mut ps = ParseState::new(Tunables::default());
        let mark = ps.mark("test", "ctx");
        ps.bit_pos = BitPos(40);
        ps.discard(mark);
        assert_eq!(ps.bit_pos, BitPos(40));
        assert!(ps.pou_stack_is_empty());
    }

    #[test]
    fn reset_restores_snapshot_and_resuccesses() {
        let mut ps = ParseState::new(Tunables::default());
        let mark = ps.mark("test", "ctx");
        ps.bit_pos = BitPos(40);
        ps.set_failure("oops");
        ps.reset(mark);
        assert_eq!(ps.bit_pos, BitPos(0));
        assert!(ps.is_success());
        assert!(ps.pou_stack_is_empty());
    }

    #[test]
    fn reset_truncates_infoset() {
        use crate::state::{InfosetNode, ScalarValue};

        let mut ps = ParseState::new(Tunables::default());
        ps.infoset
            .push_child(InfosetNode::scalar("a", ScalarValue::Text("1".into())));
        let mark = ps.mark("test", "ctx");
        ps.infoset
            .push_child(InfosetNode::scalar("b", ScalarValue::Text("2".into())));
        assert_eq!(ps.infoset.child_count(), 2);
        ps.reset(mark);
        assert_eq!(ps.infoset.child_count(), 1);
    }

    #[test]
    #[should_panic(expected = "mis-nested PoU")]
    fn mis_nested_discard_panics() {
        let mut ps = ParseState::new(Tunables::default());
        let outer = ps.mark("outer", "ctx");
        let _inner = ps.mark("inner", "ctx");
        ps.discard(outer);
    }

    #[test]
    fn scoped_helper_releases_on_early_return() {
        let mut ps = ParseState::new(Tunables::default());
        ps.bit_pos = BitPos(8);

        let result = with_point_of_uncertainty(&mut ps, "probe", "ctx", |scope| {
            scope.pstate.bit_pos = BitPos(16);
            // body returns without calling discard/reset
            42
        });

        assert_eq!(result, 42);
        // the scope's Drop should have rolled it back since it was never
        // explicitly released
        assert_eq!(ps.bit_pos, BitPos(8));
        assert!(ps.pou_stack_is_empty());
    }

    #[test]
    fn scoped_helper_respects_explicit_discard() {
        let mut ps = ParseState::new(Tunables::default());

        with_point_of_uncertainty(&mut ps, "probe", "ctx", |scope| {
            scope.pstate.bit_pos = BitPos(16);
            scope.discard();
        });

        assert_eq!(ps.bit_pos, BitPos(16));
        assert!(ps.pou_stack_is_empty());
    }

    #[test]
    fn discriminated_mark_is_resolved() {
        let mut ps = ParseState::new(Tunables::default());
        let mark = ps.mark("probe", "ctx");
        assert!(!ps.is_resolved(mark));
        ps.discriminate(mark);
        assert!(ps.is_resolved(mark));
        ps.reset(mark);
    }
}
