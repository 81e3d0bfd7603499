//! The mutable parse state a sequence driver invocation owns for its
//! duration: bit position, infoset, status, and the counters child parsers
//! read to make separator decisions.

use crate::pos::BitPos;

/// The overall success/failure status of the parse so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorStatus {
    /// The parse is on track.
    Success,
    /// The parse has failed, with `cause` describing why.
    Failure {
        /// A human-readable description of the failure, for diagnostics.
        cause: String,
    },
}

impl ProcessorStatus {
    /// `true` if this is [`Success`](ProcessorStatus::Success).
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessorStatus::Success)
    }

    /// `true` if this is [`Failure`](ProcessorStatus::Failure).
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, ProcessorStatus::Failure { .. })
    }
}

/// Safety caps the driver enforces regardless of what a (possibly buggy)
/// schema compiler produced.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tunables {
    /// The maximum number of occurrences any single array may produce before
    /// the driver aborts with a fatal `TunableLimitExceeded`, even if the
    /// schema's own `maxOccurs` would allow more (or is unbounded).
    pub max_occurs_bounds: u64,
}

impl Default for Tunables {
    #[inline]
    fn default() -> Self {
        Tunables {
            max_occurs_bounds: 10_000,
        }
    }
}

/// A scalar value held by a leaf infoset node.
///
/// The actual typed-value model (numbers, calendars, hex binary, ...) is
/// schema-compilation territory and out of scope here; a sequence driver only
/// needs *something* concrete to append and truncate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    /// Decoded textual content.
    Text(String),
    /// Decoded binary content.
    Bytes(Vec<u8>),
    /// No value was produced (e.g. an absent optional).
    None,
}

/// A node in the parsed infoset tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfosetNode {
    /// The schema name of the term this node represents.
    pub name: String,
    /// The node's content.
    pub value: InfosetValue,
}

/// The content of an infoset node: either a scalar value, or a nested
/// ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfosetValue {
    /// A leaf scalar value.
    Scalar(ScalarValue),
    /// A complex node's ordered children.
    Complex(Vec<InfosetNode>),
}

impl InfosetNode {
    /// Builds a leaf scalar node.
    #[inline]
    pub fn scalar(name: impl Into<String>, value: ScalarValue) -> Self {
        InfosetNode {
            name: name.into(),
            value: InfosetValue::Scalar(value),
        }
    }

    /// Builds a complex node from already-parsed children.
    #[inline]
    pub fn complex(name: impl Into<String>, children: Vec<InfosetNode>) -> Self {
        InfosetNode {
            name: name.into(),
            value: InfosetValue::Complex(children),
        }
    }
}

/// The infoset tree under construction.
///
/// At any point during a parse, exactly one complex node is "open": the
/// current sequence's parent. Appends from child parsers land in that
/// node's child list; entering a nested model group pushes a new open frame,
/// and leaving it closes the frame into a single complex child of whatever
/// was open before.
#[derive(Debug, Clone, Default)]
pub struct Infoset {
    frames: Vec<Vec<InfosetNode>>,
}

impl Infoset {
    /// Creates an infoset with a single open root frame.
    #[inline]
    pub fn new() -> Self {
        Infoset {
            frames: vec![Vec::new()],
        }
    }

    /// Appends a child to the currently open complex node.
    #[inline]
    pub fn push_child(&mut self, node: InfosetNode) {
        self.current_frame_mut().push(node);
    }

    /// The number of children appended to the currently open complex node so
    /// far. This is `infosetIndexStart`/`infosetStart` from the design.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.current_frame().len()
    }

    /// Truncates the currently open complex node's children back to `len`,
    /// discarding anything appended since. Used on PoU rollback.
    #[inline]
    pub fn truncate_children_to(&mut self, len: usize) {
        self.current_frame_mut().truncate(len);
    }

    /// Opens a new complex frame, e.g. when entering a nested model group.
    #[inline]
    pub fn enter_complex(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Closes the innermost open frame, appending it as a single complex
    /// child named `name` to whatever frame was open before.
    ///
    /// Panics if called with no nested frame open (i.e. at the root).
    #[inline]
    pub fn exit_complex(&mut self, name: impl Into<String>) {
        assert!(
            self.frames.len() > 1,
            "exit_complex called with no nested frame open"
        );
        let children = self.frames.pop().expect("checked above");
        self.push_child(InfosetNode::complex(name, children));
    }

    /// The children of the currently open complex node, from `from` onward.
    /// Used to re-sort/validate an unordered sequence's matched children.
    #[inline]
    pub fn children_from(&self, from: usize) -> &[InfosetNode] {
        &self.current_frame()[from..]
    }

    /// Reorders the tail of the current frame (from `from` onward) to match
    /// `schema_order`, the declared order of an unordered group's children.
    /// Nodes whose name isn't found in `schema_order` are left in their
    /// relative arrival order, after all recognized ones.
    ///
    /// This implements `flattenAndValidateChildNodes`'s reordering half;
    /// duplicate/occurrence-count validation is schema *validation* and out
    /// of scope.
    pub fn flatten_and_validate_child_nodes(&mut self, from: usize, schema_order: &[&str]) {
        let frame = self.current_frame_mut();
        let tail: Vec<InfosetNode> = frame.split_off(from);
        let mut buckets: Vec<Vec<InfosetNode>> = schema_order.iter().map(|_| Vec::new()).collect();
        let mut unrecognized = Vec::new();
        for node in tail {
            match schema_order.iter().position(|n| *n == node.name) {
                Some(idx) => buckets[idx].push(node),
                None => unrecognized.push(node),
            }
        }
        for bucket in buckets {
            frame.extend(bucket);
        }
        frame.extend(unrecognized);
    }

    #[inline]
    fn current_frame(&self) -> &Vec<InfosetNode> {
        self.frames.last().expect("infoset always has a root frame")
    }

    #[inline]
    fn current_frame_mut(&mut self) -> &mut Vec<InfosetNode> {
        self.frames
            .last_mut()
            .expect("infoset always has a root frame")
    }

    /// The root frame's children, once parsing has fully unwound back to it.
    #[inline]
    pub fn into_root(mut self) -> Vec<InfosetNode> {
        assert_eq!(self.frames.len(), 1, "infoset has unclosed nested frames");
        self.frames.pop().expect("checked above")
    }
}

/// A LIFO stack of group indices, one per sequence currently being parsed
/// (the outermost sequence's index is at the bottom). Child parsers read the
/// top to decide infix separator semantics.
#[derive(Debug, Clone, Default)]
pub struct GroupIndexStack {
    stack: Vec<u64>,
}

impl GroupIndexStack {
    /// Creates an empty stack.
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Pushes a new group index (always `1` on sequence entry).
    #[inline]
    pub fn push(&mut self, index: u64) {
        self.stack.push(index);
    }

    /// Pops the innermost group index on sequence exit.
    ///
    /// Panics if the stack is empty, which would indicate mis-nested
    /// sequence entry/exit, a programmer error.
    #[inline]
    pub fn pop(&mut self) -> u64 {
        self.stack.pop().expect("group index stack underflow")
    }

    /// The current nesting depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// The mutable cursor over the bit-level input and its companion infoset
/// tree, owned exclusively by one sequence driver invocation.
#[derive(Debug)]
pub struct ParseState {
    /// The current bit offset into the input.
    pub bit_pos: BitPos,
    /// The overall parse status.
    pub processor_status: ProcessorStatus,
    /// The infoset tree under construction.
    pub infoset: Infoset,
    /// 1-based occurrence index within the current repeating child.
    pub array_pos: u64,
    /// 1-based index of the current child within its enclosing group.
    pub group_pos: u64,
    /// Safety caps.
    pub tunables: Tunables,
    group_index_stack: GroupIndexStack,
    pub(crate) pou_stack: Vec<crate::pou::PoUEntry>,
    pub(crate) next_mark_id: u64,
    fatal: bool,
}

impl ParseState {
    /// Creates a fresh parse state at the start of input, in `Success` status.
    #[inline]
    pub fn new(tunables: Tunables) -> Self {
        ParseState {
            bit_pos: BitPos::zero(),
            processor_status: ProcessorStatus::Success,
            infoset: Infoset::new(),
            array_pos: 0,
            group_pos: 0,
            tunables,
            group_index_stack: GroupIndexStack::new(),
            pou_stack: Vec::new(),
            next_mark_id: 0,
            fatal: false,
        }
    }

    /// `true` if [`processor_status`](Self::processor_status) is `Success`.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.processor_status.is_success()
    }

    /// `true` if [`processor_status`](Self::processor_status) is `Failure`.
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.processor_status.is_failure()
    }

    /// Marks the parse as succeeded. Used by the driver to mask a benign
    /// trailing-absent condition.
    #[inline]
    pub fn set_success(&mut self) {
        self.processor_status = ProcessorStatus::Success;
    }

    /// Marks the parse as failed with the given cause.
    #[inline]
    pub fn set_failure(&mut self, cause: impl Into<String>) {
        self.processor_status = ProcessorStatus::Failure {
            cause: cause.into(),
        };
    }

    /// Marks the parse as fatally, unrecoverably failed: `TunableLimitExceeded`
    /// or an invariant violation. Unlike an ordinary [`set_failure`](Self::set_failure),
    /// this can never be undone by a point-of-uncertainty reset.
    #[inline]
    pub fn set_fatal(&mut self, cause: impl Into<String>) {
        self.fatal = true;
        self.processor_status = ProcessorStatus::Failure {
            cause: cause.into(),
        };
    }

    /// `true` once [`set_fatal`](Self::set_fatal) has been called. Sticky for
    /// the remainder of the parse.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// Read-only access to the group index stack.
    #[inline]
    pub fn group_index_stack(&self) -> &GroupIndexStack {
        &self.group_index_stack
    }

    /// Pushes a new group index on sequence entry.
    #[inline]
    pub fn push_group_index(&mut self, index: u64) {
        self.group_index_stack.push(index);
    }

    /// Pops the group index on sequence exit.
    #[inline]
    pub fn pop_group_index(&mut self) -> u64 {
        self.group_index_stack.pop()
    }
}
