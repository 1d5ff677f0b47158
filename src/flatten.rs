//! Depth-first flattening of nested record values.
//!
//! Sequences are expanded in order, composites are expanded as `[key, value]`
//! pairs in their enumeration order, and scalars are emitted unchanged. The
//! traversal keeps an explicit stack of iterators, so nesting depth is bounded
//! only by memory, never by the call stack.

use std::fmt;
use std::slice;

use crate::value::RecordValue;

/// A scalar produced by [`flatten`], borrowing from the flattened value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Leaf<'a> {
    /// A string value or a composite key.
    Str(&'a str),
    Int(i64),
    UInt(u64),
    Number(f64),
    Bool(bool),
    Absent,
}

impl fmt::Display for Leaf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Str(s) => f.write_str(s),
            Leaf::Int(n) => write!(f, "{n}"),
            Leaf::UInt(n) => write!(f, "{n}"),
            Leaf::Number(n) => write!(f, "{n}"),
            Leaf::Bool(b) => write!(f, "{b}"),
            Leaf::Absent => Ok(()),
        }
    }
}

enum Frame<'a> {
    Items(slice::Iter<'a, RecordValue>),
    Entries {
        entries: slice::Iter<'a, (String, RecordValue)>,
        pending: Option<&'a RecordValue>,
    },
}

enum Step<'a> {
    Key(&'a str),
    Value(&'a RecordValue),
}

impl<'a> Frame<'a> {
    fn next_step(&mut self) -> Option<Step<'a>> {
        match self {
            Frame::Items(items) => items.next().map(Step::Value),
            Frame::Entries { entries, pending } => {
                if let Some(value) = pending.take() {
                    return Some(Step::Value(value));
                }
                let (key, value) = entries.next()?;
                *pending = Some(value);
                Some(Step::Key(key))
            }
        }
    }
}

fn frame_for(value: &RecordValue) -> Option<Frame<'_>> {
    match value {
        RecordValue::Sequence(items) => Some(Frame::Items(items.iter())),
        RecordValue::Composite(entries) => Some(Frame::Entries {
            entries: entries.iter(),
            pending: None,
        }),
        RecordValue::Absent
        | RecordValue::Bool(_)
        | RecordValue::Int(_)
        | RecordValue::UInt(_)
        | RecordValue::Number(_)
        | RecordValue::Str(_) => None,
    }
}

fn scalar_leaf(value: &RecordValue) -> Leaf<'_> {
    match value {
        RecordValue::Str(s) => Leaf::Str(s),
        RecordValue::Int(n) => Leaf::Int(*n),
        RecordValue::UInt(n) => Leaf::UInt(*n),
        RecordValue::Number(n) => Leaf::Number(*n),
        RecordValue::Bool(b) => Leaf::Bool(*b),
        RecordValue::Absent | RecordValue::Sequence(_) | RecordValue::Composite(_) => Leaf::Absent,
    }
}

fn drain<'a>(mut stack: Vec<Frame<'a>>, leaves: &mut Vec<Leaf<'a>>) {
    while let Some(top) = stack.last_mut() {
        match top.next_step() {
            None => {
                stack.pop();
            }
            Some(Step::Key(key)) => leaves.push(Leaf::Str(key)),
            Some(Step::Value(value)) => match frame_for(value) {
                Some(frame) => stack.push(frame),
                None => leaves.push(scalar_leaf(value)),
            },
        }
    }
}

/// Flatten a sequence of values into its leaves, depth-first and in order.
pub fn flatten(values: &[RecordValue]) -> Vec<Leaf<'_>> {
    let mut leaves = Vec::with_capacity(values.len());
    drain(vec![Frame::Items(values.iter())], &mut leaves);
    leaves
}

/// Flatten a single value. A scalar yields itself as the only leaf.
pub fn flatten_value(value: &RecordValue) -> Vec<Leaf<'_>> {
    match frame_for(value) {
        Some(frame) => {
            let mut leaves = Vec::new();
            drain(vec![frame], &mut leaves);
            leaves
        }
        None => vec![scalar_leaf(value)],
    }
}
