//! Scripted driver for [`MinPriorityQueue`], behind `huffpack queue`.
//!
//! A script is a flat list of words:
//!
//! ```text
//! insert 5:2 insert 9:1 peek decrease 5:0 extract build 3:3 4:1 7:2 empty dump
//! ```
//!
//! `build` takes every `value:priority` pair that follows it. After the last operation the
//! queue is dumped once more.

use std::io::Write;

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::min_heap::MinPriorityQueue;

/// Queue of integer values keyed by integer priorities.
pub type ScriptQueue = MinPriorityQueue<i64, i64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueOp {
    Insert { value: i64, priority: i64 },
    Extract,
    Peek,
    Decrease { value: i64, priority: i64 },
    Build(Vec<(i64, i64)>),
    IsEmpty,
    Dump,
}

fn invalid(message: impl Into<String>) -> HuffmanError {
    HuffmanError::InvalidScript(message.into())
}

fn parse_pair(word: &str) -> Result<(i64, i64)> {
    let (value, priority) = word
        .split_once(':')
        .ok_or_else(|| invalid(format!("expected value:priority, got {word:?}")))?;
    let number = |s: &str| {
        s.parse::<i64>()
            .map_err(|_| invalid(format!("{s:?} in {word:?} is not an integer")))
    };
    Ok((number(value)?, number(priority)?))
}

/// Parses script words. Each argument may itself hold several whitespace-separated words.
pub fn parse_script<S: AsRef<str>>(args: &[S]) -> Result<Vec<QueueOp>> {
    let mut words = args
        .iter()
        .flat_map(|arg| arg.as_ref().split_whitespace())
        .peekable();
    let mut ops = Vec::new();

    while let Some(word) = words.next() {
        let op = match word {
            "insert" | "decrease" => {
                let pair = words
                    .next()
                    .ok_or_else(|| invalid(format!("{word} needs a value:priority pair")))?;
                let (value, priority) = parse_pair(pair)?;
                if word == "insert" {
                    QueueOp::Insert { value, priority }
                } else {
                    QueueOp::Decrease { value, priority }
                }
            }
            "build" => {
                let mut pairs = Vec::new();
                while let Some(pair) = words.next_if(|w| w.contains(':')) {
                    pairs.push(parse_pair(pair)?);
                }
                QueueOp::Build(pairs)
            }
            "extract" => QueueOp::Extract,
            "peek" => QueueOp::Peek,
            "empty" => QueueOp::IsEmpty,
            "dump" => QueueOp::Dump,
            other => return Err(invalid(format!("unknown operation {other:?}"))),
        };
        ops.push(op);
    }
    Ok(ops)
}

/// Applies `ops` to `queue` in order, writing one line per operation to `out`.
///
/// Stops at the first failing operation. Lines for the operations before it are already
/// written.
pub fn run_script<W: Write>(queue: &mut ScriptQueue, ops: &[QueueOp], out: &mut W) -> Result<()> {
    for op in ops {
        debug!(?op, size = queue.len(), "queue operation");
        match op {
            QueueOp::Insert { value, priority } => {
                queue.insert(*value, *priority);
                writeln!(out, "inserted {value} with priority {priority}")?;
            }
            QueueOp::Extract => {
                let value = queue.extract_min()?;
                writeln!(out, "extracted {value}")?;
            }
            QueueOp::Peek => {
                let value = queue.peek()?;
                writeln!(out, "min {value}")?;
            }
            QueueOp::Decrease { value, priority } => {
                if queue.decrease_key(value, *priority) {
                    writeln!(out, "decreased {value} to priority {priority}")?;
                } else {
                    writeln!(out, "{value} not found or priority {priority} is higher")?;
                }
            }
            QueueOp::Build(pairs) => {
                queue.build_from_pairs(pairs.iter().copied());
                writeln!(out, "built {} items", pairs.len())?;
            }
            QueueOp::IsEmpty => {
                let state = if queue.is_empty() { "empty" } else { "not empty" };
                writeln!(out, "{state}")?;
            }
            QueueOp::Dump => writeln!(out, "{queue}")?,
        }
    }
    writeln!(out, "{queue}")?;
    Ok(())
}
