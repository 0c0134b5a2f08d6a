//! Library-level error type.
//!
//! Per §7, duplicate or invalid events are a programmer bug, never a
//! recoverable runtime condition: [`KernelError`] is only ever constructed
//! as the message argument of a `debug_assert!` — in
//! [`crate::event::EventQueue::add`] for [`KernelError::DuplicateEvent`],
//! and in the algorithm module's shared dispatch bookkeeping for
//! [`KernelError::InvariantViolated`] — so it never surfaces on valid,
//! spec-conformant input.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KernelError {
    #[error("duplicate event ({time_ms}ms, {kind:?}) scheduled for the same process")]
    DuplicateEvent { time_ms: u64, kind: crate::event::Kind },

    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}
