//! Scheduling policies: ready-queue discipline plus reactions to each
//! [`crate::event::Kind`]. The kernel drives the clock; a [`Policy`] decides
//! what the clock's ticks mean for a process.
//!
//! FCFS and SJF are the two independent base disciplines (FIFO vs.
//! τ-ordered). SRT and RR are *not* separate implementations from scratch —
//! SRT composes a [`sjf::Sjf`] and adds preemption, RR composes a
//! [`fcfs::Fcfs`] and adds time-slice expiry. Composition is by holding the
//! base policy as a field and delegating, not by trait-default-method
//! inheritance: each override is a plain function that also happens to call
//! into its base's methods where behavior is unchanged.

mod common;
mod fcfs;
mod rr;
mod sjf;
mod srt;

pub use fcfs::Fcfs;
pub use rr::Rr;
pub use sjf::Sjf;
pub use srt::Srt;

use crate::process::ProcessId;
use crate::sim::Kernel;

/// The reactions a scheduling discipline has to offer. The kernel's main
/// loop only ever calls these eight handlers plus `on_evented`; it has no
/// other way to observe or influence a policy's ready queue.
pub trait Policy {
    fn name(&self) -> &'static str;

    fn on_arrival(&mut self, process: ProcessId, kernel: &mut Kernel);
    fn on_cpu(&mut self, process: ProcessId, kernel: &mut Kernel);
    fn on_finish_cpu(&mut self, process: ProcessId, kernel: &mut Kernel);
    fn on_io(&mut self, process: ProcessId, kernel: &mut Kernel);
    fn on_finish_io(&mut self, process: ProcessId, kernel: &mut Kernel);
    fn on_exit(&mut self, process: ProcessId, kernel: &mut Kernel);
    fn on_preempt(&mut self, process: ProcessId, kernel: &mut Kernel);
    fn on_expire(&mut self, process: ProcessId, kernel: &mut Kernel);

    /// The dispatch opportunity: called once after every event whose
    /// timestamp has no remaining sibling in the queue.
    fn on_evented(&mut self, kernel: &mut Kernel);
}
