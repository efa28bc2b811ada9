// src/progress.rs
use crate::error::SourceError;

/// Progress reporting for batch collection.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of items.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One item (e.g. a symbol) completed.
    fn item_done(&mut self, _index: usize, _label: &str) {}

    /// One item failed; the batch carries on.
    fn item_failed(&mut self, _index: usize, _label: &str, _err: &SourceError) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
