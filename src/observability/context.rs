//! Thread-local stage tracking for error reports.
//!
//! Every stage run through a pipeline pushes its name here for the duration
//! of the call, so a failure deep inside nested combinators can say exactly
//! where it happened. Guards pop on drop, including during unwinding.

use std::cell::RefCell;

thread_local! {
    static STAGE_PATH: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// RAII guard that removes its stage from the path on drop.
#[must_use]
pub struct StageGuard {
    depth: usize,
}

impl Drop for StageGuard {
    fn drop(&mut self) {
        STAGE_PATH.with(|path| path.borrow_mut().truncate(self.depth));
    }
}

/// Push `name` onto the current thread's stage path.
///
/// ```rust
/// use composad::observability::{current_stage_path, enter_stage};
///
/// let _outer = enter_stage("pipe");
/// {
///     let _inner = enter_stage("step");
///     assert_eq!(current_stage_path(), "pipe > step");
/// }
/// assert_eq!(current_stage_path(), "pipe");
/// ```
pub fn enter_stage(name: impl Into<String>) -> StageGuard {
    STAGE_PATH.with(|path| {
        let mut path = path.borrow_mut();
        let depth = path.len();
        path.push(name.into());
        StageGuard { depth }
    })
}

/// The stages currently executing on this thread, outermost first.
pub fn current_stage_path() -> String {
    STAGE_PATH.with(|path| path.borrow().join(" > "))
}

/// How many stages are currently executing on this thread.
pub fn stage_depth() -> usize {
    STAGE_PATH.with(|path| path.borrow().len())
}
