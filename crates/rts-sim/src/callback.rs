//! Closure payloads for ad-hoc events.

use crate::{EventContext, EventError, Payload};

type CallbackFn<W> = Box<dyn FnOnce(&mut EventContext<'_, Callback<W>>) -> Result<(), EventError>>;

/// A boxed `FnOnce` run as an event against world `W`.
///
/// ```
/// use rts_sim::{Callback, EventContext, Scheduler};
///
/// let mut sched: Scheduler<Callback<u32>> = Scheduler::new(0);
/// sched
///     .schedule(3.0, 0, Callback::new("bump", |ctx: &mut EventContext<'_, Callback<u32>>| {
///         *ctx.world += 1;
///         Ok(())
///     }))
///     .unwrap();
/// sched.run_to_completion();
/// assert_eq!(*sched.world(), 1);
/// ```
pub struct Callback<W> {
    label: &'static str,
    f:     CallbackFn<W>,
}

impl<W> Callback<W> {
    pub fn new<F>(label: &'static str, f: F) -> Self
    where
        F: FnOnce(&mut EventContext<'_, Callback<W>>) -> Result<(), EventError> + 'static,
    {
        Self { label, f: Box::new(f) }
    }
}

impl<W> Payload for Callback<W> {
    type World = W;

    fn execute(self, ctx: &mut EventContext<'_, Self>) -> Result<(), EventError> {
        (self.f)(ctx)
    }

    fn label(&self) -> &'static str {
        self.label
    }
}

impl<W> std::fmt::Debug for Callback<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback").field("label", &self.label).finish_non_exhaustive()
    }
}
