/// Receives solver events and may request a control action.
///
/// An observer lets a caller watch an iteration without changing the solver
/// API: print a trace, collect iterates, or stop a run that is taking too
/// long. Returning `None` lets the solver continue; returning `Some(action)`
/// requests the solver-specific action.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the
/// no-op observer for callers that do not care.
pub trait Observer<E, A> {
    /// Observes one solver event.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
