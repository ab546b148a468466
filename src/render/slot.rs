//! One-live-rendering-per-slot lifecycle.
//!
//! A [`Slot`] is a fixed visual region. The only way to put a rendering into
//! it is [`Slot::replace`], which disposes the current rendering before the
//! new one is mounted, so a slot never holds two live renderings and a
//! rendering is never dropped without being disposed.

/// A rendering that owns resources to release when it leaves its slot.
pub trait Rendering {
    /// Release everything held for drawing. Called exactly once.
    fn dispose(&mut self);
}

/// Monotonic id of a rendering within its slot (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderId(pub u64);

#[derive(Debug)]
struct Mounted<R> {
    id: RenderId,
    rendering: R,
}

/// A named visual region holding at most one live rendering.
#[derive(Debug)]
pub struct Slot<R: Rendering> {
    name: &'static str,
    current: Option<Mounted<R>>,
    created: u64,
    disposed: u64,
}

impl<R: Rendering> Slot<R> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            current: None,
            created: 0,
            disposed: 0,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The live rendering, if any.
    #[must_use]
    pub fn current(&self) -> Option<&R> {
        self.current.as_ref().map(|m| &m.rendering)
    }

    /// Mutable access to the live rendering (interaction state only).
    pub fn current_mut(&mut self) -> Option<&mut R> {
        self.current.as_mut().map(|m| &mut m.rendering)
    }

    /// Id of the live rendering, if any.
    #[must_use]
    pub fn current_id(&self) -> Option<RenderId> {
        self.current.as_ref().map(|m| m.id)
    }

    /// Dispose the live rendering (if any), then mount `rendering`.
    pub fn replace(&mut self, rendering: R) -> RenderId {
        self.replace_with(|| rendering)
    }

    /// Dispose the live rendering (if any), then build and mount a new one.
    ///
    /// `build` runs only after the old rendering is gone.
    pub fn replace_with(&mut self, build: impl FnOnce() -> R) -> RenderId {
        self.retire();
        let rendering = build();
        self.created += 1;
        let id = RenderId(self.created);
        self.current = Some(Mounted { id, rendering });
        tracing::debug!(slot = self.name, id = id.0, "mounted rendering");
        debug_assert_eq!(self.live_count(), 1);
        id
    }

    /// Dispose the live rendering and leave the slot empty.
    pub fn clear(&mut self) {
        self.retire();
    }

    fn retire(&mut self) {
        if let Some(mut old) = self.current.take() {
            old.rendering.dispose();
            self.disposed += 1;
            tracing::debug!(slot = self.name, id = old.id.0, "disposed rendering");
        }
    }

    /// Renderings created and not yet disposed. Never more than one.
    #[must_use]
    pub const fn live_count(&self) -> u64 {
        self.created - self.disposed
    }

    /// Total renderings ever mounted in this slot.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.created
    }
}

impl<R: Rendering> Drop for Slot<R> {
    fn drop(&mut self) {
        self.retire();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records lifecycle events in a shared log.
    struct Probe {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
            log.borrow_mut().push(format!("create {name}"));
            Self {
                name,
                log: Rc::clone(log),
            }
        }
    }

    impl Rendering for Probe {
        fn dispose(&mut self) {
            self.log.borrow_mut().push(format!("dispose {}", self.name));
        }
    }

    #[test]
    fn test_replace_disposes_before_mounting() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = Slot::new("chart");

        let first = slot.replace(Probe::new("a", &log));
        let second = slot.replace(Probe::new("b", &log));

        assert_eq!(first, RenderId(1));
        assert_eq!(second, RenderId(2));
        assert_eq!(slot.live_count(), 1);
        assert_eq!(slot.generation(), 2);
        assert_eq!(slot.current().unwrap().name, "b");
        assert_eq!(
            *log.borrow(),
            ["create a", "create b", "dispose a"].map(String::from)
        );
    }

    #[test]
    fn test_replace_with_builds_after_disposal() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = Slot::new("chart");

        slot.replace_with(|| Probe::new("a", &log));
        slot.replace_with(|| Probe::new("b", &log));

        assert_eq!(
            *log.borrow(),
            ["create a", "dispose a", "create b"].map(String::from)
        );
        assert_eq!(slot.current_id(), Some(RenderId(2)));
    }

    #[test]
    fn test_clear_empties_slot() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = Slot::new("chart");
        slot.replace(Probe::new("a", &log));
        slot.clear();
        slot.clear();

        assert!(slot.current().is_none());
        assert_eq!(slot.live_count(), 0);
        assert_eq!(log.borrow().last().map(String::as_str), Some("dispose a"));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_drop_disposes_live_rendering() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut slot = Slot::new("chart");
            slot.replace(Probe::new("a", &log));
        }
        assert_eq!(log.borrow().last().map(String::as_str), Some("dispose a"));
    }
}
