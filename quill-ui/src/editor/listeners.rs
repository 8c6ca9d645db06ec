// Process-wide listeners (window resize, keyboard capture) the editor hooks
// while it is alive. Each registration is a handle; dropping the handle
// deregisters it, so a disposed editor leaves nothing behind.

use egui::{Key, Modifiers};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    Keyboard,
}

/// Event delivered by the host window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Resized { width: u32, height: u32 },
    KeyPressed { key: Key, modifiers: Modifiers },
}

impl WindowEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            WindowEvent::Resized { .. } => ListenerKind::Resize,
            WindowEvent::KeyPressed { .. } => ListenerKind::Keyboard,
        }
    }
}

type Callback = Box<dyn FnMut(&WindowEvent)>;

struct Listener {
    kind: ListenerKind,
    callback: Callback,
}

#[derive(Default)]
struct Registrations {
    next_id: u64,
    active: BTreeMap<u64, Listener>,
}

impl std::fmt::Debug for Registrations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.active.iter().map(|(id, l)| (id, l.kind)))
            .finish()
    }
}

/// Shared table of live listeners. Cloning shares the table.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Registrations>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        kind: ListenerKind,
        callback: impl FnMut(&WindowEvent) + 'static,
    ) -> ListenerHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.active.insert(
            id,
            Listener {
                kind,
                callback: Box::new(callback),
            },
        );
        debug!(id, ?kind, "listener registered");

        ListenerHandle {
            id,
            kind,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every listener of its kind. Returns how many ran.
    ///
    /// Callbacks must not register or drop handles on this registry.
    pub fn emit(&self, event: &WindowEvent) -> usize {
        let kind = event.kind();
        let mut inner = self.inner.borrow_mut();
        let mut delivered = 0;
        for listener in inner.active.values_mut().filter(|l| l.kind == kind) {
            (listener.callback)(event);
            delivered += 1;
        }
        trace!(?kind, delivered, "event emitted");
        delivered
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, kind: ListenerKind) -> usize {
        self.inner
            .borrow()
            .active
            .values()
            .filter(|l| l.kind == kind)
            .count()
    }
}

/// Live registration. Deregisters on drop.
#[derive(Debug)]
pub struct ListenerHandle {
    id: u64,
    kind: ListenerKind,
    registry: Weak<RefCell<Registrations>>,
}

impl ListenerHandle {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        // Registry may already be gone at shutdown.
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.remove(&self.id);
            trace!(id = self.id, kind = ?self.kind, "listener deregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_drop_deregisters() {
        let registry = ListenerRegistry::new();
        let resize = registry.register(ListenerKind::Resize, |_| {});
        let keys = registry.register(ListenerKind::Keyboard, |_| {});
        assert_eq!(registry.len(), 2);

        drop(resize);
        assert_eq!(registry.count(ListenerKind::Resize), 0);
        assert_eq!(registry.count(ListenerKind::Keyboard), 1);

        drop(keys);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handle_outlives_registry() {
        let registry = ListenerRegistry::new();
        let handle = registry.register(ListenerKind::Keyboard, |_| {});
        drop(registry);
        drop(handle);
    }

    #[test]
    fn test_emit_reaches_matching_kind_only() {
        let registry = ListenerRegistry::new();
        let resized = Rc::new(Cell::new(None));
        let keys = Rc::new(Cell::new(0));

        let seen = Rc::clone(&resized);
        let _resize = registry.register(ListenerKind::Resize, move |event| {
            if let WindowEvent::Resized { width, height } = event {
                seen.set(Some((*width, *height)));
            }
        });
        let count = Rc::clone(&keys);
        let _keys = registry.register(ListenerKind::Keyboard, move |_| count.set(count.get() + 1));

        let delivered = registry.emit(&WindowEvent::Resized {
            width: 640,
            height: 480,
        });

        assert_eq!(delivered, 1);
        assert_eq!(resized.get(), Some((640, 480)));
        assert_eq!(keys.get(), 0);
    }

    #[test]
    fn test_dropped_listener_gets_nothing() {
        let registry = ListenerRegistry::new();
        let calls = Rc::new(Cell::new(0));
        let count = Rc::clone(&calls);
        let handle = registry.register(ListenerKind::Keyboard, move |_| count.set(count.get() + 1));
        drop(handle);

        let delivered = registry.emit(&WindowEvent::KeyPressed {
            key: Key::Z,
            modifiers: Modifiers::default(),
        });
        assert_eq!(delivered, 0);
        assert_eq!(calls.get(), 0);
    }
}
