use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Pointer events delivered at document scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse button pressed
    Down,
    /// Touch released (forwarded by hosts that have touch input)
    TouchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

type Callback = Rc<dyn Fn(&PointerEvent)>;

struct Listener {
    id: u64,
    kinds: Vec<PointerKind>,
    callback: Callback,
}

/// Document-level pointer listener registry.
///
/// The host loop dispatches every pointer event here before the widgets
/// see it. Listeners are owned by a [`ListenerHandle`] and removed when
/// that handle is dropped.
pub struct Document {
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
}

impl Document {
    pub fn new() -> Rc<Self> {
        Rc::new(Document {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        })
    }

    /// Register `callback` for the given pointer kinds.
    pub fn add_listener(
        self: &Rc<Self>,
        kinds: &[PointerKind],
        callback: impl Fn(&PointerEvent) + 'static,
    ) -> ListenerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            kinds: kinds.to_vec(),
            callback: Rc::new(callback),
        });
        tracing::debug!(id, ?kinds, "document listener attached");
        ListenerHandle {
            document: Rc::downgrade(self),
            id,
        }
    }

    /// Deliver an event to every listener registered for its kind.
    pub fn dispatch(&self, event: &PointerEvent) {
        // Collect first: a callback may cause a handle to drop and mutate the list
        let targets: Vec<Callback> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kinds.contains(&event.kind))
            .map(|l| Rc::clone(&l.callback))
            .collect();
        for callback in targets {
            callback(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn remove(&self, id: u64) {
        self.listeners.borrow_mut().retain(|l| l.id != id);
        tracing::debug!(id, "document listener detached");
    }
}

/// Keeps a document listener registered; dropping it detaches the listener.
pub struct ListenerHandle {
    document: Weak<Document>,
    id: u64,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(document) = self.document.upgrade() {
            document.remove(self.id);
        }
    }
}

impl std::fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerHandle").field("id", &self.id).finish()
    }
}
