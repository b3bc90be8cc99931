use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use anyhow::Context;

/// A payload-carrying event with a discriminating kind.
///
/// Listeners subscribe to a [`Event::Kind`]; every event of that kind is
/// delivered to them with its payload.
pub trait Event {
    type Kind: Copy + Eq + Hash + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

/// Handle returned by [`EventChannel::on`], used to unsubscribe.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E) -> anyhow::Result<()>>;

/// Mapping from event kind to the listeners registered for it.
///
/// Ordering: within one dispatch, listeners of the same kind run in
/// registration order. Callers must not rely on ordering between listeners
/// for other reasons; it is a property of this implementation.
///
/// Failure: a listener returning `Err` stops the current dispatch and the
/// error is returned from [`emit`](Self::emit). The channel never catches or
/// suppresses listener errors.
pub struct EventChannel<E: Event> {
    listeners: HashMap<E::Kind, Vec<(ListenerId, Listener<E>)>>,
    next_id: u64,
}

impl<E: Event> EventChannel<E> {
    pub fn new() -> Self {
        Self { listeners: HashMap::new(), next_id: 0 }
    }

    /// Registers `listener` for every event of `kind`.
    pub fn on<F>(&mut self, kind: E::Kind, listener: F) -> ListenerId
    where
        F: FnMut(&E) -> anyhow::Result<()> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(kind).or_default().push((id, Box::new(listener)));
        id
    }

    /// Invokes every listener currently registered for `event.kind()`.
    ///
    /// Emitting an event nobody listens to is a no-op.
    pub fn emit(&mut self, event: &E) -> anyhow::Result<()> {
        let kind = event.kind();
        let Some(listeners) = self.listeners.get_mut(&kind) else {
            return Ok(());
        };

        for (id, listener) in listeners.iter_mut() {
            listener(event).with_context(|| format!("{kind:?} listener {} failed", id.0))?;
        }
        Ok(())
    }

    /// Removes one listener. Returns `false` when it was not registered.
    pub fn off(&mut self, kind: E::Kind, id: ListenerId) -> bool {
        let Some(listeners) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    /// Removes every listener registered for `kind`.
    pub fn clear(&mut self, kind: E::Kind) {
        self.listeners.remove(&kind);
    }

    /// Removes every listener of every kind.
    pub fn clear_all(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }
}

impl<E: Event> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (kind, listeners) in &self.listeners {
            map.entry(kind, &listeners.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Ping {
        Hello(u32),
        Bye,
    }

    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    enum PingKind {
        Hello,
        Bye,
    }

    impl Event for Ping {
        type Kind = PingKind;

        fn kind(&self) -> PingKind {
            match self {
                Ping::Hello(_) => PingKind::Hello,
                Ping::Bye => PingKind::Bye,
            }
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn FnMut(&Ping) -> anyhow::Result<()>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let shared = log.clone();
        let make = move |tag: &'static str| {
            let log = shared.clone();
            Box::new(move |ev: &Ping| {
                log.borrow_mut().push(format!("{tag}:{ev:?}"));
                Ok(())
            }) as Box<dyn FnMut(&Ping) -> anyhow::Result<()>>
        };
        (log, make)
    }

    // ── emit ──────────────────────────────────────────────────────────────

    #[test]
    fn emit_passes_payload_in_registration_order() {
        let (log, make) = recorder();
        let mut ch = EventChannel::<Ping>::new();
        ch.on(PingKind::Hello, make("a"));
        ch.on(PingKind::Hello, make("b"));
        ch.on(PingKind::Bye, make("c"));

        ch.emit(&Ping::Hello(7)).unwrap();

        assert_eq!(*log.borrow(), vec!["a:Hello(7)", "b:Hello(7)"]);
    }

    #[test]
    fn emit_without_listeners_is_noop() {
        let mut ch = EventChannel::<Ping>::new();
        assert!(ch.emit(&Ping::Bye).is_ok());
    }

    #[test]
    fn failing_listener_stops_dispatch_and_propagates() {
        let (log, make) = recorder();
        let mut ch = EventChannel::<Ping>::new();
        ch.on(PingKind::Bye, make("first"));
        ch.on(PingKind::Bye, |_| anyhow::bail!("boom"));
        ch.on(PingKind::Bye, make("never"));

        let err = ch.emit(&Ping::Bye).unwrap_err();

        assert!(format!("{err:#}").contains("boom"));
        assert_eq!(*log.borrow(), vec!["first:Bye"]);
    }

    // ── off / clear ───────────────────────────────────────────────────────

    #[test]
    fn off_removes_only_that_listener() {
        let (log, make) = recorder();
        let mut ch = EventChannel::<Ping>::new();
        let a = ch.on(PingKind::Hello, make("a"));
        ch.on(PingKind::Hello, make("b"));

        assert!(ch.off(PingKind::Hello, a));
        ch.emit(&Ping::Hello(1)).unwrap();

        assert_eq!(*log.borrow(), vec!["b:Hello(1)"]);
    }

    #[test]
    fn off_unknown_listener_is_noop() {
        let mut ch = EventChannel::<Ping>::new();
        let id = ch.on(PingKind::Bye, |_| Ok(()));
        assert!(!ch.off(PingKind::Hello, id));
        assert!(ch.off(PingKind::Bye, id));
        assert!(!ch.off(PingKind::Bye, id));
    }

    #[test]
    fn clear_removes_kind_only() {
        let mut ch = EventChannel::<Ping>::new();
        ch.on(PingKind::Hello, |_| Ok(()));
        ch.on(PingKind::Hello, |_| Ok(()));
        ch.on(PingKind::Bye, |_| Ok(()));

        ch.clear(PingKind::Hello);

        assert_eq!(ch.listener_count(PingKind::Hello), 0);
        assert_eq!(ch.listener_count(PingKind::Bye), 1);

        ch.clear_all();
        assert!(ch.is_empty());
    }
}
