use std::collections::BTreeMap;

/// Host signal categories a component can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum SignalKind {
    /// Pointer enter/move/leave over the host element.
    Pointer,
    /// Window scroll.
    Scroll,
    /// Window resize.
    Resize,
    /// Hover over a corner decoration.
    CornerHover,
}

/// Handle returned by [`SignalHub::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

/// Registry of active signal subscriptions.
///
/// Dispatch asks the hub whether anyone listens to a kind; after
/// [`SignalHub::unsubscribe_all`] every signal is dropped on the floor.
#[derive(Clone, Debug, Default)]
pub struct SignalHub {
    subs: BTreeMap<SubscriptionId, SignalKind>,
    next_id: u64,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: SignalKind) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subs.insert(id, kind);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subs.remove(&id).is_some()
    }

    pub fn unsubscribe_all(&mut self) -> usize {
        let n = self.subs.len();
        self.subs.clear();
        n
    }

    pub fn is_listening(&self, kind: SignalKind) -> bool {
        self.subs.values().any(|k| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/signals.rs"]
mod tests;
