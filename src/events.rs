//! Settings Events
//!
//! Synchronous publish/subscribe channel for settings and host changes.
//!
//! Callbacks run on the publishing thread in subscription order. The
//! subscriber list is snapshotted before delivery, so a subscription dropped
//! while an event is being delivered may still see that one event.

use log::debug;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::app::{ProfileKey, Resolution};

/// Change notifications published by the settings core
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    /// The edited profile switched
    ProfileSelected(ProfileKey),
    /// A profile was (re)loaded from the store
    SettingsLoaded(ProfileKey),
    /// A profile was written to the store
    SettingsSaved(ProfileKey),
    /// Effective stream resolution changed
    ResolutionChanged(Resolution),
    /// Effective frame rate changed
    FpsChanged(u32),
    VolumeChanged(f64),
    /// The known host list changed
    HostsUpdated,
}

type Callback = Arc<dyn Fn(&SettingsEvent) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Callback)>>,
}

/// Callback registry shared by publishers and subscribers
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Subscribers>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it stays registered while the returned guard lives
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SettingsEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.entries.lock().push((id, Arc::new(callback)));
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every current subscriber
    pub fn publish(&self, event: SettingsEvent) {
        let callbacks: Vec<Callback> = self
            .inner
            .entries
            .lock()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        debug!("Publishing {:?} to {} subscribers", event, callbacks.len());
        for callback in callbacks {
            callback(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.entries.lock().len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Subscription guard; dropping it unsubscribes
pub struct Subscription {
    id: u64,
    bus: Weak<Subscribers>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.entries.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_order() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let log = log.clone();
            bus.subscribe(move |e| log.lock().push(format!("first {:?}", e)))
        };
        let second = {
            let log = log.clone();
            bus.subscribe(move |e| log.lock().push(format!("second {:?}", e)))
        };

        bus.publish(SettingsEvent::HostsUpdated);
        assert_eq!(
            *log.lock(),
            vec!["first HostsUpdated".to_string(), "second HostsUpdated".to_string()]
        );

        drop(first);
        drop(second);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicU64::new(0));

        let sub = {
            let hits = hits.clone();
            bus.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        bus.publish(SettingsEvent::FpsChanged(60));
        drop(sub);
        bus.publish(SettingsEvent::FpsChanged(120));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_bus() {
        let bus = EventBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }
}
