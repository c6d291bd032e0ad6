// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cart change notification.
//!
//! A watch channel always holds the latest snapshot, so a subscriber added at
//! any time can read current state and then wait for the next change.

use kisanmitra_core::CartItem;
use tokio::sync::watch;

/// Cart contents after a mutation, tagged with a monotonically increasing revision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    pub revision: u64,
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

/// Publishing side of the cart change channel.
#[derive(Debug)]
pub struct CartNotifier {
    tx: watch::Sender<CartSnapshot>,
}

impl CartNotifier {
    pub fn new(initial: Vec<CartItem>) -> Self {
        let (tx, _rx) = watch::channel(CartSnapshot {
            revision: 0,
            items: initial,
        });
        Self { tx }
    }

    /// Publish new cart contents. Succeeds with or without subscribers.
    pub fn publish(&self, items: Vec<CartItem>) -> u64 {
        let mut revision = 0;
        self.tx.send_modify(|snapshot| {
            snapshot.revision += 1;
            snapshot.items = items;
            revision = snapshot.revision;
        });
        revision
    }

    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> CartSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_advances_revision() {
        let notifier = CartNotifier::new(Vec::new());
        assert_eq!(notifier.publish(Vec::new()), 1);
        assert_eq!(notifier.publish(Vec::new()), 2);
        assert_eq!(notifier.latest().revision, 2);
    }

    #[test]
    fn dropping_receiver_unsubscribes() {
        let notifier = CartNotifier::new(Vec::new());
        let rx = notifier.subscribe();
        assert_eq!(notifier.subscriber_count(), 1);
        drop(rx);
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
