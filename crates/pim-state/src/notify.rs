//! Transient toast notifications.

use std::collections::VecDeque;

use pim_client::items::{SkuCheck, VendorInfo};
use serde::{Deserialize, Serialize};

/// Default number of toasts kept before the oldest is dropped.
pub const DEFAULT_CAPACITY: usize = 16;

/// Toast colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Green,
    Red,
    Orange,
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Green => "GREEN",
            Self::Red => "RED",
            Self::Orange => "ORANGE",
        };
        f.write_str(s)
    }
}

/// One toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub indicator: Indicator,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            indicator: Indicator::Green,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            indicator: Indicator::Red,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            indicator: Indicator::Orange,
        }
    }

    /// Verdict toast for a SKU uniqueness check.
    pub fn for_sku_check(check: &SkuCheck) -> Self {
        let message = check.message.clone().unwrap_or_else(|| {
            if check.valid {
                "SKU is available".to_string()
            } else {
                "SKU already exists".to_string()
            }
        });
        if check.valid {
            Self::success(message)
        } else {
            Self::error(message)
        }
    }

    /// Warning for an item whose vendor exists but is inactive.
    pub fn for_vendor_info(info: &VendorInfo) -> Option<Self> {
        (info.success && !info.vendor_active)
            .then(|| Self::warning("Selected vendor is not active"))
    }
}

/// Bounded FIFO of pending toasts.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationQueue {
    /// A queue keeping at most `capacity` toasts (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Enqueue a toast, dropping the oldest when full.
    pub fn push(&mut self, notification: Notification) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Remove and return every queued toast, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.items.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drops_oldest_when_full() {
        let mut q = NotificationQueue::with_capacity(2);
        q.push(Notification::success("one"));
        q.push(Notification::error("two"));
        q.push(Notification::warning("three"));
        let drained = q.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "two");
        assert_eq!(drained[1].indicator, Indicator::Orange);
        assert!(q.is_empty());
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut q = NotificationQueue::with_capacity(0);
        q.push(Notification::success("a"));
        q.push(Notification::success("b"));
        assert_eq!(q.len(), 1);
        assert_eq!(q.last().unwrap().message, "b");
    }

    #[test]
    fn sku_check_verdict_colours() {
        let taken = SkuCheck {
            valid: false,
            message: Some("SKU 'ACME-001' already exists".into()),
            error: None,
        };
        let n = Notification::for_sku_check(&taken);
        assert_eq!(n.indicator, Indicator::Red);
        assert_eq!(n.message, "SKU 'ACME-001' already exists");

        let free = SkuCheck {
            valid: true,
            message: None,
            error: None,
        };
        assert_eq!(Notification::for_sku_check(&free).indicator, Indicator::Green);
    }

    #[test]
    fn inactive_vendor_warns() {
        let info = VendorInfo {
            success: true,
            vendor_name: Some("Acme".into()),
            vendor_code: Some("ACME".into()),
            vendor_active: false,
            message: None,
            error: None,
        };
        let n = Notification::for_vendor_info(&info).unwrap();
        assert_eq!(n.indicator, Indicator::Orange);

        let active = VendorInfo {
            vendor_active: true,
            ..info
        };
        assert!(Notification::for_vendor_info(&active).is_none());
    }
}
