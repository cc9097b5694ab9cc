//! # pim-state — View State for the Attribute Mapping Screen
//!
//! Headless models of the interactive pieces of the vendor form:
//!
//! - **Searchable select** ([`select`]): per-row filter, keyboard
//!   highlight, and pending/committed selection.
//! - **Mapping table** ([`table`]): loads rows from a [`MappingStore`],
//!   enforces one open list at a time, commits selections with a stale
//!   response guard, and reloads in full after any failed commit.
//! - **Notifications** ([`notify`]): bounded toast queue.
//! - **Change subscriptions** ([`events`]): explicit subscribe/unsubscribe
//!   for record change events that trigger a table refresh.
//! - **Navigation** ([`navigation`]): return-to continuation after creating
//!   an attribute from the mapping table.
//!
//! [`MappingStore`]: pim_client::MappingStore

pub mod events;
pub mod navigation;
pub mod notify;
pub mod select;
pub mod table;

pub use events::{DocEvent, EventBus, Subscription, DOC_UPDATE};
pub use navigation::{CreateTarget, NavigationContext, ReturnNavigation, Route};
pub use notify::{Indicator, Notification, NotificationQueue};
pub use select::{AttributeOption, Direction, SearchableSelect, Selection};
pub use table::{CommitOutcome, MappingTable, PendingCommit, RowView, TableError};
