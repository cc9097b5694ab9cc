//! # Mapping Table
//!
//! Renders one [`SearchableSelect`] per vendor attribute of a vendor and
//! reconciles the rows with the remote [`MappingStore`].
//!
//! ## Commit protocol
//!
//! ```text
//! begin_select ──▶ PendingCommit{generation, token} ──send──▶ store
//!                                                         │
//!      complete_commit ◀──────────── Result<message> ─────┘
//!        ├─ matches row   + Ok  ─▶ Committed (green toast)
//!        ├─ matches row   + Err ─▶ Failed    (red toast, full reload)
//!        └─ generation or token moved on ─▶ Stale (dropped, no reload)
//! ```
//!
//! The split lets a UI keep several rows' commits in flight while it
//! continues to own the table. [`MappingTable::select_and_commit`] runs the
//! three steps in sequence.
//!
//! Every load that replaces the rows bumps the table generation; every
//! selection bumps the row's token. A response is applied only if both
//! still match, so a slow response can never overwrite a newer selection
//! or a freshly loaded table.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pim_client::{MappingData, MappingStore, PimApiError, VendorAttributeRow};
use pim_core::{PimAttributeId, VendorAttributeId, VendorId};
use serde::Serialize;
use thiserror::Error;

use crate::events::{DocEvent, EventBus, Subscription, DOC_UPDATE};
use crate::notify::{Notification, NotificationQueue};
use crate::select::{AttributeOption, Direction, SearchableSelect};

/// Table-level failures.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("no row for vendor attribute {0}")]
    UnknownRow(VendorAttributeId),

    #[error("PIM attribute {0} is not in the directory")]
    UnknownOption(PimAttributeId),

    #[error("failed to load attribute mappings for {vendor}: {source}")]
    Load {
        vendor: VendorId,
        #[source]
        source: PimApiError,
    },
}

/// A selection that has been handed to the store but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommit {
    pub vendor: VendorId,
    pub row: VendorAttributeId,
    pub target: Option<PimAttributeId>,
    pub previous: Option<PimAttributeId>,
    generation: u64,
    token: u64,
}

impl PendingCommit {
    /// Send the update to `store`. Exactly one update call per commit.
    pub async fn send<S: MappingStore>(&self, store: &S) -> Result<String, PimApiError> {
        store
            .update_mapping(&self.vendor, &self.row, self.target.as_ref())
            .await
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

/// How a commit response was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Store accepted; the row now shows the new selection.
    Committed { message: String },
    /// Store rejected; the row kept its previous selection and the table
    /// must be reloaded.
    Failed { message: String },
    /// The response belongs to a superseded selection or an older table.
    Stale,
}

/// One vendor attribute row.
#[derive(Debug, Clone)]
pub struct MappingRow {
    attribute: VendorAttributeRow,
    select: SearchableSelect,
    token: u64,
}

impl MappingRow {
    pub fn attribute(&self) -> &VendorAttributeRow {
        &self.attribute
    }

    pub fn select(&self) -> &SearchableSelect {
        &self.select
    }
}

/// Flat, serializable view of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub vendor_attribute: VendorAttributeId,
    pub vendor_attribute_name: String,
    pub vendor_attribute_code: Option<String>,
    pub pim_attribute: Option<PimAttributeId>,
    pub pim_attribute_label: String,
    pub committing: bool,
}

/// Shared "reload when convenient" flag, set by change subscriptions.
#[derive(Debug, Clone, Default)]
pub struct ReloadHandle(Arc<AtomicBool>);

impl ReloadHandle {
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The vendor attribute mapping table.
#[derive(Debug)]
pub struct MappingTable<S> {
    store: S,
    vendor: VendorId,
    show_unmapped_only: bool,
    generation: u64,
    rows: Vec<MappingRow>,
    directory: Arc<[AttributeOption]>,
    reload: ReloadHandle,
    notifications: NotificationQueue,
}

impl<S: MappingStore> MappingTable<S> {
    /// An empty table for `vendor`. Call [`load`](Self::load) to populate it.
    pub fn new(store: S, vendor: VendorId) -> Self {
        Self {
            store,
            vendor,
            show_unmapped_only: false,
            generation: 0,
            rows: Vec::new(),
            directory: Arc::from(Vec::new()),
            reload: ReloadHandle::default(),
            notifications: NotificationQueue::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn vendor(&self) -> &VendorId {
        &self.vendor
    }

    pub fn show_unmapped_only(&self) -> bool {
        self.show_unmapped_only
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    pub fn directory(&self) -> &[AttributeOption] {
        &self.directory
    }

    pub fn row(&self, id: &VendorAttributeId) -> Option<&MappingRow> {
        self.rows.iter().find(|r| &r.attribute.name == id)
    }

    fn row_mut(&mut self, id: &VendorAttributeId) -> Result<&mut MappingRow, TableError> {
        self.rows
            .iter_mut()
            .find(|r| &r.attribute.name == id)
            .ok_or_else(|| TableError::UnknownRow(id.clone()))
    }

    /// Row whose list is currently open, if any.
    pub fn open_row(&self) -> Option<&VendorAttributeId> {
        self.rows
            .iter()
            .find(|r| r.select.is_open())
            .map(|r| &r.attribute.name)
    }

    /// Flat view of every row, in table order.
    pub fn view(&self) -> Vec<RowView> {
        self.rows
            .iter()
            .map(|r| RowView {
                vendor_attribute: r.attribute.name.clone(),
                vendor_attribute_name: r.attribute.label().to_string(),
                vendor_attribute_code: r.attribute.vendor_attribute_code.clone(),
                pim_attribute: r.select.committed().cloned(),
                pim_attribute_label: r.select.display_label().to_string(),
                committing: r.select.is_committing(),
            })
            .collect()
    }

    // -- Loading ---------------------------------------------------------------

    /// Fetch rows, directory and links and rebuild every widget.
    ///
    /// On failure the current rows are kept and a red notification is queued.
    pub async fn load(&mut self, show_unmapped_only: bool) -> Result<(), TableError> {
        self.show_unmapped_only = show_unmapped_only;
        match self
            .store
            .fetch_mapping_data(&self.vendor, show_unmapped_only)
            .await
        {
            Ok(data) => {
                self.apply(data);
                Ok(())
            }
            Err(source) => {
                tracing::warn!(vendor = %self.vendor, error = %source, "mapping table load failed");
                self.notifications.push(Notification::error(format!(
                    "Failed to load attribute mappings: {}",
                    source.user_message()
                )));
                Err(TableError::Load {
                    vendor: self.vendor.clone(),
                    source,
                })
            }
        }
    }

    fn apply(&mut self, data: MappingData) {
        self.generation += 1;
        self.directory = data.pim_attributes.iter().map(AttributeOption::from).collect();
        self.rows = data
            .vendor_attributes
            .into_iter()
            .map(|attribute| {
                let committed = data.mappings.get(&attribute.name).cloned();
                let select =
                    SearchableSelect::new(attribute.name.clone(), Arc::clone(&self.directory), committed);
                MappingRow {
                    attribute,
                    select,
                    token: 0,
                }
            })
            .collect();
        self.reload.clear();
        tracing::info!(
            vendor = %self.vendor,
            generation = self.generation,
            rows = self.rows.len(),
            directory = self.directory.len(),
            unmapped_only = self.show_unmapped_only,
            "mapping table loaded"
        );
    }

    /// Reload with the same filter after a failed commit.
    pub async fn on_commit_failed(&mut self) -> Result<(), TableError> {
        self.load(self.show_unmapped_only).await
    }

    /// Reload with a new unmapped-only filter. Always round-trips.
    pub async fn on_filter_toggle(&mut self, show_unmapped_only: bool) -> Result<(), TableError> {
        self.load(show_unmapped_only).await
    }

    // -- Live refresh ----------------------------------------------------------

    /// Handle that marks the table stale.
    pub fn reload_handle(&self) -> ReloadHandle {
        self.reload.clone()
    }

    pub fn mark_needs_reload(&self) {
        self.reload.request();
    }

    pub fn needs_reload(&self) -> bool {
        self.reload.is_requested()
    }

    /// Reload if a change subscription asked for it. Returns whether it did.
    pub async fn reload_if_needed(&mut self) -> Result<bool, TableError> {
        if !self.needs_reload() {
            return Ok(false);
        }
        self.load(self.show_unmapped_only).await?;
        Ok(true)
    }

    /// Subscribe to changes that affect this table: vendor attributes of
    /// this vendor, and any PIM attribute. Drop the subscriptions on teardown.
    pub fn watch(&self, bus: &EventBus) -> Vec<Subscription> {
        let vendor = self.vendor.as_str().to_string();
        let on_vendor_attr = self.reload_handle();
        let on_pim_attr = self.reload_handle();
        vec![
            bus.subscribe(
                DOC_UPDATE,
                move |e: &DocEvent| {
                    e.doctype == "PIM Vendor Attribute"
                        && e.field("pim_vendor") == Some(vendor.as_str())
                },
                move |_| on_vendor_attr.request(),
            ),
            bus.subscribe(
                DOC_UPDATE,
                |e: &DocEvent| e.doctype == "PIM Attribute",
                move |_| on_pim_attr.request(),
            ),
        ]
    }

    // -- Widget interaction ----------------------------------------------------

    /// Open `row`'s list, closing every other row's.
    pub fn open(&mut self, row: &VendorAttributeId) -> Result<(), TableError> {
        if self.row(row).is_none() {
            return Err(TableError::UnknownRow(row.clone()));
        }
        for r in &mut self.rows {
            if &r.attribute.name == row {
                r.select.open();
            } else {
                r.select.close();
            }
        }
        Ok(())
    }

    /// Close `row`'s list without changing its selection.
    pub fn close(&mut self, row: &VendorAttributeId) -> Result<(), TableError> {
        self.row_mut(row)?.select.close();
        Ok(())
    }

    /// Close every list (click outside the table).
    pub fn close_all(&mut self) {
        for r in &mut self.rows {
            r.select.close();
        }
    }

    pub fn set_filter(&mut self, row: &VendorAttributeId, text: &str) -> Result<(), TableError> {
        self.row_mut(row)?.select.set_filter(text);
        Ok(())
    }

    pub fn move_highlight(
        &mut self,
        row: &VendorAttributeId,
        direction: Direction,
    ) -> Result<(), TableError> {
        self.row_mut(row)?.select.move_highlight(direction);
        Ok(())
    }

    // -- Commit ----------------------------------------------------------------

    /// Record a selection on `row` and issue a commit ticket for it.
    ///
    /// `None` clears the mapping. A new selection on a row with a commit in
    /// flight supersedes it.
    pub fn begin_select(
        &mut self,
        row: &VendorAttributeId,
        target: Option<PimAttributeId>,
    ) -> Result<PendingCommit, TableError> {
        if let Some(id) = &target {
            if !self.directory.iter().any(|o| &o.id == id) {
                return Err(TableError::UnknownOption(id.clone()));
            }
        }
        let generation = self.generation;
        let vendor = self.vendor.clone();
        let r = self.row_mut(row)?;
        let selection = r.select.select(target);
        r.token += 1;
        tracing::debug!(row = %row, token = r.token, generation, "commit issued");
        Ok(PendingCommit {
            vendor,
            row: selection.row,
            target: selection.target,
            previous: selection.previous,
            generation,
            token: r.token,
        })
    }

    /// Select `row`'s highlighted option. `None` without a valid highlight.
    pub fn begin_confirm(
        &mut self,
        row: &VendorAttributeId,
    ) -> Result<Option<PendingCommit>, TableError> {
        let Some(target) = self
            .row(row)
            .ok_or_else(|| TableError::UnknownRow(row.clone()))?
            .select
            .highlighted()
            .map(|o| o.id.clone())
        else {
            return Ok(None);
        };
        self.begin_select(row, Some(target)).map(Some)
    }

    /// Apply the store's answer to `pending`.
    ///
    /// A [`CommitOutcome::Failed`] leaves the table marked for reload; the
    /// caller reloads it (see [`commit`](Self::commit)).
    pub fn complete_commit(
        &mut self,
        pending: &PendingCommit,
        result: Result<String, PimApiError>,
    ) -> CommitOutcome {
        let generation = self.generation;
        let current = self
            .rows
            .iter_mut()
            .find(|r| r.attribute.name == pending.row)
            .filter(|r| pending.generation == generation && r.token == pending.token);

        let Some(row) = current else {
            tracing::warn!(
                row = %pending.row,
                token = pending.token,
                generation = pending.generation,
                current_generation = generation,
                ok = result.is_ok(),
                "discarding stale commit response"
            );
            return CommitOutcome::Stale;
        };

        match result {
            Ok(message) => {
                row.select.resolve_success(pending.target.clone());
                tracing::info!(
                    vendor = %pending.vendor,
                    row = %pending.row,
                    target = ?pending.target,
                    previous = ?pending.previous,
                    "attribute mapping committed"
                );
                self.notifications.push(Notification::success(message.clone()));
                CommitOutcome::Committed { message }
            }
            Err(err) => {
                row.select.resolve_failure();
                let message = err.user_message();
                tracing::warn!(
                    vendor = %pending.vendor,
                    row = %pending.row,
                    error = %err,
                    "attribute mapping commit failed"
                );
                self.notifications.push(Notification::error(message.clone()));
                self.reload.request();
                CommitOutcome::Failed { message }
            }
        }
    }

    /// Send `pending`, apply the answer, and reload once on failure.
    pub async fn commit(&mut self, pending: PendingCommit) -> CommitOutcome {
        let result = pending.send(&self.store).await;
        let outcome = self.complete_commit(&pending, result);
        if matches!(outcome, CommitOutcome::Failed { .. }) {
            if let Err(e) = self.on_commit_failed().await {
                // The reload flag stays set so the next refresh retries.
                self.reload.request();
                tracing::warn!(error = %e, "reload after failed commit did not complete");
            }
        }
        outcome
    }

    /// Select and commit in one step.
    pub async fn select_and_commit(
        &mut self,
        row: &VendorAttributeId,
        target: Option<PimAttributeId>,
    ) -> Result<CommitOutcome, TableError> {
        let pending = self.begin_select(row, target)?;
        Ok(self.commit(pending).await)
    }

    // -- Notifications ---------------------------------------------------------

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
