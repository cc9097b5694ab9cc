//! # Searchable Select Widget
//!
//! One instance per mapping-table row. Owns the open/closed state, the text
//! filter, the keyboard highlight and the row's selection.
//!
//! ## States
//!
//! ```text
//! Closed ──open()──▶ Open ──select()/confirm_highlighted()──▶ Closed + pending commit
//!   ▲                 │                                             │
//!   └────close()──────┘                    resolve_success() / resolve_failure()
//! ```
//!
//! ## Invariants
//!
//! - `visible` is the subsequence of `options`, in directory order, whose
//!   label contains the filter text case-insensitively. An empty filter
//!   shows everything.
//! - `highlighted` is `None` or a valid index into `visible`. Every change
//!   to `visible` resets it to `None`.
//! - The committed selection only changes on [`SearchableSelect::resolve_success`].
//!
//! Clearing a mapping is `select(None)`; the clear entry is rendered apart
//! from the filtered list so filtering never hides it.

use std::sync::Arc;

use pim_client::PimAttributeOption;
use pim_core::{PimAttributeId, VendorAttributeId};
use serde::{Deserialize, Serialize};

/// Placeholder shown when a row has no mapping.
pub const PLACEHOLDER: &str = "Select PIM Attribute...";

/// Message shown when the filter matches nothing.
pub const NO_RESULTS: &str = "No attributes found";

/// One selectable target attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub id: PimAttributeId,
    pub label: String,
}

impl From<&PimAttributeOption> for AttributeOption {
    fn from(opt: &PimAttributeOption) -> Self {
        Self {
            id: opt.name.clone(),
            label: opt.label().to_string(),
        }
    }
}

/// Keyboard highlight direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// A selection handed off for commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub row: VendorAttributeId,
    /// New target, or `None` to clear the mapping.
    pub target: Option<PimAttributeId>,
    /// Committed target at the time of the selection.
    pub previous: Option<PimAttributeId>,
}

/// State of one row's select control.
#[derive(Debug, Clone)]
pub struct SearchableSelect {
    row: VendorAttributeId,
    options: Arc<[AttributeOption]>,
    is_open: bool,
    filter_text: String,
    visible: Vec<usize>,
    highlighted: Option<usize>,
    committed: Option<PimAttributeId>,
    pending: Option<Option<PimAttributeId>>,
}

impl SearchableSelect {
    /// A closed widget for `row` over the shared directory.
    pub fn new(
        row: VendorAttributeId,
        options: Arc<[AttributeOption]>,
        committed: Option<PimAttributeId>,
    ) -> Self {
        let visible = (0..options.len()).collect();
        Self {
            row,
            options,
            is_open: false,
            filter_text: String::new(),
            visible,
            highlighted: None,
            committed,
            pending: None,
        }
    }

    pub fn row(&self) -> &VendorAttributeId {
        &self.row
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    /// The highlighted option, if any.
    pub fn highlighted(&self) -> Option<&AttributeOption> {
        self.highlighted
            .and_then(|i| self.visible.get(i))
            .map(|&idx| &self.options[idx])
    }

    /// Options currently shown, in directory order.
    pub fn visible_options(&self) -> impl Iterator<Item = &AttributeOption> + '_ {
        self.visible.iter().map(|&idx| &self.options[idx])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Whether the list should show [`NO_RESULTS`] instead of options.
    ///
    /// Only a non-empty filter can produce it; an empty directory with no
    /// filter shows an empty list.
    pub fn is_no_results(&self) -> bool {
        self.visible.is_empty() && !self.filter_text.is_empty()
    }

    pub fn committed(&self) -> Option<&PimAttributeId> {
        self.committed.as_ref()
    }

    /// Target of the in-flight commit. `Some(None)` is a pending clear.
    pub fn pending(&self) -> Option<Option<&PimAttributeId>> {
        self.pending.as_ref().map(Option::as_ref)
    }

    pub fn is_committing(&self) -> bool {
        self.pending.is_some()
    }

    /// Text for the closed control: the committed option's label or the placeholder.
    pub fn display_label(&self) -> &str {
        self.committed
            .as_ref()
            .and_then(|id| self.options.iter().find(|o| &o.id == id))
            .map_or(PLACEHOLDER, |o| o.label.as_str())
    }

    /// Show the full list with a cleared filter and no highlight.
    pub fn open(&mut self) {
        self.is_open = true;
        self.filter_text.clear();
        self.visible = (0..self.options.len()).collect();
        self.highlighted = None;
        tracing::debug!(row = %self.row, options = self.visible.len(), "select opened");
    }

    /// Hide the list. Selection is untouched.
    pub fn close(&mut self) {
        if self.is_open {
            tracing::debug!(row = %self.row, "select closed");
        }
        self.is_open = false;
    }

    /// Filter the list by case-insensitive substring match on labels.
    pub fn set_filter(&mut self, text: &str) {
        self.filter_text = text.to_string();
        let needle = text.to_lowercase();
        self.visible = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.label.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.highlighted = None;
        tracing::debug!(
            row = %self.row,
            filter = text,
            visible = self.visible.len(),
            "select filtered"
        );
    }

    /// Move the highlight one step, clamped to the visible list.
    pub fn move_highlight(&mut self, direction: Direction) {
        let Some(last) = self.visible.len().checked_sub(1) else {
            return;
        };
        self.highlighted = Some(match (direction, self.highlighted) {
            (Direction::Next, None) => 0,
            (Direction::Next, Some(i)) => (i + 1).min(last),
            (Direction::Previous, None) => 0,
            (Direction::Previous, Some(i)) => i.saturating_sub(1).min(last),
        });
    }

    /// Select the highlighted option. No-op without a valid highlight.
    pub fn confirm_highlighted(&mut self) -> Option<Selection> {
        let id = self.highlighted()?.id.clone();
        Some(self.select(Some(id)))
    }

    /// Record a pending selection and close the list.
    ///
    /// The committed selection is unchanged until the store confirms. A
    /// second selection while one is pending supersedes it.
    pub fn select(&mut self, target: Option<PimAttributeId>) -> Selection {
        self.close();
        self.pending = Some(target.clone());
        tracing::debug!(row = %self.row, target = ?target, "selection pending");
        Selection {
            row: self.row.clone(),
            target,
            previous: self.committed.clone(),
        }
    }

    /// The store accepted `target`; it becomes the committed selection.
    pub fn resolve_success(&mut self, target: Option<PimAttributeId>) {
        self.pending = None;
        self.committed = target;
    }

    /// The store rejected the pending selection; the committed one stays.
    pub fn resolve_failure(&mut self) {
        self.pending = None;
    }
}
