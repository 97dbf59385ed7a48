//! Return orders table: rows, pagination and the status action menu

use super::notices::{NoticeKind, Notifier};
use crate::api::{ApiClientTrait, ApiError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page sizes offered by the table
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [10, 25, 100];

/// Lifecycle state of a returned item as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ReturnState {
    ReturnInitiated,
    Liquidated,
    Reject,
    Rejected,
    Other(String),
}

impl From<String> for ReturnState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Return_Initiated" => Self::ReturnInitiated,
            "Liquidated" => Self::Liquidated,
            "Reject" => Self::Reject,
            "Rejected" => Self::Rejected,
            _ => Self::Other(value),
        }
    }
}

impl ReturnState {
    pub fn label(&self) -> &str {
        match self {
            Self::ReturnInitiated => "Return Initiated",
            Self::Liquidated => "Liquidated",
            Self::Reject | Self::Rejected => "Rejected",
            Self::Other(raw) => raw,
        }
    }

    /// Only freshly initiated returns can be decided on
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::ReturnInitiated)
    }
}

/// Decision an operator can take on an initiated return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReturnDecision {
    Liquidated,
    Reject,
}

impl ReturnDecision {
    pub const ALL: [ReturnDecision; 2] = [ReturnDecision::Liquidated, ReturnDecision::Reject];

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            Self::Liquidated => "Liquidate",
            Self::Reject => "Reject",
        }
    }
}

/// Body of the return state update call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnStateUpdate {
    pub id: String,
    pub state: ReturnDecision,
}

/// One returned order item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_id: String,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub is_refunded: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub state: ReturnState,
}

/// One page of return orders plus the total count across pages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnOrderPage {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub data: Vec<ReturnOrder>,
}

/// Columns rendered by the table, before the action column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnColumn {
    OrderId,
    ItemId,
    Quantity,
    Reason,
    Refunded,
    CreatedAt,
    State,
}

impl ReturnColumn {
    pub const ALL: [ReturnColumn; 7] = [
        ReturnColumn::OrderId,
        ReturnColumn::ItemId,
        ReturnColumn::Quantity,
        ReturnColumn::Reason,
        ReturnColumn::Refunded,
        ReturnColumn::CreatedAt,
        ReturnColumn::State,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::OrderId => "Order ID",
            Self::ItemId => "Item ID",
            Self::Quantity => "Qty",
            Self::Reason => "Reason",
            Self::Refunded => "Refunded",
            Self::CreatedAt => "Created",
            Self::State => "Status",
        }
    }

    pub fn min_width(self) -> u16 {
        match self {
            Self::OrderId | Self::ItemId => 18,
            Self::Quantity => 5,
            Self::Reason => 20,
            Self::Refunded => 9,
            Self::CreatedAt => 17,
            Self::State => 17,
        }
    }
}

/// Value of a single table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Flag(Option<bool>),
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Flag(Some(true)) => "Yes".to_string(),
            Cell::Flag(Some(false) | None) => "No".to_string(),
        }
    }
}

impl ReturnOrder {
    pub fn cell(&self, column: ReturnColumn) -> Cell {
        match column {
            ReturnColumn::OrderId => Cell::Text(self.order_id.clone()),
            ReturnColumn::ItemId => Cell::Text(self.item_id.clone().unwrap_or_default()),
            ReturnColumn::Quantity => {
                Cell::Text(self.quantity.map(|q| q.to_string()).unwrap_or_default())
            }
            ReturnColumn::Reason => Cell::Text(self.reason.clone().unwrap_or_default()),
            ReturnColumn::Refunded => Cell::Flag(self.is_refunded),
            ReturnColumn::CreatedAt => Cell::Text(
                self.created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
            ),
            ReturnColumn::State => Cell::Text(self.state.label().to_string()),
        }
    }
}

/// Popover for choosing a decision on one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    pub row_id: String,
    pub order_id: String,
    pub highlighted: usize,
    pub selected: Option<ReturnDecision>,
}

impl ActionMenu {
    fn for_row(row: &ReturnOrder) -> Self {
        Self {
            row_id: row.id.clone(),
            order_id: row.order_id.clone(),
            highlighted: 0,
            selected: None,
        }
    }

    pub fn highlight_next(&mut self) {
        self.highlighted = (self.highlighted + 1) % ReturnDecision::ALL.len();
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self
            .highlighted
            .checked_sub(1)
            .unwrap_or(ReturnDecision::ALL.len() - 1);
    }

    /// Pick the highlighted decision
    pub fn select_highlighted(&mut self) {
        self.selected = ReturnDecision::ALL.get(self.highlighted).copied();
    }
}

/// State of the paginated return orders table
#[derive(Debug, Clone)]
pub struct ReturnsTable {
    pub rows: Vec<ReturnOrder>,
    pub total_records: usize,
    pub page: usize,
    pub rows_per_page: usize,
    pub selected_index: usize,
    pub action_menu: Option<ActionMenu>,
    pub loaded: bool,
}

impl Default for ReturnsTable {
    fn default() -> Self {
        Self::new(ROWS_PER_PAGE_OPTIONS[0])
    }
}

impl ReturnsTable {
    /// Empty table; unsupported page sizes fall back to the smallest option
    pub fn new(rows_per_page: usize) -> Self {
        let rows_per_page = if ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            rows_per_page
        } else {
            ROWS_PER_PAGE_OPTIONS[0]
        };
        Self {
            rows: Vec::new(),
            total_records: 0,
            page: 0,
            rows_per_page,
            selected_index: 0,
            action_menu: None,
            loaded: false,
        }
    }

    pub fn page_count(&self) -> usize {
        self.total_records.div_ceil(self.rows_per_page).max(1)
    }

    /// Move to a page; returns false when the page is out of range
    pub fn set_page(&mut self, page: usize) -> bool {
        if page >= self.page_count() || page == self.page {
            return false;
        }
        self.page = page;
        self.selected_index = 0;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.page.checked_sub(1) {
            Some(page) => self.set_page(page),
            None => false,
        }
    }

    /// Switch to the next page size and go back to the first page
    pub fn cycle_rows_per_page(&mut self) {
        let current = ROWS_PER_PAGE_OPTIONS
            .iter()
            .position(|&n| n == self.rows_per_page)
            .unwrap_or(0);
        self.set_rows_per_page(ROWS_PER_PAGE_OPTIONS[(current + 1) % ROWS_PER_PAGE_OPTIONS.len()]);
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page;
        self.page = 0;
        self.selected_index = 0;
    }

    /// Replace rows with a freshly loaded page
    pub fn replace(&mut self, page: ReturnOrderPage) {
        self.total_records = page.count;
        self.rows = page.data;
        self.loaded = true;
        if self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len().saturating_sub(1);
        }
    }

    pub fn selected_row(&self) -> Option<&ReturnOrder> {
        self.rows.get(self.selected_index)
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.rows.len() {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Open the action menu on the selected row if it can be updated
    pub fn open_action_menu(&mut self) -> bool {
        match self.selected_row() {
            Some(row) if row.state.is_actionable() => {
                self.action_menu = Some(ActionMenu::for_row(row));
                true
            }
            _ => false,
        }
    }

    pub fn close_action_menu(&mut self) {
        self.action_menu = None;
    }

    /// Load the current page from the server
    pub async fn refresh<C>(&mut self, api: &C) -> Result<(), ApiError>
    where
        C: ApiClientTrait + ?Sized,
    {
        let page = api
            .list_return_orders(self.page, self.rows_per_page)
            .await?;
        tracing::debug!(
            page = self.page,
            rows = page.data.len(),
            total = page.count,
            "loaded return orders"
        );
        self.replace(page);
        Ok(())
    }

    /// Send the decision chosen in the open action menu.
    ///
    /// On success the menu closes and the page is reloaded; on failure the
    /// menu stays open so the operator can retry.
    pub async fn apply_decision<C>(&mut self, api: &C, notifier: &mut dyn Notifier) -> bool
    where
        C: ApiClientTrait + ?Sized,
    {
        let Some(menu) = self.action_menu.as_ref() else {
            return false;
        };
        let Some(state) = menu.selected else {
            notifier.notify(NoticeKind::Error, "Select a status first");
            return false;
        };
        let update = ReturnStateUpdate {
            id: menu.row_id.clone(),
            state,
        };
        let order_id = menu.order_id.clone();

        tracing::info!(order_id = %order_id, item = %update.id, state = ?update.state, "updating return state");
        match api.update_return_state(&order_id, &update).await {
            Ok(()) => {
                notifier.notify(NoticeKind::Success, "Status updated successfully");
                self.close_action_menu();
                if let Err(err) = self.refresh(api).await {
                    notifier.notify(NoticeKind::Error, &err.user_message());
                }
                true
            }
            Err(err) => {
                notifier.notify(NoticeKind::Error, &err.user_message());
                false
            }
        }
    }
}
