//! Render - derived views turned into a displayable dashboard description.
//!
//! A [`DashboardView`] is a complete description of what is on screen:
//! building one never depends on the previous one, so the same inputs always
//! give the same view. Hosts draw it through a [`RenderSink`].

mod coordinator;
mod view;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::stats::Stats;

pub use coordinator::RenderCoordinator;
pub use view::{
    build_view, card_view, empty_state, failed_view, filter_buttons, page_markers,
    pagination_controls, placeholder_image_url, PAGE_WINDOW,
};

/// The whole dashboard as it should be displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub cards: Vec<CardView>,
    /// Present exactly when `cards` is empty.
    pub empty_state: Option<EmptyState>,
    pub filters: Vec<FilterButton>,
    /// `None` when everything fits on one page.
    pub pagination: Option<PaginationControls>,
    pub stats: Stats,
    /// Error banner text after a failed load.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub language: String,
    pub bio: String,
    pub version_label: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    pub label: String,
    /// Category value selected by this button.
    pub value: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationControls {
    pub summary: String,
    pub first: NavButton,
    pub prev: NavButton,
    pub pages: Vec<PageMarker>,
    pub next: NavButton,
    pub last: NavButton,
    pub page_sizes: Vec<PageSizeOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavButton {
    pub label: &'static str,
    pub title: &'static str,
    pub target: usize,
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageMarker {
    Page { number: usize, active: bool },
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSizeOption {
    pub size: usize,
    pub selected: bool,
}

/// Host-side renderer.
pub trait RenderSink {
    fn render(&mut self, view: &DashboardView);
}

/// Keeps every rendered view in a shared buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureRenderSink {
    rendered: Arc<Mutex<Vec<DashboardView>>>,
}

impl CaptureRenderSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer(rendered: Arc<Mutex<Vec<DashboardView>>>) -> Self {
        Self { rendered }
    }

    pub fn last(&self) -> Option<DashboardView> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DashboardView>> {
        self.rendered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RenderSink for CaptureRenderSink {
    fn render(&mut self, view: &DashboardView) {
        self.lock().push(view.clone());
    }
}
