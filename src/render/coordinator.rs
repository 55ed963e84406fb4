use tracing::debug;

use super::view::{build_view, failed_view};
use super::{DashboardView, RenderSink};
use crate::chart::{ChartSeries, ChartSink};
use crate::config::DashboardConfig;
use crate::state::{StateEvent, StateSubscriber, StateTopic};

/// Subscribes to dashboard state and keeps the sinks up to date.
///
/// Every recompute produces a full re-render. Chart series go to the chart
/// sink only when they differ from what was last drawn, which with the
/// collection chart scope means once per load.
pub struct RenderCoordinator<S: RenderSink> {
    sink: S,
    charts: Option<Box<dyn ChartSink>>,
    page_sizes: Vec<usize>,
    last_view: Option<DashboardView>,
    drawn: Vec<ChartSeries>,
}

impl<S: RenderSink> RenderCoordinator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            charts: None,
            page_sizes: DashboardConfig::default().page_size_options,
            last_view: None,
            drawn: Vec::new(),
        }
    }

    pub fn with_charts(mut self, charts: Box<dyn ChartSink>) -> Self {
        self.charts = Some(charts);
        self
    }

    pub fn with_page_sizes(mut self, page_sizes: Vec<usize>) -> Self {
        self.page_sizes = page_sizes;
        self
    }

    pub fn last_view(&self) -> Option<&DashboardView> {
        self.last_view.as_ref()
    }

    fn show(&mut self, view: DashboardView) {
        self.sink.render(&view);
        self.last_view = Some(view);
    }

    fn draw_charts(&mut self, series: &[ChartSeries]) {
        let Some(charts) = self.charts.as_mut() else {
            return;
        };
        if self.drawn.as_slice() == series {
            return;
        }
        debug!(count = series.len(), "drawing charts");
        for chart in series {
            charts.draw(&chart.container_id, &chart.spec);
        }
        self.drawn = series.to_vec();
    }
}

impl<S: RenderSink> StateSubscriber for RenderCoordinator<S> {
    fn wants(&self, topic: StateTopic) -> bool {
        matches!(topic, StateTopic::ViewsRecomputed | StateTopic::LoadFailed)
    }

    fn on_event(&mut self, event: &StateEvent<'_>) {
        match event {
            StateEvent::ViewsRecomputed { criteria, views } => {
                let view = build_view(views, criteria, &self.page_sizes);
                self.show(view);
                self.draw_charts(&views.charts);
            }
            StateEvent::LoadFailed { error } => {
                let message = format!("Failed to load users: {error}");
                let view = match self.last_view.clone() {
                    Some(mut view) => {
                        view.error = Some(message);
                        view
                    }
                    None => failed_view(message),
                };
                self.show(view);
            }
            _ => {}
        }
    }
}
