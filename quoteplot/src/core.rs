use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use chrono_tz::Tz;
use tokio::sync::Mutex;

use quoteplot_core::{
    ChartFrame, DataRequest, DisplayMode, PairKey, QuotePlotConfig, QuotePlotError, QuoteRecord,
    QuoteSource, RequestSequencer, Resampled, TableView, Ticket, TimeRange, ViewportEntry,
    ViewportManager, ViewportStore, ViewportWindow, chart_frame, resample_with_step, table_view,
};

/// Outcome of one refresh under "last request wins" ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh<T> {
    /// The result is the newest one; show it.
    Applied {
        /// Ticket of this refresh.
        ticket: Ticket,
        /// The computed view.
        value: T,
    },
    /// A newer refresh was applied first; drop this result.
    Superseded {
        /// Ticket of this refresh.
        ticket: Ticket,
        /// Sequence number of the newest applied refresh.
        latest: u64,
    },
}

impl<T> Refresh<T> {
    /// Ticket of the refresh this outcome belongs to.
    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::Applied { ticket, .. } | Self::Superseded { ticket, .. } => *ticket,
        }
    }

    /// Returns `true` if the result was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// The applied value, or `None` if superseded.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied { value, .. } => Some(value),
            Self::Superseded { .. } => None,
        }
    }
}

/// Everything needed to redraw the chart after one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartUpdate {
    /// The resampled pair the frame was built from.
    pub data: Resampled,
    /// Labels and datasets for the chart widget.
    pub frame: ChartFrame,
    /// Window to show: the recorded one for the pair, else the default.
    /// `None` when there is no data.
    pub viewport: Option<ViewportWindow>,
}

/// Orchestrator that fetches a series pair, aligns it and projects it into
/// chart and table views.
pub struct QuotePlot {
    source: Arc<dyn QuoteSource>,
    cfg: QuotePlotConfig,
    viewports: Mutex<ViewportManager>,
    chart_seq: RequestSequencer,
    table_seq: RequestSequencer,
}

/// Builder for constructing a `QuotePlot` orchestrator with custom
/// configuration.
pub struct QuotePlotBuilder {
    source: Option<Arc<dyn QuoteSource>>,
    store: Option<Box<dyn ViewportStore>>,
    cfg: QuotePlotConfig,
}

impl Default for QuotePlotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotePlotBuilder {
    /// Create a new builder with default configuration and no source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            store: None,
            cfg: QuotePlotConfig::default(),
        }
    }

    /// Register the quote source. A later call replaces an earlier one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn QuoteSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: QuotePlotConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Width of the default viewport (5 minutes unless set).
    #[must_use]
    pub const fn default_window(mut self, window: Duration) -> Self {
        self.cfg.default_window = window;
        self
    }

    /// Keep at most `capacity` recorded viewports, evicting the least recently
    /// used pair. Ignored when an explicit store is set.
    #[must_use]
    pub const fn viewport_capacity(mut self, capacity: usize) -> Self {
        self.cfg.viewport_capacity = Some(capacity);
        self
    }

    /// Maximum number of records requested per fetch.
    #[must_use]
    pub const fn fetch_limit(mut self, limit: usize) -> Self {
        self.cfg.fetch_limit = limit;
        self
    }

    /// Timeout applied to each fetch from the source.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.fetch_timeout = timeout;
        self
    }

    /// Rows shown by [`QuotePlot::table`] when the caller passes `None`.
    #[must_use]
    pub const fn table_rows(mut self, rows: usize) -> Self {
        self.cfg.table_rows = rows;
        self
    }

    /// Timezone used for table timestamps.
    #[must_use]
    pub const fn table_timezone(mut self, tz: Tz) -> Self {
        self.cfg.table_timezone = tz;
        self
    }

    /// Display mode used by [`QuotePlot::chart`].
    #[must_use]
    pub const fn display_mode(mut self, mode: DisplayMode) -> Self {
        self.cfg.display_mode = mode;
        self
    }

    /// Spacing of the canonical timeline.
    #[must_use]
    pub const fn step_ms(mut self, step: std::num::NonZeroU32) -> Self {
        self.cfg.step_ms = step;
        self
    }

    /// Use a custom viewport store instead of the in-memory or LRU default.
    #[must_use]
    pub fn viewport_store(mut self, store: Box<dyn ViewportStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the `QuotePlot` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no source was registered via [`with_source`],
    /// if the fetch limit is zero, or if the default window does not fit a
    /// chrono duration.
    ///
    /// [`with_source`]: Self::with_source
    pub fn build(self) -> Result<QuotePlot, QuotePlotError> {
        let Some(source) = self.source else {
            return Err(QuotePlotError::InvalidArg(
                "no quote source registered; add one via with_source(...)".to_string(),
            ));
        };
        if self.cfg.fetch_limit == 0 {
            return Err(QuotePlotError::InvalidArg(
                "fetch limit must be greater than zero".to_string(),
            ));
        }
        let span = TimeDelta::from_std(self.cfg.default_window).map_err(|_| {
            QuotePlotError::InvalidArg(format!(
                "default window out of range: {:?}",
                self.cfg.default_window
            ))
        })?;

        let manager = match (self.store, self.cfg.viewport_capacity) {
            (Some(store), _) => ViewportManager::new(store),
            (None, Some(cap)) => ViewportManager::bounded(cap),
            (None, None) => ViewportManager::in_memory(),
        }
        .with_default_span(span);

        Ok(QuotePlot {
            source,
            cfg: self.cfg,
            viewports: Mutex::new(manager),
            chart_seq: RequestSequencer::new(),
            table_seq: RequestSequencer::new(),
        })
    }
}

impl QuotePlot {
    /// Start building a new `QuotePlot` instance.
    #[must_use]
    pub fn builder() -> QuotePlotBuilder {
        QuotePlotBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &QuotePlotConfig {
        &self.cfg
    }

    /// Wrap a source future with a timeout and standardized timeout error
    /// mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quoteplot::core::source_call_with_timeout",
            skip(fut),
            fields(
                source = source_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    async fn source_call_with_timeout<Fut>(
        source_name: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<Vec<QuoteRecord>, QuotePlotError>
    where
        Fut: core::future::Future<Output = Result<Vec<QuoteRecord>, QuotePlotError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(QuotePlotError::timeout(source_name)))
    }

    async fn fetch_aligned(
        &self,
        pair: &PairKey,
        range: TimeRange,
    ) -> Result<Resampled, QuotePlotError> {
        let req = DataRequest::new(pair.clone(), range, self.cfg.fetch_limit);
        let name = self.source.name();
        let records =
            Self::source_call_with_timeout(name, self.cfg.fetch_timeout, self.source.fetch(&req))
                .await;
        #[cfg(feature = "tracing")]
        if let Err(e) = &records {
            tracing::warn!(source = name, pair = %pair, error = %e, "quote fetch failed");
        }
        Ok(resample_with_step(records?, &pair.a, &pair.b, self.cfg.step_ms))
    }

    /// Refresh the chart for `pair` in the configured display mode.
    ///
    /// # Errors
    /// Returns the source's error, or `Timeout` if the fetch exceeded the
    /// configured timeout. A failed refresh leaves sequencing and viewport
    /// state untouched.
    pub async fn chart(
        &self,
        pair: &PairKey,
        range: TimeRange,
    ) -> Result<Refresh<ChartUpdate>, QuotePlotError> {
        self.chart_with_mode(pair, range, self.cfg.display_mode)
            .await
    }

    /// Refresh the chart for `pair` in an explicit display mode.
    ///
    /// # Errors
    /// Same as [`chart`](Self::chart).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quoteplot::core::chart",
            skip(self, pair, range),
            fields(pair = %pair, range = %range),
        )
    )]
    pub async fn chart_with_mode(
        &self,
        pair: &PairKey,
        range: TimeRange,
        mode: DisplayMode,
    ) -> Result<Refresh<ChartUpdate>, QuotePlotError> {
        let ticket = self.chart_seq.issue();
        let data = self.fetch_aligned(pair, range).await?;
        let frame = chart_frame(&data, mode);

        // Admission and viewport lookup happen under one lock so a stale
        // refresh cannot interleave with a newer one.
        let mut viewports = self.viewports.lock().await;
        if !self.chart_seq.admit(ticket) {
            let latest = self.chart_seq.last_admitted();
            #[cfg(feature = "tracing")]
            tracing::debug!(%ticket, latest, "dropping superseded chart refresh");
            return Ok(Refresh::Superseded { ticket, latest });
        }
        let viewport = viewports.resolve_default(pair, &data.timeline);
        drop(viewports);

        Ok(Refresh::Applied {
            ticket,
            value: ChartUpdate {
                data,
                frame,
                viewport,
            },
        })
    }

    /// Refresh the spread table for `pair`. `rows` defaults to the configured
    /// row count.
    ///
    /// The table has its own sequence, independent of chart refreshes.
    ///
    /// # Errors
    /// Same as [`chart`](Self::chart).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quoteplot::core::table",
            skip(self, pair, range),
            fields(pair = %pair, range = %range),
        )
    )]
    pub async fn table(
        &self,
        pair: &PairKey,
        range: TimeRange,
        rows: Option<usize>,
    ) -> Result<Refresh<TableView>, QuotePlotError> {
        let ticket = self.table_seq.issue();
        let data = self.fetch_aligned(pair, range).await?;
        let view = table_view(
            &data,
            rows.unwrap_or(self.cfg.table_rows),
            self.cfg.table_timezone,
        );
        if !self.table_seq.admit(ticket) {
            let latest = self.table_seq.last_admitted();
            #[cfg(feature = "tracing")]
            tracing::debug!(%ticket, latest, "dropping superseded table refresh");
            return Ok(Refresh::Superseded { ticket, latest });
        }
        Ok(Refresh::Applied {
            ticket,
            value: view,
        })
    }

    /// Refresh chart and table for `pair` concurrently.
    pub async fn refresh(
        &self,
        pair: &PairKey,
        range: TimeRange,
    ) -> (
        Result<Refresh<ChartUpdate>, QuotePlotError>,
        Result<Refresh<TableView>, QuotePlotError>,
    ) {
        futures::join!(self.chart(pair, range), self.table(pair, range, None))
    }

    /// Record the window the user panned or zoomed to for `pair`.
    pub async fn record_pan(&self, pair: &PairKey, window: ViewportWindow) {
        self.viewports.lock().await.record_pan(pair, window);
    }

    /// Forget the recorded window for `pair`; the next chart refresh shows the
    /// default window again.
    pub async fn reset_zoom(&self, pair: &PairKey) -> Option<ViewportWindow> {
        self.viewports.lock().await.clear(pair)
    }

    /// Window to show for `pair` over `timeline`, recorded or default.
    pub async fn viewport(
        &self,
        pair: &PairKey,
        timeline: &[chrono::DateTime<chrono::Utc>],
    ) -> Option<ViewportWindow> {
        self.viewports.lock().await.resolve_default(pair, timeline)
    }

    /// Snapshot every recorded viewport for durable storage.
    pub async fn export_viewports(&self) -> Vec<ViewportEntry> {
        self.viewports.lock().await.export()
    }

    /// Restore viewports from a previous [`export_viewports`](Self::export_viewports).
    pub async fn import_viewports(&self, entries: Vec<ViewportEntry>) {
        self.viewports.lock().await.import(entries);
    }
}
