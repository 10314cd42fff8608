use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use maison_core::analytics::{
    AnalyticsKind, CustomerAnalytics, GeographicAnalytics, ProductAnalytics, RevenueDataPoint,
};
use maison_shared::types::{DateRange, TimeRange};

use super::AnalyticsSource;
use crate::error::ClientResult;

/// The data held by one analytics resource.
///
/// `empty()` is what the resource shows before the first load and after a
/// failed one.
pub trait AnalyticsSlice: Clone + Send + Sync + 'static {
    /// Domain this slice belongs to.
    const KIND: AnalyticsKind;

    /// Value shown when nothing could be fetched.
    fn empty() -> Self;

    /// Fetches the slice from `source`.
    fn fetch<'a>(
        source: &'a dyn AnalyticsSource,
        time_range: TimeRange,
        dates: &'a DateRange,
    ) -> BoxFuture<'a, ClientResult<Self>>;
}

impl AnalyticsSlice for Vec<RevenueDataPoint> {
    const KIND: AnalyticsKind = AnalyticsKind::Revenue;

    fn empty() -> Self {
        Vec::new()
    }

    fn fetch<'a>(
        source: &'a dyn AnalyticsSource,
        time_range: TimeRange,
        dates: &'a DateRange,
    ) -> BoxFuture<'a, ClientResult<Self>> {
        async move { source.revenue(time_range, dates).await }.boxed()
    }
}

impl AnalyticsSlice for Option<CustomerAnalytics> {
    const KIND: AnalyticsKind = AnalyticsKind::Customer;

    fn empty() -> Self {
        None
    }

    fn fetch<'a>(
        source: &'a dyn AnalyticsSource,
        time_range: TimeRange,
        dates: &'a DateRange,
    ) -> BoxFuture<'a, ClientResult<Self>> {
        async move { source.customer(time_range, dates).await.map(Some) }.boxed()
    }
}

impl AnalyticsSlice for Option<ProductAnalytics> {
    const KIND: AnalyticsKind = AnalyticsKind::Product;

    fn empty() -> Self {
        None
    }

    fn fetch<'a>(
        source: &'a dyn AnalyticsSource,
        time_range: TimeRange,
        dates: &'a DateRange,
    ) -> BoxFuture<'a, ClientResult<Self>> {
        async move { source.product(time_range, dates).await.map(Some) }.boxed()
    }
}

impl AnalyticsSlice for Option<GeographicAnalytics> {
    const KIND: AnalyticsKind = AnalyticsKind::Geographic;

    fn empty() -> Self {
        None
    }

    fn fetch<'a>(
        source: &'a dyn AnalyticsSource,
        time_range: TimeRange,
        dates: &'a DateRange,
    ) -> BoxFuture<'a, ClientResult<Self>> {
        async move { source.geographic(time_range, dates).await.map(Some) }.boxed()
    }
}

/// Snapshot of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceState<T> {
    /// Last fetched data, or the empty value.
    pub data: T,
    /// Message of the last failure; cleared by a successful load.
    pub error: Option<String>,
    /// A load is in flight.
    pub loading: bool,
    /// Range of the most recent load.
    pub time_range: Option<TimeRange>,
}

/// Data, error and loading state for one analytics domain.
///
/// Loads may overlap. Only the most recently started load writes its result
/// to the shared state; an older one that finishes later leaves the state
/// alone and hands its own result back to its caller only.
pub struct AnalyticsResource<T: AnalyticsSlice> {
    source: Arc<dyn AnalyticsSource>,
    state: RwLock<ResourceState<T>>,
    generation: AtomicU64,
}

impl<T: AnalyticsSlice> AnalyticsResource<T> {
    /// Creates an unloaded resource.
    pub fn new(source: Arc<dyn AnalyticsSource>) -> Self {
        Self {
            source,
            state: RwLock::new(ResourceState {
                data: T::empty(),
                error: None,
                loading: false,
                time_range: None,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Current snapshot.
    pub async fn state(&self) -> ResourceState<T> {
        self.state.read().await.clone()
    }

    /// Loads the window ending now.
    pub async fn load(&self, time_range: TimeRange) -> ResourceState<T> {
        self.load_at(time_range, Utc::now()).await
    }

    /// Repeats the last load, or loads the default range if there was none.
    pub async fn refetch(&self) -> ResourceState<T> {
        self.refetch_or(TimeRange::default()).await
    }

    /// Repeats the last load, or loads `fallback` if there was none.
    pub async fn refetch_or(&self, fallback: TimeRange) -> ResourceState<T> {
        let time_range = self.state.read().await.time_range.unwrap_or(fallback);
        self.load(time_range).await
    }

    /// Loads the window ending at `now`.
    pub async fn load_at(&self, time_range: TimeRange, now: DateTime<Utc>) -> ResourceState<T> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.time_range = Some(time_range);
        }

        let dates = time_range.date_range(now);
        let result = T::fetch(self.source.as_ref(), time_range, &dates).await;

        let settled = match result {
            Ok(data) => ResourceState {
                data,
                error: None,
                loading: false,
                time_range: Some(time_range),
            },
            Err(e) => {
                warn!(kind = %T::KIND, time_range = %time_range, error = %e, "Analytics load failed");
                ResourceState {
                    data: T::empty(),
                    error: Some(e.to_string()),
                    loading: false,
                    time_range: Some(time_range),
                }
            }
        };

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) == generation {
            *state = settled.clone();
        } else {
            debug!(kind = %T::KIND, time_range = %time_range, "Superseded analytics load left state untouched");
        }
        settled
    }
}
