use std::sync::Arc;

use maison_core::analytics::{
    AnalyticsKind, CustomerAnalytics, GeographicAnalytics, ProductAnalytics, RevenueDataPoint,
};
use maison_core::dashboard::DashboardData;
use maison_shared::types::TimeRange;

use super::{AnalyticsResource, AnalyticsSlice, AnalyticsSource, ResourceState};

/// The four analytics resources behind the admin dashboard.
pub struct DashboardLoader {
    revenue: AnalyticsResource<Vec<RevenueDataPoint>>,
    customer: AnalyticsResource<Option<CustomerAnalytics>>,
    product: AnalyticsResource<Option<ProductAnalytics>>,
    geographic: AnalyticsResource<Option<GeographicAnalytics>>,
}

impl DashboardLoader {
    /// Creates unloaded resources sharing one source.
    pub fn new(source: Arc<dyn AnalyticsSource>) -> Self {
        Self {
            revenue: AnalyticsResource::new(Arc::clone(&source)),
            customer: AnalyticsResource::new(Arc::clone(&source)),
            product: AnalyticsResource::new(Arc::clone(&source)),
            geographic: AnalyticsResource::new(source),
        }
    }

    /// Loads every domain concurrently.
    pub async fn load(&self, time_range: TimeRange) -> DashboardData {
        self.load_kinds(time_range, &AnalyticsKind::ALL).await
    }

    /// Loads only `kinds`, concurrently; the other slices stay `None`.
    ///
    /// A failing domain records its error and leaves its slice empty without
    /// affecting the others.
    pub async fn load_kinds(&self, time_range: TimeRange, kinds: &[AnalyticsKind]) -> DashboardData {
        let (revenue, customer, product, geographic) = tokio::join!(
            load_if(&self.revenue, time_range, kinds),
            load_if(&self.customer, time_range, kinds),
            load_if(&self.product, time_range, kinds),
            load_if(&self.geographic, time_range, kinds),
        );

        let mut data = DashboardData {
            time_range,
            ..DashboardData::default()
        };
        data.revenue = settle(&mut data, AnalyticsKind::Revenue, revenue);
        data.customer = settle(&mut data, AnalyticsKind::Customer, customer).flatten();
        data.product = settle(&mut data, AnalyticsKind::Product, product).flatten();
        data.geographic = settle(&mut data, AnalyticsKind::Geographic, geographic).flatten();
        data
    }

    /// Repeats the last load of one domain, or loads `fallback` if that
    /// domain was never loaded. Only that slice is set in the result.
    pub async fn refetch(&self, kind: AnalyticsKind, fallback: TimeRange) -> DashboardData {
        let mut data = DashboardData::default();
        match kind {
            AnalyticsKind::Revenue => {
                data.revenue = refetch_into(&self.revenue, fallback, &mut data).await;
            }
            AnalyticsKind::Customer => {
                data.customer = refetch_into(&self.customer, fallback, &mut data).await.flatten();
            }
            AnalyticsKind::Product => {
                data.product = refetch_into(&self.product, fallback, &mut data).await.flatten();
            }
            AnalyticsKind::Geographic => {
                data.geographic = refetch_into(&self.geographic, fallback, &mut data)
                    .await
                    .flatten();
            }
        }
        data
    }
}

async fn refetch_into<T: AnalyticsSlice>(
    resource: &AnalyticsResource<T>,
    fallback: TimeRange,
    data: &mut DashboardData,
) -> Option<T> {
    let state = resource.refetch_or(fallback).await;
    data.time_range = state.time_range.unwrap_or(fallback);
    settle(data, T::KIND, Some(state))
}

async fn load_if<T: AnalyticsSlice>(
    resource: &AnalyticsResource<T>,
    time_range: TimeRange,
    kinds: &[AnalyticsKind],
) -> Option<ResourceState<T>> {
    if kinds.contains(&T::KIND) {
        Some(resource.load(time_range).await)
    } else {
        None
    }
}

/// Moves a resource snapshot into the dashboard, recording its error.
fn settle<T>(
    data: &mut DashboardData,
    kind: AnalyticsKind,
    state: Option<ResourceState<T>>,
) -> Option<T> {
    let state = state?;
    data.loading |= state.loading;
    match state.error {
        Some(error) => {
            data.errors.insert(kind, error);
            None
        }
        None => Some(state.data),
    }
}
