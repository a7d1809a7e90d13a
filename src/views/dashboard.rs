//! Dashboard statistics and the monthly revenue chart

use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::data::{Customer, Order};
use crate::error::Error;
use crate::notify::{Notification, Notifier};
use crate::NexCrm;

/// Number of months shown on the revenue chart
pub const CHART_MONTHS: usize = 6;

/// Revenue for one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRevenue {
    /// Short month name, e.g. `Jan`
    pub label: String,

    /// `YYYY-MM`
    pub key: String,

    pub value: f64,
}

/// Empty slots for the `months` calendar months ending with the month of
/// `today`, oldest first.
pub fn month_slots(today: NaiveDate, months: usize) -> Vec<MonthlyRevenue> {
    let current = today.year() * 12 + today.month0() as i32;

    (0..months as i32)
        .rev()
        .filter_map(|back| {
            let index = current - back;
            let year = index.div_euclid(12);
            let month = index.rem_euclid(12) as u32 + 1;
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthlyRevenue {
                label: first.format("%b").to_string(),
                key: format!("{:04}-{:02}", year, month),
                value: 0.0,
            })
        })
        .collect()
}

/// Parse an order date as a local calendar date.
///
/// Accepts RFC 3339 timestamps, naive timestamps and plain dates.
pub fn parse_order_date(text: &str) -> Option<NaiveDate> {
    parse_order_date_in(text, &Local)
}

/// Parse an order date, converting RFC 3339 timestamps into `tz`.
///
/// Naive timestamps and plain dates are taken as already being in `tz`.
pub fn parse_order_date_in<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(tz).date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Bucket order amounts into the trailing `months` local calendar months.
///
/// Orders outside the window, or with unreadable dates, land in no bucket.
pub fn monthly_revenue(orders: &[Order], today: NaiveDate, months: usize) -> Vec<MonthlyRevenue> {
    monthly_revenue_in(orders, today, months, &Local)
}

/// Like [`monthly_revenue`], with `today` and order dates read in `tz`.
pub fn monthly_revenue_in<Tz: TimeZone>(
    orders: &[Order],
    today: NaiveDate,
    months: usize,
    tz: &Tz,
) -> Vec<MonthlyRevenue> {
    let mut slots = month_slots(today, months);

    for order in orders {
        let Some(date) = parse_order_date_in(&order.date, tz) else {
            tracing::debug!(order = %order.order_id, date = %order.date, "unreadable order date");
            continue;
        };
        let key = format!("{:04}-{:02}", date.year(), date.month());
        if let Some(slot) = slots.iter_mut().find(|s| s.key == key) {
            slot.value += order.amount;
        }
    }

    slots
}

/// Figures shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub customer_count: usize,
    pub total_visits: u64,
    pub order_count: usize,
    pub total_revenue: f64,
    pub chart: Vec<MonthlyRevenue>,
}

impl DashboardStats {
    pub fn compute(customers: &[Customer], orders: &[Order], today: NaiveDate) -> Self {
        Self {
            customer_count: customers.len(),
            total_visits: customers.iter().map(|c| c.visits.unwrap_or(0)).sum(),
            order_count: orders.len(),
            total_revenue: orders.iter().map(|o| o.amount).sum(),
            chart: monthly_revenue(orders, today, CHART_MONTHS),
        }
    }
}

/// Dashboard view state
pub struct DashboardPage {
    client: NexCrm,
    notifier: Arc<dyn Notifier>,
    stats: DashboardStats,
    loading: bool,
}

impl DashboardPage {
    pub fn new(client: NexCrm, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            stats: DashboardStats::default(),
            loading: false,
        }
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch customers and orders and recompute every figure for today
    pub async fn load(&mut self) -> bool {
        self.load_at(Local::now().date_naive()).await
    }

    /// Like [`load`](Self::load), with an explicit current date.
    ///
    /// Any failure resets every figure to zero and empties the chart.
    pub async fn load_at(&mut self, today: NaiveDate) -> bool {
        self.loading = true;
        let result = self.fetch(today).await;
        self.loading = false;

        match result {
            Ok(stats) => {
                self.stats = stats;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load dashboard data");
                self.stats = DashboardStats::default();
                self.notifier.notify(
                    Notification::new("Error Loading Data")
                        .with_description(
                            "Could not load dashboard statistics. Please try again later.",
                        )
                        .destructive(),
                );
                false
            }
        }
    }

    async fn fetch(&self, today: NaiveDate) -> Result<DashboardStats, Error> {
        let data = self.client.data();
        let customers = data.list_customers().await?;
        let orders = data.list_orders().await?;
        Ok(DashboardStats::compute(&customers, &orders, today))
    }
}
