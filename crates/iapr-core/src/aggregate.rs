//! Aggregation rows built from parse results and their summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::category::{Category, CategoryResolver};
use crate::models::receipt::ParseResult;
use crate::receipt::rules::price_value;
use crate::receipt::ReceiptParser;
use crate::source::{InboundRecord, SourcePlatform};

/// One purchased item together with the metadata of the mail it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRow {
    pub uid: String,
    pub platform: Option<SourcePlatform>,
    pub subject: String,
    pub date: DateTime<Utc>,
    pub order_id: String,
    pub app_name: String,
    pub product_name: String,
    pub price: String,
    pub category: Category,
}

/// Spending for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total: Decimal,
    pub count: usize,
}

/// One row per extracted item; all rows share the record's metadata and
/// the result's order ID.
pub fn rows_for<R: CategoryResolver + ?Sized>(
    record: &InboundRecord,
    result: &ParseResult,
    resolver: &R,
) -> Vec<ReceiptRow> {
    result
        .items
        .iter()
        .map(|item| ReceiptRow {
            uid: record.uid.clone(),
            platform: record.platform,
            subject: record.subject.clone(),
            date: record.received_at,
            order_id: result.order_id.clone(),
            app_name: item.app_name.clone(),
            product_name: item.product_name.clone(),
            price: item.price.clone(),
            category: resolver.resolve(&item.app_name),
        })
        .collect()
}

/// Parse every record in parallel and return their rows, newest first.
///
/// Runs on the current rayon pool; install a sized pool around the call to
/// bound the worker count.
pub fn process_batch<R: CategoryResolver + Sync + ?Sized>(
    records: &[InboundRecord],
    parser: &ReceiptParser,
    resolver: &R,
) -> Vec<ReceiptRow> {
    info!("Parsing {} receipt records", records.len());

    let mut rows: Vec<ReceiptRow> = records
        .par_iter()
        .flat_map_iter(|record| {
            let result = parser.parse(&record.body);
            rows_for(record, &result, resolver)
        })
        .collect();

    // Stable, so rows of one mail keep their item order.
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    info!("Extracted {} rows from {} records", rows.len(), records.len());
    rows
}

/// Total spending and item count per month, oldest month first.
pub fn monthly_summary(rows: &[ReceiptRow]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u32), (Decimal, usize)> = BTreeMap::new();

    for row in rows {
        let entry = months
            .entry((row.date.year(), row.date.month()))
            .or_insert((Decimal::ZERO, 0));
        match entry.0.checked_add(price_value(&row.price)) {
            Some(total) => entry.0 = total,
            None => warn!("Price {} of {} overflows the monthly total", row.price, row.uid),
        }
        entry.1 += 1;
    }

    months
        .into_iter()
        .map(|((year, month), (total, count))| MonthlySummary {
            year,
            month,
            total,
            count,
        })
        .collect()
}
