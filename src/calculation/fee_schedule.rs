//! Fee schedule lookup.
//!
//! This module answers "which line items apply to month M for class C in
//! session S". Matching on class and session is exact and case-sensitive,
//! and results always come back in catalog insertion order so that every
//! downstream surface lists components the same way.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{AcademicMonth, FeeLineItem, FeeLineItemRecord};

/// Returns every line item in `catalog` that applies to `month` for the
/// given class and session, in catalog order.
///
/// An empty catalog or no matches yields an empty list.
///
/// # Example
///
/// ```
/// use school_fee_engine::calculation::fee_items_for_month;
/// use school_fee_engine::models::{AcademicMonth, FeeKind, FeeLineItem, FeeTypeMode};
/// use rust_decimal::Decimal;
///
/// let catalog = vec![FeeLineItem {
///     class_name: "5-A".to_string(),
///     session: "2024-25".to_string(),
///     kind: FeeKind::ExamFee,
///     amount: Decimal::new(150, 0),
///     mode: FeeTypeMode::Static,
///     months_applicable: [AcademicMonth::September].into_iter().collect(),
/// }];
///
/// assert_eq!(fee_items_for_month(&catalog, "5-A", "2024-25", AcademicMonth::September).len(), 1);
/// assert!(fee_items_for_month(&catalog, "5-A", "2024-25", AcademicMonth::October).is_empty());
/// ```
pub fn fee_items_for_month<'a>(
    catalog: &'a [FeeLineItem],
    class_name: &str,
    session: &str,
    month: AcademicMonth,
) -> Vec<&'a FeeLineItem> {
    catalog
        .iter()
        .filter(|item| item.applies_to(class_name, session, month))
        .collect()
}

/// Anything that can answer which line items apply to a class/session/month.
///
/// Implemented for plain catalogs (slices and vectors, scanned linearly) and
/// for [`FeeScheduleIndex`]. Implementations must return items in catalog
/// order.
pub trait FeeCatalog {
    /// Line items applicable to `month` for the class and session.
    fn items_for_month(
        &self,
        class_name: &str,
        session: &str,
        month: AcademicMonth,
    ) -> Vec<&FeeLineItem>;
}

impl FeeCatalog for [FeeLineItem] {
    fn items_for_month(
        &self,
        class_name: &str,
        session: &str,
        month: AcademicMonth,
    ) -> Vec<&FeeLineItem> {
        fee_items_for_month(self, class_name, session, month)
    }
}

impl FeeCatalog for Vec<FeeLineItem> {
    fn items_for_month(
        &self,
        class_name: &str,
        session: &str,
        month: AcademicMonth,
    ) -> Vec<&FeeLineItem> {
        fee_items_for_month(self, class_name, session, month)
    }
}

impl FeeCatalog for FeeScheduleIndex {
    fn items_for_month(
        &self,
        class_name: &str,
        session: &str,
        month: AcademicMonth,
    ) -> Vec<&FeeLineItem> {
        self.for_month(class_name, session, month)
    }
}

/// A fee catalog indexed by (class, session).
///
/// Within each scope, items keep the order they had in the source catalog.
#[derive(Debug, Clone, Default)]
pub struct FeeScheduleIndex {
    items: Vec<FeeLineItem>,
    by_scope: HashMap<(String, String), Vec<usize>>,
    skipped: usize,
}

impl FeeScheduleIndex {
    /// Builds an index over already-validated line items.
    pub fn new(items: Vec<FeeLineItem>) -> Self {
        let mut by_scope: HashMap<(String, String), Vec<usize>> = HashMap::new();
        for (position, item) in items.iter().enumerate() {
            by_scope
                .entry((item.class_name.clone(), item.session.clone()))
                .or_default()
                .push(position);
        }
        Self {
            items,
            by_scope,
            skipped: 0,
        }
    }

    /// Builds an index from raw catalog records.
    ///
    /// Malformed records (missing fee kind, negative amount) are logged and
    /// left out; the remaining records are indexed as usual.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FeeLineItemRecord>,
    {
        let mut skipped = 0;
        let items: Vec<FeeLineItem> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match FeeLineItem::from_record(index, record) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(error = %err, "Skipping malformed fee line item");
                    skipped += 1;
                    None
                }
            })
            .collect();

        let mut index = Self::new(items);
        index.skipped = skipped;
        index
    }

    /// Line items that apply to `month` for the class and session, in catalog order.
    pub fn for_month(
        &self,
        class_name: &str,
        session: &str,
        month: AcademicMonth,
    ) -> Vec<&FeeLineItem> {
        self.by_scope
            .get(&(class_name.to_string(), session.to_string()))
            .map(|positions| {
                positions
                    .iter()
                    .map(|&p| &self.items[p])
                    .filter(|item| item.months_applicable.contains(&month))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Distinct class names configured for `session`, in first-seen order.
    pub fn classes(&self, session: &str) -> Vec<&str> {
        let mut classes: Vec<&str> = Vec::new();
        for item in self.items.iter().filter(|i| i.session == session) {
            if !classes.contains(&item.class_name.as_str()) {
                classes.push(item.class_name.as_str());
            }
        }
        classes
    }

    /// All indexed items in catalog order.
    pub fn items(&self) -> &[FeeLineItem] {
        &self.items
    }

    /// Number of raw records rejected as malformed during construction.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no items are indexed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<FeeLineItem>> for FeeScheduleIndex {
    fn from(items: Vec<FeeLineItem>) -> Self {
        Self::new(items)
    }
}
