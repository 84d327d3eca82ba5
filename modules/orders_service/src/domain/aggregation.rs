//! Monthly order counts pivoted by order type
//!
//! The store returns plain (date, type id, count) groups; the pivot into one
//! column per order type happens here so type names never reach SQL.

use crate::contract::{MonthlyOrderCount, OrderType};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Orders counted for one day and one order type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTypeCount {
    pub date: NaiveDate,
    pub order_type: i64,
    pub orders: i64,
}

/// Column label of an order type in the monthly report
pub fn column_label(order_type: &OrderType) -> String {
    order_type.name.trim().to_lowercase()
}

/// Pivot grouped counts into one row per year-month, ascending.
///
/// Every row carries a column for each order type in `types`, zero when the
/// month had no orders of that type. Groups whose type id is not in `types`
/// are dropped.
pub fn pivot_monthly_counts(types: &[OrderType], groups: &[DailyTypeCount]) -> Vec<MonthlyOrderCount> {
    let labels: BTreeMap<i64, String> = types.iter().map(|t| (t.id, column_label(t))).collect();
    let empty_row: BTreeMap<String, i64> = labels.values().map(|l| (l.clone(), 0)).collect();

    let mut months: BTreeMap<(i32, u32), BTreeMap<String, i64>> = BTreeMap::new();
    for group in groups {
        let Some(label) = labels.get(&group.order_type) else {
            tracing::debug!(order_type = group.order_type, "dropping counts for unknown order type");
            continue;
        };
        let row = months
            .entry((group.date.year(), group.date.month()))
            .or_insert_with(|| empty_row.clone());
        *row.entry(label.clone()).or_insert(0) += group.orders;
    }

    months
        .into_iter()
        .map(|((year, month), counts)| MonthlyOrderCount {
            month: format!("{year:04}/{month:02}"),
            counts,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn types() -> Vec<OrderType> {
        vec![
            OrderType { id: 1, name: "Install".to_string() },
            OrderType { id: 2, name: "Repair".to_string() },
        ]
    }

    #[test]
    fn test_two_months_two_types() {
        let groups = vec![
            DailyTypeCount { date: day(2024, 1, 3), order_type: 1, orders: 2 },
            DailyTypeCount { date: day(2024, 1, 20), order_type: 2, orders: 1 },
            DailyTypeCount { date: day(2024, 1, 21), order_type: 1, orders: 1 },
            DailyTypeCount { date: day(2024, 2, 1), order_type: 2, orders: 4 },
        ];

        let rows = pivot_monthly_counts(&types(), &groups);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, "2024/01");
        assert_eq!(rows[0].counts["install"], 3);
        assert_eq!(rows[0].counts["repair"], 1);
        assert_eq!(rows[0].total(), 4);
        assert_eq!(rows[1].month, "2024/02");
        assert_eq!(rows[1].counts["install"], 0);
        assert_eq!(rows[1].counts["repair"], 4);
    }

    #[test]
    fn test_months_sorted_across_years() {
        let groups = vec![
            DailyTypeCount { date: day(2024, 1, 1), order_type: 1, orders: 1 },
            DailyTypeCount { date: day(2023, 12, 31), order_type: 1, orders: 1 },
        ];
        let months: Vec<_> = pivot_monthly_counts(&types(), &groups)
            .into_iter()
            .map(|r| r.month)
            .collect();
        assert_eq!(months, vec!["2023/12", "2024/01"]);
    }

    #[test]
    fn test_unknown_type_is_dropped() {
        let groups = vec![DailyTypeCount { date: day(2024, 5, 5), order_type: 99, orders: 3 }];
        assert!(pivot_monthly_counts(&types(), &groups).is_empty());
    }

    #[test]
    fn test_colliding_labels_are_summed() {
        let types = vec![
            OrderType { id: 1, name: "Repair".to_string() },
            OrderType { id: 2, name: " repair".to_string() },
        ];
        let groups = vec![
            DailyTypeCount { date: day(2024, 5, 5), order_type: 1, orders: 1 },
            DailyTypeCount { date: day(2024, 5, 6), order_type: 2, orders: 2 },
        ];
        let rows = pivot_monthly_counts(&types, &groups);
        assert_eq!(rows[0].counts.len(), 1);
        assert_eq!(rows[0].counts["repair"], 3);
    }

    #[test]
    fn test_label_keeps_unsafe_characters_out_of_sql() {
        let t = OrderType { id: 1, name: "Drop\"; --".to_string() };
        assert_eq!(column_label(&t), "drop\"; --");
    }
}
