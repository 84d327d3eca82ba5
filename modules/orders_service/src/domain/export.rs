//! CSV invoice export

use crate::contract::{Order, ValidationError};

const HEADER: [&str; 6] = ["Id", "Date", "Type", "Price", "Company", "Observation"];

/// Render orders as CSV with a trailing `Total,,,<sum>` row.
///
/// Fails on an empty slice; there is nothing to invoice.
pub fn orders_to_csv(orders: &[Order]) -> Result<String, ValidationError> {
    if orders.is_empty() {
        return Err(ValidationError::single("Orders", "No orders to export."));
    }

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let write_err = |e: csv::Error| ValidationError::single("Orders", format!("CSV export failed: {e}"));

    writer.write_record(HEADER).map_err(write_err)?;
    for order in orders {
        writer
            .write_record([
                order.id.clone(),
                order.date.format("%Y-%m-%d").to_string(),
                order.order_type.clone(),
                order.price.to_string(),
                order.company.clone(),
                order.observation.clone().unwrap_or_default(),
            ])
            .map_err(write_err)?;
    }

    let total: f64 = orders.iter().map(|o| o.price).sum();
    writer
        .write_record(["Total", "", "", &total.to_string()])
        .map_err(write_err)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ValidationError::single("Orders", format!("CSV export failed: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ValidationError::single("Orders", format!("CSV export failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order(id: &str, price: f64, observation: Option<&str>) -> Order {
        Order {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            order_type: "Repair".to_string(),
            company: "Acme".to_string(),
            price,
            observation: observation.map(str::to_string),
        }
    }

    #[test]
    fn test_header_rows_and_total() {
        let csv = orders_to_csv(&[order("A", 10.0, None), order("B", 5.0, None)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Id,Date,Type,Price,Company,Observation");
        assert_eq!(lines[1], "A,2024-04-02,Repair,10,Acme,");
        assert_eq!(lines[2], "B,2024-04-02,Repair,5,Acme,");
        assert_eq!(lines[3], "Total,,,15");
    }

    #[test]
    fn test_fractional_total() {
        let csv = orders_to_csv(&[order("A", 10.25, None), order("B", 0.5, None)]).unwrap();
        assert_eq!(csv.lines().last(), Some("Total,,,10.75"));
    }

    #[test]
    fn test_observation_with_separator_is_quoted() {
        let csv = orders_to_csv(&[order("A", 1.0, Some("left, at door"))]).unwrap();
        assert!(csv.contains("\"left, at door\""));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = orders_to_csv(&[]).unwrap_err();
        assert!(err.has_field("Orders"));
    }
}
