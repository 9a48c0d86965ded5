//! CSV export of a [`FinancialSummary`].
//!
//! Long format, one value per row: `section,label,metric,value`.

use std::io::Write;

use crate::error::FinanceError;
use crate::model::FinancialSummary;

pub const CSV_HEADER: [&str; 4] = ["section", "label", "metric", "value"];

pub fn write_summary_csv<W: Write>(summary: &FinancialSummary, writer: W) -> Result<(), FinanceError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut row = |section: &str, label: &str, metric: &str, value: String| {
        wtr.write_record([section, label, metric, value.as_str()])
            .map_err(|e| FinanceError::Export(e.to_string()))
    };

    row(CSV_HEADER[0], CSV_HEADER[1], CSV_HEADER[2], CSV_HEADER[3].to_string())?;

    let as_of = summary.as_of.to_string();
    let totals = [
        ("total_revenue", summary.total_revenue),
        ("total_expenses", summary.total_expenses),
        ("net_profit", summary.net_profit),
        ("profit_margin", summary.profit_margin),
        ("outstanding_payments", summary.outstanding_payments),
        ("overdue_amount", summary.overdue_amount),
    ];
    for (metric, value) in totals {
        row("totals", &as_of, metric, value.to_string())?;
    }
    row("totals", &as_of, "overdue_count", summary.overdue_count.to_string())?;

    for point in &summary.monthly_data {
        row("monthly", &point.month, "revenue", point.revenue.to_string())?;
        row("monthly", &point.month, "expenses", point.expenses.to_string())?;
        row("monthly", &point.month, "profit", point.profit.to_string())?;
        row("monthly", &point.month, "revenue_estimated", point.revenue_estimated.to_string())?;
    }

    for line in &summary.expense_breakdown {
        let label = line.category.to_string();
        row("breakdown", &label, "amount", line.amount.to_string())?;
        row("breakdown", &label, "percentage", line.percentage.to_string())?;
    }

    wtr.flush().map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}

pub fn summary_csv_string(summary: &FinancialSummary) -> Result<String, FinanceError> {
    let mut buf = Vec::new();
    write_summary_csv(summary, &mut buf)?;
    String::from_utf8(buf).map_err(|e| FinanceError::Export(e.to_string()))
}
