//! Human-readable rendering. JSON output goes through serde directly; these
//! helpers build the plain-text tables printed without `--json`.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use loomledger_finance::reports::{InventoryReport, OrderStats, PayrollReport};
use loomledger_finance::{Alert, ConsistencyReport, FinancialSummary};

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Pad or truncate to exactly `width` display columns.
/// Customer and fabric names may carry non-ASCII text.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    if sw <= width {
        return format!("{}{}", s, " ".repeat(width - sw));
    }
    if width < 3 {
        return s.chars().take(width).collect();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(ch);
    }
    out.push_str("..");
    out.push_str(&" ".repeat(budget - used));
    out
}

/// `1234567.5` -> `1,234,567.50`
pub(crate) fn money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, cents % 100)
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

pub fn summary(s: &FinancialSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Financial summary as of {}", s.as_of);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Revenue       {:>14}", money(s.total_revenue));
    let _ = writeln!(out, "  Expenses      {:>14}", money(s.total_expenses));
    let _ = writeln!(out, "  Net profit    {:>14}", money(s.net_profit));
    let _ = writeln!(out, "  Margin        {:>13.1}%", s.profit_margin);
    let _ = writeln!(out, "  Outstanding   {:>14}", money(s.outstanding_payments));
    let _ = writeln!(
        out,
        "  Overdue       {:>14}  ({} invoice{})",
        money(s.overdue_amount),
        s.overdue_count,
        if s.overdue_count == 1 { "" } else { "s" }
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "  {} {:>12} {:>12} {:>12}", pad_right("Month", 10), "Revenue", "Expenses", "Profit");
    for p in &s.monthly_data {
        let marker = if p.revenue_estimated { " *" } else { "" };
        let _ = writeln!(
            out,
            "  {} {:>12} {:>12} {:>12}{}",
            pad_right(&p.label, 10),
            money(p.revenue),
            money(p.expenses),
            money(p.profit),
            marker
        );
    }
    if s.monthly_data.iter().any(|p| p.revenue_estimated) {
        let _ = writeln!(out, "  * revenue estimated from the average of invoiced months");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  {} {:>12} {:>7}", pad_right("Category", 24), "Amount", "Share");
    for line in &s.expense_breakdown {
        let _ = writeln!(
            out,
            "  {} {:>12} {:>6.1}%",
            pad_right(&line.category.to_string(), 24),
            money(line.amount),
            line.percentage
        );
    }
    out
}

pub fn consistency(report: &ConsistencyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Consistency: {} (score {:.1})", report.status, report.score);
    for c in &report.checks {
        let _ = writeln!(
            out,
            "  {} {} computed {:>14}  reference {:>14}",
            if c.matches { "ok  " } else { "FAIL" },
            pad_right(&c.metric.to_string(), 9),
            money(c.computed),
            money(c.reference)
        );
    }
    out
}

pub fn alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No alerts.\n".to_string();
    }
    let mut out = String::new();
    for a in alerts {
        let _ = writeln!(
            out,
            "{} {} {}",
            pad_right(&a.kind.to_string(), 16),
            pad_right(&a.entity_id, 14),
            a.message
        );
    }
    out
}

pub fn inventory(report: &InventoryReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} items, {} m in stock, valued at {}",
        report.item_count,
        report.total_quantity,
        money(report.total_value)
    );
    if report.low_stock.is_empty() {
        return out;
    }
    let _ = writeln!(out, "Low stock:");
    for item in &report.low_stock {
        let _ = writeln!(
            out,
            "  {} {} {:>8} m  (minimum {})",
            pad_right(&item.id, 10),
            pad_right(&format!("{} {}", item.color, item.kind), 22),
            item.quantity,
            item.min_threshold
        );
    }
    out
}

pub fn orders(stats: &OrderStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} orders", stats.total_orders);
    for (status, count) in &stats.by_status {
        let _ = writeln!(out, "  {} {:>4}", pad_right(&status.to_string(), 12), count);
    }
    let _ = writeln!(out, "Completed value {:>14}", money(stats.completed_value));
    let _ = writeln!(out, "Open value      {:>14}", money(stats.open_value));
    out
}

pub fn payroll(report: &PayrollReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Salaries  {:>14}", money(report.total_salary));
    let _ = writeln!(out, "Paid      {:>14}", money(report.total_paid));
    let _ = writeln!(out, "Remaining {:>14}", money(report.total_remaining));
    for e in &report.unpaid {
        let _ = writeln!(
            out,
            "  {} {} owed {:>12}",
            pad_right(&e.id, 8),
            pad_right(&e.name, 20),
            money(e.remaining())
        );
    }
    out
}
