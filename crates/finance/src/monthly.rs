//! Trailing monthly revenue/expense series.
//!
//! Revenue is bucketed by invoice issue month. Expenses are not tracked per
//! month in the fixtures, so the period total is spread evenly.

use chrono::{Datelike, NaiveDate};

use loomledger_core::model::Invoice;

use crate::config::{FinanceConfig, MonthlyFallback, MAX_MONTHS};
use crate::model::MonthlyPoint;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar month as (year, month 1-12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// Step back `n` calendar months.
    pub fn back(self, n: u32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 - n as i32;
        Self { year: index.div_euclid(12), month: index.rem_euclid(12) as u32 + 1 }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn label(&self) -> String {
        format!("{} {}", MONTH_ABBR[(self.month - 1) as usize], self.year)
    }
}

/// The `count` months ending with the month of `as_of`, oldest first.
pub fn trailing_months(as_of: NaiveDate, count: u32) -> Vec<YearMonth> {
    let current = YearMonth::of(as_of);
    (0..count).rev().map(|n| current.back(n)).collect()
}

pub fn monthly_series(
    invoices: &[Invoice],
    total_expenses: f64,
    config: &FinanceConfig,
    as_of: NaiveDate,
) -> Vec<MonthlyPoint> {
    // Config fields are public; a hand-built config may skip `validate`.
    let months = trailing_months(as_of, config.months.clamp(1, MAX_MONTHS));
    let expenses = total_expenses / months.len() as f64;

    let actual: Vec<f64> = months
        .iter()
        .map(|ym| {
            invoices
                .iter()
                .filter(|inv| ym.contains(inv.issue_date))
                .map(|inv| inv.amount_received)
                .sum()
        })
        .collect();

    let estimate = match config.monthly_fallback {
        MonthlyFallback::None => None,
        MonthlyFallback::Estimate => {
            let with_revenue: Vec<f64> = actual.iter().copied().filter(|r| *r > 0.0).collect();
            if with_revenue.is_empty() {
                None
            } else {
                Some((with_revenue.iter().sum::<f64>() / with_revenue.len() as f64).floor())
            }
        }
    };

    months
        .iter()
        .zip(actual)
        .map(|(ym, revenue)| {
            let (revenue, revenue_estimated) = match estimate {
                Some(est) if revenue == 0.0 => {
                    log::warn!("{}: no invoiced revenue, reporting estimate {est}", ym.key());
                    (est, true)
                }
                _ => (revenue, false),
            };
            MonthlyPoint {
                month: ym.key(),
                label: ym.label(),
                revenue,
                expenses,
                profit: revenue - expenses,
                revenue_estimated,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn invoice(issue: &str, received: f64) -> Invoice {
        Invoice {
            id: format!("INV-{issue}"),
            customer_id: "C-1".into(),
            issue_date: date(issue),
            due_date: date(issue),
            total: received,
            amount_received: received,
        }
    }

    #[test]
    fn trailing_months_cross_year_boundary() {
        let months = trailing_months(date("2026-02-14"), 4);
        let keys: Vec<_> = months.iter().map(|m| m.key()).collect();
        assert_eq!(keys, vec!["2025-11", "2025-12", "2026-01", "2026-02"]);
        assert_eq!(months[0].label(), "Nov 2025");
    }

    #[test]
    fn revenue_bucketed_by_issue_month() {
        let invoices = vec![
            invoice("2026-10-02", 1000.0),
            invoice("2026-10-28", 500.0),
            invoice("2026-08-15", 2000.0),
            // Outside the window
            invoice("2026-03-31", 9999.0),
        ];
        let series = monthly_series(&invoices, 6000.0, &FinanceConfig::default(), date("2026-10-19"));
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month, "2026-05");
        assert_eq!(series[5].month, "2026-10");
        assert_eq!(series[5].revenue, 1500.0);
        assert_eq!(series[3].revenue, 2000.0);
        assert_eq!(series[4].revenue, 0.0);
        assert!(series.iter().all(|p| p.expenses == 1000.0));
        assert_eq!(series[5].profit, 500.0);
        assert!(series.iter().all(|p| !p.revenue_estimated));
    }

    #[test]
    fn estimate_fallback_is_flagged() {
        let config = FinanceConfig { monthly_fallback: MonthlyFallback::Estimate, ..FinanceConfig::default() };
        let invoices = vec![invoice("2026-10-02", 1000.0), invoice("2026-09-02", 2001.0)];
        let series = monthly_series(&invoices, 0.0, &config, date("2026-10-19"));

        assert_eq!(series[5].revenue, 1000.0);
        assert!(!series[5].revenue_estimated);
        // floor((1000 + 2001) / 2)
        assert_eq!(series[0].revenue, 1500.0);
        assert!(series[0].revenue_estimated);
        assert_eq!(series.iter().filter(|p| p.revenue_estimated).count(), 4);
    }

    #[test]
    fn series_length_is_clamped() {
        let huge = FinanceConfig { months: u32::MAX, ..FinanceConfig::default() };
        let series = monthly_series(&[], 7000.0, &huge, date("2026-10-19"));
        assert_eq!(series.len(), MAX_MONTHS as usize);
        assert_eq!(series.last().unwrap().month, "2026-10");
        assert_eq!(series[0].month, "2023-11");

        let zero = FinanceConfig { months: 0, ..FinanceConfig::default() };
        assert_eq!(monthly_series(&[], 7000.0, &zero, date("2026-10-19")).len(), 1);
    }

    #[test]
    fn estimate_without_any_revenue_stays_zero() {
        let config = FinanceConfig { monthly_fallback: MonthlyFallback::Estimate, ..FinanceConfig::default() };
        let series = monthly_series(&[], 7000.0, &config, date("2026-10-19"));
        assert!(series.iter().all(|p| p.revenue == 0.0 && !p.revenue_estimated));
    }

    #[test]
    fn single_month_window() {
        let config = FinanceConfig { months: 1, ..FinanceConfig::default() };
        let series = monthly_series(&[invoice("2026-10-02", 10.0)], 70.0, &config, date("2026-10-19"));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].expenses, 70.0);
        assert_eq!(series[0].profit, -60.0);
    }
}
