//! Customer ledger report: running balance per entry plus a summary

use rust_decimal::Decimal;
use shared::models::{LedgerEntry, LedgerLine, LedgerRecord, LedgerReport, LedgerSummary};

use crate::money::{to_decimal, to_f64};

/// Balance after each entry: `b_i = b_{i-1} + debit_i - credit_i`, from 0
pub fn running_balances(entries: Vec<LedgerEntry>) -> Vec<LedgerLine> {
    let mut balance = Decimal::ZERO;
    entries
        .into_iter()
        .map(|entry| {
            balance = balance
                .saturating_add(to_decimal(entry.debit))
                .saturating_sub(to_decimal(entry.credit));
            LedgerLine {
                entry,
                balance: to_f64(balance),
            }
        })
        .collect()
}

pub fn summarize(entries: &[LedgerEntry]) -> LedgerSummary {
    let total = |amount: fn(&LedgerEntry) -> f64| {
        entries
            .iter()
            .fold(Decimal::ZERO, |sum, e| sum.saturating_add(to_decimal(amount(e))))
    };
    let total_debit = total(|e| e.debit);
    let total_credit = total(|e| e.credit);

    LedgerSummary {
        total_debit: to_f64(total_debit),
        total_credit: to_f64(total_credit),
        balance: to_f64(total_debit.saturating_sub(total_credit)),
    }
}

pub fn build_report(record: LedgerRecord) -> LedgerReport {
    let summary = summarize(&record.ledgers);
    let lines = running_balances(record.ledgers);

    tracing::debug!(
        entries = lines.len(),
        balance = summary.balance,
        "Ledger report built"
    );

    LedgerReport {
        customer: record.customer,
        credit_balance: record.credit_balance,
        lines,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(debit: f64, credit: f64) -> LedgerEntry {
        LedgerEntry {
            debit,
            credit,
            ..Default::default()
        }
    }

    #[test]
    fn test_running_balance() {
        let lines = running_balances(vec![entry(100.0, 0.0), entry(0.0, 30.5), entry(20.1, 0.2)]);
        let balances: Vec<f64> = lines.iter().map(|l| l.balance).collect();
        assert_eq!(balances, vec![100.0, 69.5, 89.4]);
    }

    #[test]
    fn test_summary() {
        let entries = vec![entry(100.0, 0.0), entry(0.0, 130.0)];
        let summary = summarize(&entries);
        assert_eq!(summary.total_debit, 100.0);
        assert_eq!(summary.total_credit, 130.0);
        assert_eq!(summary.balance, -30.0);
    }

    #[test]
    fn test_report_from_wire() {
        let record: LedgerRecord = serde_json::from_str(
            r#"{
                "customer": {"id": 1, "name": "Acme", "code": "C-1"},
                "credit_balance": "15",
                "ledgers": [
                    {"date": "2024-03-01", "reference": "INV-1", "debit": "250", "credit": null},
                    {"date": "2024-03-05", "reference": "PAY-1", "debit": 0, "credit": "200"}
                ]
            }"#,
        )
        .unwrap();
        let report = build_report(record);
        assert_eq!(report.credit_balance, 15.0);
        assert_eq!(report.lines[1].balance, 50.0);
        assert_eq!(report.summary.balance, 50.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["lines"][0]["reference"], "INV-1");
        assert_eq!(json["lines"][0]["balance"], 250.0);
    }

    #[test]
    fn test_empty_ledger() {
        let report = build_report(LedgerRecord::default());
        assert!(report.lines.is_empty());
        assert_eq!(report.summary, LedgerSummary::default());
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let entries = vec![entry(1e30, 0.0), entry(1e30, 0.0), entry(0.0, 1e30)];
        let summary = summarize(&entries);
        assert!(summary.total_debit > 1e28);
        assert!(summary.balance >= 0.0);
        assert_eq!(running_balances(entries).len(), 3);
    }
}
