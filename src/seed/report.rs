//! Seed run accounting.

use crate::core::InsertOutcome;
use std::fmt;

/// Counters for one table.
///
/// `attempted` always equals `inserted + skipped + failed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableReport {
    /// Table name
    pub table: String,
    /// Records in the dataset for this table
    pub attempted: usize,
    /// Rows actually written
    pub inserted: usize,
    /// Rows that already existed
    pub skipped: usize,
    /// Rows that failed and were left out (row-tolerant runs only)
    pub failed: usize,
}

impl TableReport {
    /// Empty counters for `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            attempted: 0,
            inserted: 0,
            skipped: 0,
            failed: 0,
        }
    }

    pub(crate) fn record(&mut self, outcome: InsertOutcome) {
        self.attempted += 1;
        match outcome {
            InsertOutcome::Inserted => self.inserted += 1,
            InsertOutcome::Skipped => self.skipped += 1,
        }
    }

    pub(crate) fn record_failure(&mut self) {
        self.attempted += 1;
        self.failed += 1;
    }
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} attempted, {} inserted, {} skipped, {} failed",
            self.table, self.attempted, self.inserted, self.skipped, self.failed
        )
    }
}

/// Counters for a whole seed run, in seed order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// One entry per table, users first
    pub tables: Vec<TableReport>,
}

impl SeedReport {
    /// Counters for `table`, if it was seeded.
    #[must_use]
    pub fn table(&self, table: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == table)
    }

    /// Rows written across all tables.
    #[must_use]
    pub fn total_inserted(&self) -> usize {
        self.tables.iter().map(|t| t.inserted).sum()
    }

    /// Rows that failed across all tables.
    #[must_use]
    pub fn total_failed(&self) -> usize {
        self.tables.iter().map(|t| t.failed).sum()
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, table) in self.tables.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{table}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_add_up() {
        let mut report = TableReport::new("users");
        report.record(InsertOutcome::Inserted);
        report.record(InsertOutcome::Skipped);
        report.record_failure();

        assert_eq!(report.attempted, 3);
        assert_eq!(
            report.attempted,
            report.inserted + report.skipped + report.failed
        );
        assert_eq!(
            report.to_string(),
            "users: 3 attempted, 1 inserted, 1 skipped, 1 failed"
        );
    }

    #[test]
    fn test_seed_report_totals() {
        let mut users = TableReport::new("users");
        users.record(InsertOutcome::Inserted);
        let mut revenue = TableReport::new("revenue");
        revenue.record(InsertOutcome::Inserted);
        revenue.record_failure();

        let report = SeedReport {
            tables: vec![users, revenue],
        };
        assert_eq!(report.total_inserted(), 2);
        assert_eq!(report.total_failed(), 1);
        assert!(report.table("revenue").is_some());
        assert!(report.table("sites").is_none());
    }
}
