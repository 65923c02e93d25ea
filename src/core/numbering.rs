use chrono::{Datelike, NaiveDate};

use super::error::GstError;
use super::types::DocumentKind;

/// Gapless document number sequence per Indian financial year.
///
/// Generates numbers in the format `{prefix}/{financial year}/{sequential}`,
/// e.g. "INV/2024-25/0001", "INV/2024-25/0002", etc.
///
/// Rule 46 of the CGST Rules requires tax invoice numbers to be
/// consecutive and unique within a financial year (1 April – 31 March).
#[derive(Debug, Clone)]
pub struct DocumentNumberSequence {
    prefix: String,
    year: i32,
    next_number: u64,
    zero_pad: usize,
}

impl DocumentNumberSequence {
    /// Create a new sequence starting at 1. `year` is the calendar year in
    /// which the financial year starts (2024 for FY 2024-25).
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next_number: 1,
            zero_pad: 4,
        }
    }

    /// Create a sequence with the default prefix of a document kind.
    pub fn for_kind(kind: DocumentKind, year: i32) -> Self {
        Self::new(kind.prefix(), year)
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(prefix: impl Into<String>, year: i32, next_number: u64) -> Self {
        Self {
            next_number,
            ..Self::new(prefix, year)
        }
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Generate the next document number.
    pub fn next_number(&mut self) -> String {
        let number = self.format(self.next_number);
        self.next_number += 1;
        number
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    /// Start year of the current financial year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Get the next number that will be issued (without prefix/formatting).
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Advance to a new financial year, resetting the counter to 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), GstError> {
        if new_year <= self.year {
            return Err(GstError::Numbering(format!(
                "new financial year {} must be after current financial year {}",
                financial_year_label(new_year),
                financial_year_label(self.year)
            )));
        }
        self.year = new_year;
        self.next_number = 1;
        Ok(())
    }

    /// Auto-advance if the given date falls in a later financial year.
    /// Returns true if the year was advanced.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        let fy = financial_year_of(date);
        if fy > self.year {
            tracing::debug!(
                prefix = %self.prefix,
                from = %financial_year_label(self.year),
                to = %financial_year_label(fy),
                "document numbering rolled over"
            );
            self.year = fy;
            self.next_number = 1;
            true
        } else {
            false
        }
    }

    fn format(&self, number: u64) -> String {
        format!(
            "{}/{}/{:0>width$}",
            self.prefix,
            financial_year_label(self.year),
            number,
            width = self.zero_pad
        )
    }
}

/// Start year of the financial year containing `date`.
///
/// January to March belong to the financial year that started the
/// previous April.
pub fn financial_year_of(date: NaiveDate) -> i32 {
    if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Short label of a financial year, e.g. `2024-25`.
pub fn financial_year_label(start_year: i32) -> String {
    format!("{}-{:02}", start_year, (start_year + 1).rem_euclid(100))
}
