//! Derived fields - pure functions that turn model values into display values.
//!
//! - `format` - rupiah, Indonesian dates, spelled-out numbers
//! - `kpr` - mortgage simulation with a fixed and a floating rate phase
//! - `pesangon` - statutory severance (UP, UPMK, UPH)
//!
//! Everything here is deterministic and side-effect free, so the preview and
//! the print surface always agree.

pub mod format;
pub mod kpr;
pub mod pesangon;

use chrono::NaiveDate;
use thiserror::Error;

/// Inputs a calculator cannot work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("tenor harus lebih dari 0 bulan")]
    NonPositiveTenor,
    #[error("tenor {years} tahun melebihi batas {max} tahun")]
    TenorTooLong { years: f64, max: f64 },
    #[error("uang muka {0}% harus di antara 0% dan 100%")]
    DownPaymentOutOfRange(f64),
    #[error("masa bunga tetap ({fixed} bulan) melebihi tenor ({tenor} bulan)")]
    FixedTermExceedsTenor { fixed: u32, tenor: u32 },
    #[error("tanggal berhenti {end} sebelum tanggal masuk {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("tanggal di luar jangkauan kalender")]
    DateOutOfRange,
}

pub use format::{format_long_date, format_percent, format_rupiah, terbilang};
