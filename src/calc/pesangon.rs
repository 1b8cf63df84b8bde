//! Statutory severance: uang pesangon (UP), uang penghargaan masa kerja (UPMK)
//! and uang penggantian hak (UPH).
//!
//! The band boundaries and coefficients below come from labor regulation and
//! are data, not tuning knobs.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::CalcError;
use crate::model::ChoiceOption;

/// UPH is this share of UP + UPMK.
pub const UPH_RATE: f64 = 0.15;

/// UP multiplier per completed tenure band: `<1 → 1`, ..., `<8 → 8`, `≥8 → 9`.
const UP_BANDS: [(f64, u32); 8] = [
    (1.0, 1),
    (2.0, 2),
    (3.0, 3),
    (4.0, 4),
    (5.0, 5),
    (6.0, 6),
    (7.0, 7),
    (8.0, 8),
];
const UP_MAX: u32 = 9;

/// UPMK multiplier per band: nothing below 3 years, `≥24 → 10`.
const UPMK_BANDS: [(f64, u32); 8] = [
    (3.0, 0),
    (6.0, 2),
    (9.0, 3),
    (12.0, 4),
    (15.0, 5),
    (18.0, 6),
    (21.0, 7),
    (24.0, 8),
];
const UPMK_MAX: u32 = 10;

/// Termination reason; decides the coefficient applied to UP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    Efisiensi,
    Tutup,
    Pelanggaran,
    Pensiun,
    Meninggal,
    TutupRugi,
}

impl TerminationReason {
    /// Options for the reason field of the edit panel.
    pub const CHOICES: &'static [ChoiceOption] = &[
        ChoiceOption {
            value: "efisiensi",
            label: "Efisiensi",
        },
        ChoiceOption {
            value: "tutup",
            label: "Perusahaan tutup",
        },
        ChoiceOption {
            value: "pelanggaran",
            label: "Pelanggaran",
        },
        ChoiceOption {
            value: "pensiun",
            label: "Pensiun",
        },
        ChoiceOption {
            value: "meninggal",
            label: "Meninggal dunia",
        },
        ChoiceOption {
            value: "tutup_rugi",
            label: "Perusahaan tutup karena rugi",
        },
    ];

    pub fn coefficient(self) -> f64 {
        match self {
            Self::Efisiensi | Self::Tutup => 1.0,
            Self::Pelanggaran | Self::TutupRugi => 0.5,
            Self::Pensiun => 1.75,
            Self::Meninggal => 2.0,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Efisiensi => "efisiensi",
            Self::Tutup => "tutup",
            Self::Pelanggaran => "pelanggaran",
            Self::Pensiun => "pensiun",
            Self::Meninggal => "meninggal",
            Self::TutupRugi => "tutup_rugi",
        }
    }

    pub fn label(self) -> &'static str {
        Self::CHOICES
            .iter()
            .find(|c| c.value == self.code())
            .map(|c| c.label)
            .unwrap_or("")
    }
}

impl FromStr for TerminationReason {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "efisiensi" => Ok(Self::Efisiensi),
            "tutup" => Ok(Self::Tutup),
            "pelanggaran" => Ok(Self::Pelanggaran),
            "pensiun" => Ok(Self::Pensiun),
            "meninggal" => Ok(Self::Meninggal),
            "tutup_rugi" => Ok(Self::TutupRugi),
            other => Err(format!("alasan PHK '{}' tidak dikenal", other)),
        }
    }
}

/// Result of one severance calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Severance {
    pub tenure_years: f64,
    pub up_multiplier: u32,
    pub upmk_multiplier: u32,
    pub coefficient: f64,
    pub up: f64,
    pub upmk: f64,
    pub uph: f64,
    pub total: f64,
}

fn band_multiplier(bands: &[(f64, u32)], max: u32, tenure: f64) -> u32 {
    bands
        .iter()
        .find(|(limit, _)| tenure < *limit)
        .map(|&(_, multiplier)| multiplier)
        .unwrap_or(max)
}

/// Multiplier of the monthly wage for UP.
pub fn up_multiplier(tenure_years: f64) -> u32 {
    band_multiplier(&UP_BANDS, UP_MAX, tenure_years)
}

/// Multiplier of the monthly wage for UPMK.
pub fn upmk_multiplier(tenure_years: f64) -> u32 {
    band_multiplier(&UPMK_BANDS, UPMK_MAX, tenure_years)
}

/// Tenure in fractional years: completed anniversaries plus the elapsed share
/// of the current anniversary year.
pub fn tenure_years(start: NaiveDate, end: NaiveDate) -> Result<f64, CalcError> {
    if end < start {
        return Err(CalcError::EndBeforeStart { start, end });
    }

    let anniversary = |years: i32| -> Result<NaiveDate, CalcError> {
        start
            .checked_add_months(Months::new(years as u32 * 12))
            .ok_or(CalcError::DateOutOfRange)
    };

    let mut years = end.year() - start.year();
    if anniversary(years)? > end {
        years -= 1;
    }

    let last = anniversary(years)?;
    let next = anniversary(years + 1)?;
    let elapsed = (end - last).num_days() as f64;
    let span = (next - last).num_days() as f64;

    Ok(years as f64 + elapsed / span)
}

/// Severance for a known tenure.
pub fn calculate(tenure_years: f64, monthly_wage: f64, reason: TerminationReason) -> Severance {
    let up_multiplier = up_multiplier(tenure_years);
    let upmk_multiplier = upmk_multiplier(tenure_years);
    let coefficient = reason.coefficient();

    let up = up_multiplier as f64 * monthly_wage * coefficient;
    let upmk = upmk_multiplier as f64 * monthly_wage;
    let uph = UPH_RATE * (up + upmk);

    Severance {
        tenure_years,
        up_multiplier,
        upmk_multiplier,
        coefficient,
        up,
        upmk,
        uph,
        total: up + upmk + uph,
    }
}

/// Severance between a hire date and a termination date.
pub fn calculate_for_period(
    start: NaiveDate,
    end: NaiveDate,
    monthly_wage: f64,
    reason: TerminationReason,
) -> Result<Severance, CalcError> {
    Ok(calculate(tenure_years(start, end)?, monthly_wage, reason))
}
