//! KPR (mortgage) simulation.
//!
//! The loan runs in two phases: a promotional fixed rate for the first years,
//! then a floating rate for the rest of the tenor. Payments use the standard
//! annuity formula, with straight-line division when a rate is exactly zero.

use serde::{Deserialize, Serialize};

use super::CalcError;

/// Bank provision, share of the loan.
pub const PROVISION_RATE: f64 = 0.01;
/// Flat administration fee.
pub const ADMIN_FEE: f64 = 500_000.0;
/// Flat property appraisal fee.
pub const APPRAISAL_FEE: f64 = 1_000_000.0;
/// Life and fire insurance, share of the loan.
pub const INSURANCE_RATE: f64 = 0.025;
/// Notary fee, share of the property price.
pub const NOTARY_RATE: f64 = 0.01;
/// BPHTB transfer tax rate.
pub const BPHTB_RATE: f64 = 0.05;
/// Tax-free acquisition value (NPOPTKP) deducted before BPHTB.
pub const BPHTB_THRESHOLD: f64 = 80_000_000.0;

/// Payment-to-income ratio (percent) above which the loan needs attention.
pub const WARNING_RATIO: f64 = 30.0;
/// Payment-to-income ratio (percent) above which the loan is unaffordable.
pub const DANGER_RATIO: f64 = 35.0;
/// Longest tenor a simulation accepts.
pub const MAX_TENOR_YEARS: f64 = 50.0;

/// Raw simulation inputs, rates and down payment in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KprInput {
    pub price: f64,
    pub down_payment_percent: f64,
    pub fixed_rate_percent: f64,
    pub fixed_years: f64,
    pub floating_rate_percent: f64,
    pub tenor_years: f64,
    pub monthly_income: f64,
}

/// Affordability band of the fixed-phase payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affordability {
    Safe,
    Warning,
    Danger,
}

impl Affordability {
    /// `> 35` is danger, `> 30` is warning, anything else is safe.
    pub fn classify(ratio_percent: f64) -> Self {
        if ratio_percent > DANGER_RATIO {
            Self::Danger
        } else if ratio_percent > WARNING_RATIO {
            Self::Warning
        } else {
            Self::Safe
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "Aman",
            Self::Warning => "Waspada",
            Self::Danger => "Berisiko",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Self::Safe => "Cicilan berada dalam batas wajar (maksimal 30% dari penghasilan).",
            Self::Warning => {
                "Cicilan mendekati batas maksimal. Pertimbangkan uang muka lebih besar atau tenor lebih panjang."
            }
            Self::Danger => {
                "Cicilan melebihi 35% dari penghasilan dan berpotensi ditolak oleh bank."
            }
        }
    }
}

/// One-time costs due at loan signing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosingCosts {
    pub provision: f64,
    pub admin: f64,
    pub appraisal: f64,
    pub insurance: f64,
    pub notary: f64,
    pub bphtb: f64,
}

impl ClosingCosts {
    pub fn estimate(price: f64, loan: f64) -> Self {
        Self {
            provision: loan * PROVISION_RATE,
            admin: ADMIN_FEE,
            appraisal: APPRAISAL_FEE,
            insurance: loan * INSURANCE_RATE,
            notary: price * NOTARY_RATE,
            bphtb: BPHTB_RATE * (price - BPHTB_THRESHOLD).max(0.0),
        }
    }

    pub fn total(&self) -> f64 {
        self.provision + self.admin + self.appraisal + self.insurance + self.notary + self.bphtb
    }
}

/// Payments for one year of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub annual_rate_percent: f64,
    pub monthly_payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Full simulation output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KprSimulation {
    pub loan: f64,
    pub down_payment: f64,
    pub total_months: u32,
    pub fixed_months: u32,
    pub floating_months: u32,
    pub fixed_payment: f64,
    pub remaining_principal: f64,
    pub floating_payment: f64,
    pub costs: ClosingCosts,
    /// Down payment plus closing costs.
    pub upfront_cash: f64,
    pub ratio_percent: f64,
    pub affordability: Affordability,
    pub schedule: Vec<AmortizationYear>,
}

fn years_to_months(years: f64) -> u32 {
    (years * 12.0).round().max(0.0) as u32
}

/// `(1 + rate)^-months`, exact for any month count.
fn discount(monthly_rate: f64, months: u32) -> f64 {
    match i32::try_from(months) {
        Ok(n) => (1.0 + monthly_rate).powi(-n),
        Err(_) => (1.0 + monthly_rate).powf(-f64::from(months)),
    }
}

/// Monthly annuity payment; straight-line when the rate is zero.
pub fn annuity_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return principal / months as f64;
    }
    (principal * monthly_rate) / (1.0 - discount(monthly_rate, months))
}

/// Principal left after the fixed phase.
///
/// Closed form: the present value of the remaining fixed-rate payments.
/// With a zero rate it is what straight-line payments leave behind.
pub fn remaining_principal(
    principal: f64,
    payment: f64,
    monthly_rate: f64,
    elapsed_months: u32,
    remaining_months: u32,
) -> f64 {
    if monthly_rate == 0.0 {
        return principal - payment * elapsed_months as f64;
    }
    (payment / monthly_rate) * (1.0 - discount(monthly_rate, remaining_months))
}

/// Run the simulation.
pub fn simulate(input: &KprInput) -> Result<KprSimulation, CalcError> {
    if !(0.0..=100.0).contains(&input.down_payment_percent) {
        return Err(CalcError::DownPaymentOutOfRange(input.down_payment_percent));
    }

    if input.tenor_years > MAX_TENOR_YEARS {
        return Err(CalcError::TenorTooLong {
            years: input.tenor_years,
            max: MAX_TENOR_YEARS,
        });
    }
    let total_months = years_to_months(input.tenor_years);
    if total_months == 0 {
        return Err(CalcError::NonPositiveTenor);
    }
    let fixed_months = years_to_months(input.fixed_years);
    if fixed_months > total_months {
        return Err(CalcError::FixedTermExceedsTenor {
            fixed: fixed_months,
            tenor: total_months,
        });
    }
    let floating_months = total_months - fixed_months;

    let loan = input.price * (1.0 - input.down_payment_percent / 100.0);
    let down_payment = input.price - loan;

    let fixed_rate = input.fixed_rate_percent / 100.0 / 12.0;
    let floating_rate = input.floating_rate_percent / 100.0 / 12.0;

    let fixed_payment = annuity_payment(loan, fixed_rate, total_months);
    let remaining = if floating_months == 0 {
        0.0
    } else {
        remaining_principal(loan, fixed_payment, fixed_rate, fixed_months, floating_months)
    };
    let floating_payment = annuity_payment(remaining, floating_rate, floating_months);

    let costs = ClosingCosts::estimate(input.price, loan);
    let ratio_percent = if input.monthly_income > 0.0 {
        fixed_payment / input.monthly_income * 100.0
    } else {
        f64::INFINITY
    };

    let schedule = amortization_schedule(
        loan,
        (fixed_months, fixed_rate, fixed_payment),
        (floating_months, floating_rate, floating_payment),
        (input.fixed_rate_percent, input.floating_rate_percent),
    );

    Ok(KprSimulation {
        loan,
        down_payment,
        total_months,
        fixed_months,
        floating_months,
        fixed_payment,
        remaining_principal: remaining,
        floating_payment,
        upfront_cash: down_payment + costs.total(),
        costs,
        ratio_percent,
        affordability: Affordability::classify(ratio_percent),
        schedule,
    })
}

/// Yearly schedule, one row per loan year (a partial last year included).
fn amortization_schedule(
    loan: f64,
    fixed: (u32, f64, f64),
    floating: (u32, f64, f64),
    annual_rates: (f64, f64),
) -> Vec<AmortizationYear> {
    let (fixed_months, fixed_rate, fixed_payment) = fixed;
    let (floating_months, floating_rate, floating_payment) = floating;
    let total_months = fixed_months + floating_months;

    let mut schedule = Vec::new();
    let mut balance = loan;
    let mut month = 0;

    while month < total_months {
        let year = month / 12 + 1;
        let in_fixed = month < fixed_months;
        let mut row = AmortizationYear {
            year,
            annual_rate_percent: if in_fixed { annual_rates.0 } else { annual_rates.1 },
            monthly_payment: if in_fixed { fixed_payment } else { floating_payment },
            interest: 0.0,
            principal: 0.0,
            closing_balance: balance,
        };

        while month < total_months && month / 12 + 1 == year {
            let (rate, payment) = if month < fixed_months {
                (fixed_rate, fixed_payment)
            } else {
                (floating_rate, floating_payment)
            };
            let interest = balance * rate;
            let principal = (payment - interest).min(balance);
            balance -= principal;
            row.interest += interest;
            row.principal += principal;
            month += 1;
        }

        row.closing_balance = balance.max(0.0);
        schedule.push(row);
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KprInput {
        KprInput {
            price: 850_000_000.0,
            down_payment_percent: 15.0,
            fixed_rate_percent: 4.99,
            fixed_years: 3.0,
            floating_rate_percent: 11.5,
            tenor_years: 20.0,
            monthly_income: 15_000_000.0,
        }
    }

    #[test]
    fn test_annuity_zero_rate() {
        assert_eq!(annuity_payment(1_200_000.0, 0.0, 12), 100_000.0);
        assert_eq!(annuity_payment(1_200_000.0, 0.01, 0), 0.0);
    }

    #[test]
    fn test_affordability_boundaries() {
        assert_eq!(Affordability::classify(30.0), Affordability::Safe);
        assert_eq!(Affordability::classify(30.01), Affordability::Warning);
        assert_eq!(Affordability::classify(35.0), Affordability::Warning);
        assert_eq!(Affordability::classify(35.01), Affordability::Danger);
    }

    #[test]
    fn test_closing_costs() {
        let costs = ClosingCosts::estimate(850_000_000.0, 722_500_000.0);
        assert!((costs.provision - 7_225_000.0).abs() < 1e-6);
        assert!((costs.insurance - 18_062_500.0).abs() < 1e-6);
        assert!((costs.notary - 8_500_000.0).abs() < 1e-6);
        assert!((costs.bphtb - 38_500_000.0).abs() < 1e-6);
        assert_eq!(ClosingCosts::estimate(50_000_000.0, 40_000_000.0).bphtb, 0.0);
    }

    #[test]
    fn test_schedule_pays_off_loan() {
        let sim = simulate(&sample()).unwrap();
        assert_eq!(sim.schedule.len(), 20);
        assert_eq!(sim.schedule[0].annual_rate_percent, 4.99);
        assert_eq!(sim.schedule[3].annual_rate_percent, 11.5);

        let last = sim.schedule.last().unwrap();
        assert!(last.closing_balance < 1.0, "balance left: {}", last.closing_balance);

        // Balance at the end of the fixed phase matches the closed form
        let after_fixed = sim.schedule[2].closing_balance;
        assert!((after_fixed - sim.remaining_principal).abs() < 1.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = sample();
        input.tenor_years = 0.0;
        assert_eq!(simulate(&input).unwrap_err(), CalcError::NonPositiveTenor);

        let mut input = sample();
        input.fixed_years = 25.0;
        assert!(matches!(
            simulate(&input).unwrap_err(),
            CalcError::FixedTermExceedsTenor { fixed: 300, tenor: 240 }
        ));

        let mut input = sample();
        input.down_payment_percent = 120.0;
        assert!(matches!(
            simulate(&input).unwrap_err(),
            CalcError::DownPaymentOutOfRange(_)
        ));
    }

    #[test]
    fn test_zero_income_is_danger() {
        let mut input = sample();
        input.monthly_income = 0.0;
        let sim = simulate(&input).unwrap();
        assert_eq!(sim.affordability, Affordability::Danger);
    }
}
