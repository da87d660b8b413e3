//! Progressive personal income tax.
//!
//! ## Bracket Table
//!
//! | Taxable income up to | Marginal rate | Tax at ceiling |
//! |---|---|---|
//! | 5,000,000 | 5% | 250,000 |
//! | 10,000,000 | 10% | 750,000 |
//! | 18,000,000 | 15% | 1,950,000 |
//! | 32,000,000 | 20% | 4,750,000 |
//! | 52,000,000 | 25% | 9,750,000 |
//! | 80,000,000 | 30% | 18,150,000 |
//! | above 80,000,000 | 35% | - |
//!
//! The table is a fixed regulatory constant.

use rust_decimal::Decimal;

/// One band of the progressive schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Income at which the band starts (exclusive, except for the first band).
    pub floor: Decimal,
    /// Income at which the band ends (inclusive); `None` for the top band.
    pub ceiling: Option<Decimal>,
    /// Marginal rate applied to income above `floor`.
    pub rate: Decimal,
    /// Tax accumulated by the lower bands, i.e. the tax due at `floor`.
    pub base: Decimal,
}

const fn amount(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 0)
}

const fn percent(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 2)
}

/// The progressive schedule, ascending by floor.
pub const TAX_BRACKETS: [TaxBracket; 7] = [
    TaxBracket {
        floor: amount(0),
        ceiling: Some(amount(5_000_000)),
        rate: percent(5),
        base: amount(0),
    },
    TaxBracket {
        floor: amount(5_000_000),
        ceiling: Some(amount(10_000_000)),
        rate: percent(10),
        base: amount(250_000),
    },
    TaxBracket {
        floor: amount(10_000_000),
        ceiling: Some(amount(18_000_000)),
        rate: percent(15),
        base: amount(750_000),
    },
    TaxBracket {
        floor: amount(18_000_000),
        ceiling: Some(amount(32_000_000)),
        rate: percent(20),
        base: amount(1_950_000),
    },
    TaxBracket {
        floor: amount(32_000_000),
        ceiling: Some(amount(52_000_000)),
        rate: percent(25),
        base: amount(4_750_000),
    },
    TaxBracket {
        floor: amount(52_000_000),
        ceiling: Some(amount(80_000_000)),
        rate: percent(30),
        base: amount(9_750_000),
    },
    TaxBracket {
        floor: amount(80_000_000),
        ceiling: None,
        rate: percent(35),
        base: amount(18_150_000),
    },
];

/// Returns the bracket that taxes the top slice of `taxable_income`.
///
/// Non-positive incomes fall in the first bracket.
pub fn bracket_for(taxable_income: Decimal) -> &'static TaxBracket {
    TAX_BRACKETS
        .iter()
        .find(|b| b.ceiling.is_none_or(|ceiling| taxable_income <= ceiling))
        .unwrap_or(&TAX_BRACKETS[TAX_BRACKETS.len() - 1])
}

/// Calculates income tax due on a monthly taxable income.
///
/// Returns zero for zero or negative income. Otherwise the tax is the base of
/// the applicable bracket plus its marginal rate on the income above the
/// bracket floor. The result is not rounded.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::income_tax;
/// use rust_decimal::Decimal;
///
/// assert_eq!(income_tax(Decimal::from(-2_050_000)), Decimal::ZERO);
/// assert_eq!(income_tax(Decimal::from(5_000_000)), Decimal::from(250_000));
/// assert_eq!(income_tax(Decimal::from(12_000_000)), Decimal::from(1_050_000));
/// ```
pub fn income_tax(taxable_income: Decimal) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let bracket = bracket_for(taxable_income);
    bracket.base + bracket.rate * (taxable_income - bracket.floor)
}
