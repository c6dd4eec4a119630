//! Field guards shared by every calculator entry point.

use rust_decimal::Decimal;

use crate::error::CetesError;
use crate::CetesResult;

pub(crate) fn positive(value: Decimal, field: &str) -> CetesResult<()> {
    if value <= Decimal::ZERO {
        return Err(CetesError::invalid(
            field,
            format!("must be positive, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn non_negative(value: Decimal, field: &str) -> CetesResult<()> {
    if value < Decimal::ZERO {
        return Err(CetesError::invalid(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}

/// Accepts a decimal fraction in `[0, 1)`.
pub(crate) fn unit_fraction(value: Decimal, field: &str) -> CetesResult<()> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(CetesError::invalid(
            field,
            format!("must be a decimal fraction in [0, 1), got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn positive_days(days: u32, field: &str) -> CetesResult<()> {
    if days == 0 {
        return Err(CetesError::invalid(field, "must be at least one day"));
    }
    Ok(())
}

/// Unwraps a `checked_*` result, naming the field whose magnitude pushed the
/// arithmetic past the 96-bit decimal range.
pub(crate) fn in_range(value: Option<Decimal>, field: &str) -> CetesResult<Decimal> {
    value.ok_or_else(|| CetesError::invalid(field, "result exceeds decimal range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unit_fraction_bounds() {
        assert!(unit_fraction(dec!(0), "tax_rate").is_ok());
        assert!(unit_fraction(dec!(0.9999), "tax_rate").is_ok());
        assert!(unit_fraction(dec!(1), "tax_rate").is_err());
        assert!(unit_fraction(dec!(-0.01), "tax_rate").is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = positive(dec!(0), "total_amount").unwrap_err();
        match err {
            CetesError::InvalidInput { field, .. } => assert_eq!(field, "total_amount"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_in_range() {
        assert_eq!(in_range(dec!(2).checked_mul(dec!(3)), "x").unwrap(), dec!(6));
        let err = in_range(Decimal::MAX.checked_add(Decimal::ONE), "total_amount").unwrap_err();
        assert!(err.to_string().contains("total_amount"));
        assert!(err.to_string().contains("decimal range"));
    }
}
