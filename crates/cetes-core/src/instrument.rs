//! Instrument classes traded on a discount basis and the face value each
//! one pays at maturity.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Days, Money};
use crate::validate;
use crate::CetesResult;

/// CETES auction maturities, in days.
const CETES_STANDARD_TERMS: [Days; 4] = [28, 91, 182, 364];

/// Which discount instrument is being simulated.
///
/// Every kind is priced with the same discount formula; the kind fixes the
/// face value per title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstrumentKind {
    /// Certificados de la Tesoreria, 10 per title.
    #[default]
    Cetes,
    /// Bonos de Desarrollo, 100 per title.
    Bondes,
    /// Pagare con rendimiento liquidable al vencimiento, 1 per title.
    Prlv,
    /// Bank acceptance, 100 per title.
    BankAcceptance,
    /// Any other discount paper with an explicit face value.
    Custom { face_value: Money },
}

impl InstrumentKind {
    pub fn face_value(&self) -> Money {
        match self {
            InstrumentKind::Cetes => dec!(10),
            InstrumentKind::Bondes => dec!(100),
            InstrumentKind::Prlv => Decimal::ONE,
            InstrumentKind::BankAcceptance => dec!(100),
            InstrumentKind::Custom { face_value } => *face_value,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstrumentKind::Cetes => "CETES",
            InstrumentKind::Bondes => "BONDES",
            InstrumentKind::Prlv => "PRLV",
            InstrumentKind::BankAcceptance => "Bank acceptance",
            InstrumentKind::Custom { .. } => "Custom discount paper",
        }
    }

    /// Maturities at which the instrument is normally issued. Empty when the
    /// instrument has no fixed calendar.
    pub fn standard_terms(&self) -> &'static [Days] {
        match self {
            InstrumentKind::Cetes => &CETES_STANDARD_TERMS,
            _ => &[],
        }
    }

    pub fn validate(&self) -> CetesResult<()> {
        if let InstrumentKind::Custom { face_value } = self {
            validate::positive(*face_value, "face_value")?;
        }
        Ok(())
    }
}
