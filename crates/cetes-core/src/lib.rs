pub mod early_sale;
pub mod error;
pub mod instrument;
pub mod interest;
pub mod pricing;
pub mod scenario;
pub mod types;
pub mod yields;

mod validate;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "exercises")]
pub mod exercises;

pub use error::CetesError;
pub use instrument::InstrumentKind;
pub use scenario::{simulate, EarlySaleTerms, InvestmentScenario, SimulationResult};
pub use types::*;
pub use yields::YieldConvention;

/// Standard result type for all calculator operations
pub type CetesResult<T> = Result<T, CetesError>;
