pub mod calculator;
pub mod decay;
pub mod report;

pub use crate::domain::model::{CalculationInput, CalculationResult, DispenseRequest, Nuclide, TimeOffset};
pub use crate::utils::error::Result;
