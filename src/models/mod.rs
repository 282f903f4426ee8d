pub mod assessment;
pub mod enums;
pub mod patient;

pub use assessment::{Prediction, PredictionResult, Recommendation, RiskFactor};
pub use enums::{Flag, Gender, Priority, RiskClass, RiskSeverity, SmokingHistory};
pub use patient::{InputError, PatientRecord};
