/// Battery state fold over the hourly series.
pub mod battery;
pub mod aggregate;
pub mod savings;
pub mod types;

pub use battery::{BatterySimulator, ChargeRule};
pub use savings::{SavingsCalculator, annual_savings};
pub use types::{DerivedHourlyRecord, HourlyRecord};
