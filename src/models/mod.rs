pub mod crop;
pub mod dosage;
pub mod schedule;
pub mod stress;
pub mod weather;

pub use crop::*;
pub use dosage::*;
pub use schedule::*;
pub use stress::*;
pub use weather::*;
