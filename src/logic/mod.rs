pub mod biosimulant;
pub mod calculations;
pub mod growth_stage;
pub mod planting_window;
pub mod rules;
pub mod scheduler;
pub mod stress;

pub use biosimulant::{recommend_biosimulant, recommend_extended, select_day};
pub use calculations::truncate_after;
pub use rules::RulesEngine;
pub use scheduler::FertilizerScheduler;
