pub mod pulse;
pub mod report;
