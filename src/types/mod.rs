pub mod observation;
pub mod report;
pub mod station;
pub mod summary;
pub mod wind;
