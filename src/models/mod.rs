pub mod utilization;
pub mod utilization_type;
