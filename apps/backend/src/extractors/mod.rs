pub mod employee_id;
pub mod validated_json;

pub use employee_id::EmployeeId;
pub use validated_json::ValidatedJson;
