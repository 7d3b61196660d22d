pub mod handler_employees;
