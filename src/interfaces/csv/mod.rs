pub mod employee_reader;
