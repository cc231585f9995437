pub mod company;
pub mod date;
pub mod employee;
pub mod money;
pub mod ports;
pub mod slip;
