pub mod accounts;
pub mod practice;
pub mod tokens;
