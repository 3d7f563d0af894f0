pub mod login;
pub mod results;
