pub mod script;
pub mod sql;
