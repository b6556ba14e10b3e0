pub mod csv;
pub mod outcome;
pub mod table;
pub mod template;
