pub mod feature;
pub mod table;
