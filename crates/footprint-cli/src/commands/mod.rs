pub mod bom;
pub mod sales;
pub mod spec;
