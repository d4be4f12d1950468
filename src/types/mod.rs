//! Values carried in result rows.

mod value;

pub use value::CellValue;
