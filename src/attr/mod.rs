//! Attribute storage: tables, tagged values, flags, names and conversions.

pub mod convert;
pub mod flags;
pub mod name;
pub mod parse;
pub mod table;
pub mod value;

pub use flags::AttrFlags;
pub use name::{parse_id_name, IdName, IDVALUE};
pub use table::{is_internal, AttrTable, INTERNAL_PREFIX};
pub use value::AttrValue;
