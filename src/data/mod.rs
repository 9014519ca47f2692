//! Data module - CSV loading, encoding fallback and derived columns

mod encoding;
mod loader;
pub mod schema;
mod table;

pub use encoding::TextEncoding;
pub use loader::{
    derive_unit_columns, load_table, normalize_headers, parse_table, try_load_table, LoadCache,
    LoaderError,
};
pub use schema::{VolumeField, DERIVED_SUFFIX, PORT_COL, TONS_PER_UNIT, YEAR_COL};
pub use table::{records_of, PortRecord, PortTable};
pub(crate) use table::{float_values, int_values, string_values};
