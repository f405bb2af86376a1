pub mod client;
pub mod schema;

pub use client::{BigQueryClient, BigQueryError, BigQueryTable};
pub use schema::{relax, row_schema, Field, FieldKind, FieldMode};
