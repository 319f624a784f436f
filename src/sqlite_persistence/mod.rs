mod table_schema;

pub use table_schema::{
    Column, ForeignKey, ForeignKeyOnChange, Schema, SqlType, Table,
};
