pub(crate) mod database;
pub(crate) mod table;
