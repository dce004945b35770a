/// Capacity limits applied by the catalog and the page stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Most tables a single session may hold.
    pub max_tables: usize,

    /// Most columns a `create table` may declare.
    pub max_columns: usize,

    /// Most pages a single table may allocate.
    pub max_pages_per_table: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_tables: 32,
            max_columns: 32,
            max_pages_per_table: 100,
        }
    }
}

/// Settings for one interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Written before every line is read.
    pub prompt: String,

    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "db > ".to_string(),
            limits: Limits::default(),
        }
    }
}
