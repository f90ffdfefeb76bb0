//! Database schema definitions

/// Schema version stamped into `PRAGMA user_version`.
///
/// Bumped on any incompatible table change. Opening a database stamped with
/// a different version fails; `VehicleStore::reset` is the only destructive
/// path.
pub const SCHEMA_VERSION: i64 = 1;

/// SQL to create the vehicles table
pub const CREATE_VEHICLES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner TEXT NOT NULL,
    department TEXT NOT NULL,
    phone TEXT NOT NULL,
    plate TEXT NOT NULL UNIQUE,
    model TEXT NOT NULL,
    photo TEXT
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] =
    &["CREATE INDEX IF NOT EXISTS idx_vehicles_department ON vehicles(department)"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_VEHICLES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
