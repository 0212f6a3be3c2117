/// Product CRUD against the real migration on SQLite
pub mod crud_tests;
