
/// Table mapping round trips against a throwaway SQLite database
pub mod schema_tests;
