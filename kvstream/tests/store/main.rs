//! Integration tests for backing stores

mod memstore;
#[cfg(feature = "sqlitestore")]
mod sqlitestore;
