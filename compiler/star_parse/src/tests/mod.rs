//! Parser tests.
//!
//! - `parser`: grammar, precedence and node shapes
//! - `recovery`: error reporting and resynchronization

mod recovery;
