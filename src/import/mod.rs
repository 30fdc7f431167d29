pub mod numeric;
pub mod statement;

pub use numeric::coerce_f64;
pub use statement::{parse_statement, parse_statement_str, ParsedStatement};
