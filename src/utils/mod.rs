pub mod formatting;

pub use formatting::{format_column, padding_len, LINE_ENDING};
