//! Reading and writing .ics files per RFC 5545.

mod generate;
mod parse;

pub use generate::{generate_filename, generate_ics, slugify};
pub use parse::{parse_event, parse_uid};
