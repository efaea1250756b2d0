pub mod error;
pub mod gen;
pub mod parse;
pub mod scanner;
pub mod value;

pub(crate) use gen::parsed_config;
