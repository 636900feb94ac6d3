pub mod parse;
pub mod text;
pub mod time;
