pub mod document;
pub mod trade;
