pub mod filter;
pub mod highlight;
