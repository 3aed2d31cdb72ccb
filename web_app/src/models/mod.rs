pub mod bold;
pub mod order;
