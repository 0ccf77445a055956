pub mod graph;
pub mod help;
pub mod not_found;
