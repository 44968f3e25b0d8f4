/// JSON Lines / JSON array file-backed source implementation.
pub mod json_lines;
