/// Filesystem transport for JSON document files.
pub mod fs;
