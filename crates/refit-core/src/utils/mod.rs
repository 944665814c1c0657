/// Filesystem helper functions
pub mod fs;
