pub mod repo;
pub mod workdir;
