pub mod deploy;
pub mod package;
