pub mod path;

pub use path::normalize_repo_input;
