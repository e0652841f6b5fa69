pub mod path_utils;
pub mod source;
pub mod version_utils;

pub use path_utils::*;
pub use source::SourceLocation;
pub use version_utils::*;
