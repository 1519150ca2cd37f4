mod album;
mod folder_name;
mod id_types;
mod time_range;
pub use album::*;
pub use folder_name::*;
pub use id_types::*;
pub use time_range::*;
