mod atomic_file;
mod content_hasher;
mod local_media_library;
mod path_builder;

pub use atomic_file::write_atomic;
pub use content_hasher::ContentHasher;
pub use local_media_library::LocalMediaLibrary;
pub use path_builder::PathBuilder;
