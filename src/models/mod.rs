pub mod bookmark;

pub use bookmark::{Bookmark, NewBookmark, ValidationError};
