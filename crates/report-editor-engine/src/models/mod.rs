pub mod block;
pub mod media;
pub mod rich_text;

pub use block::{Block, BlockId, BlockType, NewBlock};
pub use media::{MediaSource, VideoHost};
pub use rich_text::{InlineStyle, RichText, StyleSpan, strip_markup};
