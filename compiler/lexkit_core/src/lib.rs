//! Position-tracked codepoint cursor for building tokenizers.
//!
//! This crate is standalone: it knows nothing about terms, captures or
//! token kinds. It owns the one piece of state every tokenizer needs, a
//! cursor over an in-memory byte buffer that decodes UTF-8 on demand and
//! keeps line/column bookkeeping incremental.
//!
//! ```text
//! let mut src = Source::new(b"ab\ncd");
//! assert!(src.leap("ab\n"));
//! assert_eq!(src.loc().to_string(), "2:1");
//! ```

mod decode;
mod line_col;
mod source;

pub use decode::{decode_utf8, Decoded};
pub use line_col::{LineCol, Location};
pub use source::{Source, Utf8Fault, Utf8Policy};
