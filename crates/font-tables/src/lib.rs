//! TTX-style XML round trip for the OS/2 and post tables.
//!
//! A font's OS/2 and post tables are dumped into an element tree laid out the
//! way fontTools' `ttx -t OS/2 -t post` writes them, edited in memory, saved
//! as a `.ttx` file and compiled back onto the font, replacing only those two
//! tables (the equivalent of `ttx -m font.ttf tables.ttx`).

mod bits;
mod error;
mod field;
mod os2;
mod post;
mod tree;
mod ttx;

pub use bits::{format_bits, parse_bits};
pub use error::{Error, Result};
pub use os2::{OS2_ELEMENT, PANOSE_FIELDS};
pub use post::POST_ELEMENT;
pub use tree::{Descendants, Element, VALUE_ATTR};
pub use ttx::TtxDocument;
