//! The reference skiff frontend: a line-oriented directive language.
//!
//! `.sk` files are sequences of directives, one per line:
//!
//! ```text
//! import "lib/shapes"
//! type Square struct
//! method *Square Draw()
//! interface Drawer Draw()
//! func main
//! emit console.log("hi");
//! ```
//!
//! The parser turns each file into a flat item list; the translator folds a
//! package's items into emitted JavaScript plus the exported type
//! information the build driver registers in its type table. This is
//! deliberately not a real language — it exercises every seam of the driver
//! (imports, type declarations, method sets, `init`/`main` detection, raw
//! emission) with a grammar small enough to keep end-to-end tests readable.

#![warn(missing_docs)]

pub mod ast;
pub mod frontend;
pub mod parser;

pub use ast::{Item, SourceFile};
pub use frontend::DirectiveFrontend;
pub use parser::parse_source;
