//! IES LM-63-2002 photometric file reader.
//!
//! Reads the text format lighting manufacturers publish candela
//! distributions in, producing an [`ies_model::IesDocument`].
//!
//! # Layout of an accepted file
//!
//! ```text
//! IESNA:LM-63-2002                       signature, line 1
//! [KEYWORD]value                         zero or more keywords
//! TILT=NONE | INCLUDE | <file>           ends the header (INCLUDE: 4 table lines follow)
//! <10 values>                            field row 0
//! <3 values>                             field row 1
//! <vertical angles>                      one or more lines
//! <horizontal angles>                    one or more lines
//! <candela values>                       one vertical sweep per horizontal angle
//! ```
//!
//! Values are separated by commas, semicolons or spaces.
//!
//! # Example
//!
//! ```
//! use ies_lm63::parse_ies_str;
//!
//! let text = "IESNA:LM-63-2002\n\
//!             [MANUFAC]Acme\n\
//!             TILT=NONE\n\
//!             1 1000 1.0 3 1 1 1 0.0 0.0 0.0\n\
//!             1.0 1 12.0\n\
//!             0 45 90\n\
//!             0\n\
//!             500 400 0\n";
//! let doc = parse_ies_str(text).unwrap();
//! assert_eq!(doc.get_keyword("MANUFAC").unwrap().value, "Acme");
//! assert_eq!(doc.candela_count(), 3);
//! ```

mod error;
mod options;
mod reader;
pub mod rows;
pub mod tokenizer;

pub use error::{Axis, ErrorKind, Lm63Error, Result};
pub use options::{DEFAULT_TILT_INCLUDE_LINES, Lm63ReaderOptions};
pub use reader::{
    Lm63Reader, SIGNATURE, expand_home, parse_ies_str, parse_ies_str_with_options, read_ies,
    read_ies_with_options,
};
pub use tokenizer::split_line;
