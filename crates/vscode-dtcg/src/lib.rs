//! # vscode-dtcg - VSCode theme variables to DTCG design tokens
//!
//! Converts the `--vscode-*` CSS custom properties a VSCode theme exposes
//! into [Design Token Community Group](https://design-tokens.github.io/community-group/format/)
//! color tokens, nested by name:
//!
//! ```text
//! --vscode-editor-background: #1e1e1e;
//! ```
//!
//! becomes
//!
//! ```json
//! {
//!   "vscode": {
//!     "editor": {
//!       "background": {
//!         "$type": "color",
//!         "$value": { "colorSpace": "srgb", "components": [0.1176…, 0.1176…, 0.1176…], "alpha": 1, "hex": "#1E1E1E" }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! When several themes are converted together, a union view aligns them:
//! every theme gets every variable any theme defines, with a transparent
//! placeholder where it has none, and a report lists what was filled in.
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Read `name -> value` pairs from CSS, JSON or YAML | [`source`] |
//! | Parse a value into a normalized color | [`color`] |
//! | Wrap a color as a DTCG token | [`token`] |
//! | Keep `--vscode-*` colors, keyed by name | [`extract`] |
//! | Map a name to its tree path | [`path`] |
//! | Nest a flat set into a tree | [`tree`] |
//! | Align several sets and report gaps | [`union`] |
//!
//! ## Quick Start
//!
//! ```rust
//! use vscode_dtcg::{convert_all, parse_source, ConflictPolicy, SourceFormat};
//!
//! let dark = parse_source(
//!     ":root { --vscode-foreground: #cccccc; --vscode-editor-background: #1e1e1e; }",
//!     SourceFormat::Css,
//! )
//! .unwrap();
//! let light = parse_source(r##"{"--vscode-foreground": "#616161"}"##, SourceFormat::Json).unwrap();
//!
//! let conversion = convert_all(
//!     [("dark", &dark.variables), ("light", &light.variables)],
//!     ConflictPolicy::Error,
//!     true,
//! )
//! .unwrap();
//!
//! assert_eq!(conversion.sources[0].token_count(), 2);
//! let union = conversion.union.unwrap();
//! assert_eq!(union.report.report["light"].missing, ["--vscode-editor-background"]);
//! ```

pub mod color;
pub mod convert;
mod error;
pub mod extract;
pub mod path;
pub mod source;
pub mod token;
pub mod tree;
pub mod union;

pub use error::{Error, Result, SourceError, TreeError};

pub use color::{parse_color, ColorForm, NormalizedColor};
pub use convert::{
    convert_all, convert_file, convert_source, union_of, Conversion, SourceConversion,
    MIN_UNION_SOURCES,
};
pub use extract::{extract, Extraction, FlatTokenSet, VARIABLE_PREFIX};
pub use path::{resolve_path, TokenPath, ROOT_SEGMENT};
pub use source::{
    parse_source, read_source, ParsedSource, RawVariables, SourceFormat, SOURCE_EXTENSIONS,
};
pub use token::{build_token, ColorToken};
pub use tree::{nest, ConflictPolicy, TokenNode, TokenTree, TreeBuilder};
pub use union::{merge, union_keys, SourceReport, UnionOutput, UnionReport};
