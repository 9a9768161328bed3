//! German Wiktionary lexical extraction: resolve a word's pages upstream and
//! turn their rendered markup into one normalized [`LexicalEntry`].

pub mod assemble;
pub mod entry;
pub mod error;
pub mod extract;
pub mod labels;
pub mod lookup;
pub mod markup;
pub mod server;
pub mod settings;
pub mod upstream;

pub use assemble::{Assembler, Assembly, Diagnostic};
pub use entry::LexicalEntry;
pub use error::{Error, Result};
pub use labels::Labels;
pub use lookup::Lookup;
pub use settings::Settings;
pub use upstream::{ClientConfig, PageRef, PageSection, PageSource, WikiClient};
