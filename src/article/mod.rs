/// Article domain layer: languages, options and errors.
pub mod errors;
pub mod language;
pub mod options;

pub use errors::{CompileError, UnsupportedLanguage};
pub use language::Language;
pub use options::ArticleCompileOptions;
