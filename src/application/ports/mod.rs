mod anonymization_oracle;
mod document_package;
mod file_loader;
mod progress_sink;
mod rich_text_codec;
mod text_splitter;

pub use anonymization_oracle::{AnonymizationOracle, OracleError, OracleResponse};
pub use document_package::{DocumentPackage, PackageError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use progress_sink::ProgressSink;
pub use rich_text_codec::{CodecError, RichTextCodec};
pub use text_splitter::TextSplitter;
