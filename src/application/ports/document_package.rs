/// Container holding a rich-text main entry next to other entries that must
/// round-trip unchanged.
pub trait DocumentPackage: Send {
    fn main_entry_name(&self) -> &str;

    fn read_main_entry(&self) -> Result<String, PackageError>;

    fn write_main_entry(&mut self, content: String) -> Result<(), PackageError>;

    fn to_bytes(&self) -> Result<Vec<u8>, PackageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("unsupported container: {0}")]
    UnsupportedContainer(String),
    #[error("archive error: {0}")]
    Archive(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("main entry is not valid UTF-8: {0}")]
    InvalidEncoding(String),
}
