mod document_xml;
mod docx_package;
mod xml_entities;

pub use document_xml::WordDocumentCodec;
pub use docx_package::{DocxPackage, MAIN_DOCUMENT_ENTRY};
pub use xml_entities::{escape_xml_text, unescape_xml};
