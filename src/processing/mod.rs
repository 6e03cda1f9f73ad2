pub mod cleanup;
pub mod extractors;
pub mod image;
pub mod ocr;

pub use cleanup::TextNormalizer;
pub use extractors::FieldExtractor;
pub use image::ImagePreprocessor;
pub use ocr::{OcrConfig, TextRecognizer};
