pub mod pdf;

pub use pdf::{Font, PdfPage};
