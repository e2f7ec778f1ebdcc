pub mod package;
pub mod scaffold;
pub mod xml;

pub use package::PptxPackage;
