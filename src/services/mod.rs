pub mod aiken_parser;
pub mod item_renderer;
pub mod manifest_renderer;

pub use aiken_parser::AikenParser;
pub use item_renderer::ItemRenderer;
pub use manifest_renderer::ManifestRenderer;
