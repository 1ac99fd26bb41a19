pub mod question;
pub mod resource;

pub use question::Question;
pub use resource::RenderedResource;
