pub mod package_builder;

pub use package_builder::PackageBuilder;
