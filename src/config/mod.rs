//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::MigrateConfig;
pub use site::SiteConfig;
