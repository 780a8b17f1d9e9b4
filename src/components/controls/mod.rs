//! Side panel controls: node filter, settings container and DOT export.

mod export;
mod filter;
mod settings;

pub use export::DotExport;
pub use filter::FilterPanel;
pub use settings::SettingsPanel;
