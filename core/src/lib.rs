pub mod animation;
pub mod config;
pub mod contact;
pub mod content;
pub mod gallery;
pub mod lazy_image;
pub mod lifecycle;
pub mod monitor;
pub mod navigation;
pub mod overlay;
pub mod rate_limit;
pub mod responsive;
pub mod serde_defaults;
pub mod site;
pub mod theme;

// Re-exports for convenience
pub use config::{ConfigError, SiteConfig};
pub use contact::{ContactForm, ContactTransport, FormField, SimulatedTransport, SubmitOutcome};
pub use gallery::{CategoryFilter, Gallery};
pub use lifecycle::{Lifecycle, LifecycleState, MountHost, MountPoint, Widget, WidgetError, WidgetSet};
pub use overlay::{CloseTrigger, Overlay};
pub use site::{ScrollSample, Site, StartupEnv};
pub use theme::{PreferenceStore, StorageError, Theme};
