pub mod config;
pub mod error;
pub mod notice;
pub mod result;

pub use config::{ClientConfig, RollbackPolicy};
pub use error::TaskboardError;
pub use notice::{Notification, NotificationLevel, Notifier};
pub use result::TaskboardResult;
