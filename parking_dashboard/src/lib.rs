pub mod backend;
pub mod channel;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod page;
pub mod poller;
pub mod reconnect;
pub mod render;
pub mod view;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::SyncError;
pub use page::{Container, Page};
pub use view::View;
