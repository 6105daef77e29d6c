pub mod daemon;
pub mod form;
pub mod health;
pub mod version;

pub use daemon::Daemon;
pub use form::Form;
pub use health::Health;
pub use version::Version;
