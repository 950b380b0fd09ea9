pub mod session;
pub mod traits;
pub mod web;

pub use session::{DriverFactory, SessionInitError, SessionManager, WebDriverFactory};
pub use traits::{BrowserDriver, Selector};
