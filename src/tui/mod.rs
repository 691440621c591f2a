pub mod app;
pub mod event;
pub mod ui;

pub use app::{App, Screen};
pub use event::{Event, EventHandler};
