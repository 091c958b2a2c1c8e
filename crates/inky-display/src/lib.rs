//! Display backends for inky-pi.
//!
//! Every output surface implements [`DisplayBackend`]. Frames are opened with
//! [`Frame::begin`] or [`scoped`] so they are flushed exactly once.

pub mod backend;
pub mod desktop;
pub mod frame;
pub mod image_backend;
pub mod inky;
pub mod terminal;

pub use backend::DisplayBackend;
pub use desktop::DesktopPreview;
pub use frame::{scoped, Frame};
pub use image_backend::{ImageBackend, MemoryDevice, PanelDevice};
pub use inky::{is_raspberry_pi, open_panel, Ssd1683};
pub use terminal::TerminalBackend;
