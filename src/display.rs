#[cfg(feature = "window")]
pub mod desktop;
pub mod window;
