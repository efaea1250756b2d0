pub mod display;
pub mod property;
pub mod randr;
pub mod visual;
pub mod window;
pub mod window_attributes;
pub mod window_builder;

pub use display::Display;
pub use property::{Atoms, GetProperty, PropertyValue, SetProperty};
pub use visual::Visual;
pub use window::Window;
pub use window_attributes::WindowAttributes;
pub use window_builder::WindowBuilder;

pub type XcbWindow = xcb::x::Window;
