pub mod countdown;
pub mod drag;
pub mod fonts;
pub mod form;
pub mod gui;
pub mod logging;
pub mod overlay;
pub mod session;
pub mod settings;
pub mod ticker;
pub mod viewport;
