mod form;
mod warp;

pub use self::warp::{routes, run};
