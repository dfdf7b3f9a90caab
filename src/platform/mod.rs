#[cfg(windows)]
pub mod windows;
#[cfg(windows)]
pub use self::windows::{Session, System};

#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
pub use self::unsupported::{Session, System};
