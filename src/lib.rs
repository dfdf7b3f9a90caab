/// Platform-specific code for talking to the window manager.
mod platform;

/// The vocabulary of effects, backdrops and tiers shared by every entry point.
mod effect;
pub use effect::*;

/// Conversion of arguments handed over by a scripting host.
mod args;
pub use args::HostValue;

/// Translation of effect requests into window manager calls.
pub mod dwm;

/// Public interface for decorating windows.
mod vibrancy;
pub use vibrancy::*;

/// Node-API bindings.
#[cfg(feature = "node")]
mod node;

/// Errors types that may be triggered from hwvibrancy functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The arguments handed to an entry point were missing or of the wrong
	/// type. Nothing has been done to the window.
	#[error("{0}")]
	InvalidArgument(String),
	/// The requested backdrop is not available in the running version of
	/// Windows. Nothing has been done to the window.
	#[error("Unsupported backdrop mode: {0:?} requires a newer build of Windows 11")]
	UnsupportedMode(Backdrop),
	/// The given window type, or the current system, is not supported.
	#[error("feature is not supported for this window")]
	NotSupported,
	/// Required functionality or one of its dependencies is not available in
	/// the system.
	#[error("Could not find \"{name}\": {error}")]
	MissingFunctionality {
		/// The name of the functionality that could not be found.
		name: &'static str,
		/// The error code given by `GetLastError()`.
		error: WinError
	},
	/// Required functionality is present but its invocation failed.
	#[error("Could not {description}: call to \"{call}\" failed: {error}")]
	FailedInvocation {
		/// The name of the functionality whose invocation failed.
		call: &'static str,
		/// The description of what was trying to be achieved.
		description: &'static str,
		/// The error code, either from `GetLastError()` or an `HRESULT`.
		error: WinError
	}
}

/// An error code reported by Windows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WinError(pub u32);
impl WinError {
	/// Retrieve the message for this error code from Windows, if available.
	pub fn message(&self) -> Option<String> {
		#[cfg(windows)]
		return platform::windows::format_message(self.0);

		#[cfg(not(windows))]
		None
	}
}
impl std::fmt::Display for WinError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self.message() {
			Some(message) =>
				write!(f, "{} (0x{:08x})", message, self.0),
			None =>
				write!(f, "0x{:08x}", self.0),
		}
	}
}
impl std::error::Error for WinError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn win_error_falls_back_to_hex() {
		#[cfg(not(windows))]
		assert_eq!(WinError(0x80070057).to_string(), "0x80070057");
		#[cfg(windows)]
		assert!(WinError(0x80070057).to_string().ends_with("0x80070057)"));
	}

	#[test]
	fn error_messages_match_the_host_contract() {
		let error = Error::InvalidArgument("Wrong number of arguments".into());
		assert_eq!(error.to_string(), "Wrong number of arguments");

		let error = Error::UnsupportedMode(Backdrop::Acrylic);
		assert!(error.to_string().starts_with("Unsupported backdrop mode"));
	}
}
