use std::ffi::CStr;
use cstr::cstr;
use winapi::ctypes::c_int;
use winapi::shared::minwindef::{BOOL, DWORD, FARPROC, HMODULE, LPCVOID, UINT};
use winapi::shared::ntdef::{HRESULT, NTSTATUS, PVOID, ULONG, WCHAR};
use winapi::shared::windef::HWND;
use winapi::shared::winerror::ERROR_SUCCESS;
use winapi::um::errhandlingapi::{GetLastError, SetLastError};
use winapi::um::libloaderapi::{FreeLibrary, GetModuleHandleA, GetProcAddress, LoadLibraryA};
use winapi::um::uxtheme::MARGINS;
use winapi::um::winbase::{FORMAT_MESSAGE_ALLOCATE_BUFFER, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS, FormatMessageW, LocalFree};
use winapi::um::winnt::{LANG_NEUTRAL, LONG, LPWSTR, MAKELANGID, SUBLANG_NEUTRAL};
use winapi::um::winreg::{HKEY_CURRENT_USER, RRF_RT_REG_DWORD, RegGetValueA};
use winapi::um::winuser::GWL_STYLE;
use crate::dwm::{Compositor, Probe};
use crate::{Attribute, Bounds, Error, Handle, Margins, WinError};

/// Type for a pointer to the `RtlGetVersion` function, found in `ntdll.dll`.
/// Unlike `GetVersionEx`, it reports the real version of the system
/// regardless of the compatibility manifest of the host executable.
type __RtlGetVersion =
	unsafe extern "system" fn(*mut OperatingSystemVersionInfoWide) -> NTSTATUS;

/// Type for a pointer to `DwmSetWindowAttribute`, found in `dwmapi.dll`.
type __DwmSetWindowAttribute =
	unsafe extern "system" fn(HWND, DWORD, LPCVOID, DWORD) -> HRESULT;

/// Type for a pointer to `DwmExtendFrameIntoClientArea`, found in
/// `dwmapi.dll`.
type __DwmExtendFrameIntoClientArea =
	unsafe extern "system" fn(HWND, *const MARGINS) -> HRESULT;

/// Type for a pointer to `SetWindowLongA`, found in `user32.dll`.
type __SetWindowLongA =
	unsafe extern "system" fn(HWND, c_int, LONG) -> LONG;

/// Type for a pointer to `SetWindowPos`, found in `user32.dll`.
type __SetWindowPos =
	unsafe extern "system" fn(HWND, HWND, c_int, c_int, c_int, c_int, UINT) -> BOOL;

lazy_static::lazy_static! {
	/// The `RtlGetVersion` function, if available.
	///
	/// Ntdll.dll stays mapped for the whole lifetime of every process, so the
	/// pointer is resolved once and never released. The version itself is
	/// queried anew on every call.
	static ref RTL_GET_VERSION: Option<__RtlGetVersion> = unsafe {
		let library = GetModuleHandleA(cstr!("ntdll.dll").as_ptr());
		if library.is_null() {
			/* Ntdll.dll is not available in this environment. This may happen
			 * in sandboxed environments such as UWP. Version information won't
			 * be available. */
			log::warn!(
				"Ntdll.dll is not available. No backdrop will be reported as \
				 supported.");
			return None
		}

		let address = GetProcAddress(
			library,
			cstr!("RtlGetVersion").as_ptr());
		if address.is_null() {
			log::warn!(
				"RtlGetVersion is not available. No backdrop will be reported \
				 as supported.");
			return None
		}

		Some(std::mem::transmute::<FARPROC, __RtlGetVersion>(address))
	};
}

/// Queries of the running system.
pub struct System;
impl Probe for System {
	fn build_number(&self) -> u32 {
		let function = match *RTL_GET_VERSION {
			Some(function) => function,
			None => return 0
		};

		let mut version = OperatingSystemVersionInfoWide {
			byte_size: std::mem::size_of::<OperatingSystemVersionInfoWide>() as ULONG,
			major_version: 0,
			minor_version: 0,
			build_number: 0,
			platform_id: 0,
			service_pack: [0; 128]
		};

		let result = unsafe { function(&mut version as *mut _) };
		if result != 0 {
			/* RtlGetVersion is an infallible function and, yet, it's returned
			 * an invalid value. This may be an indication of a bug or undefined
			 * behavior. */
			log::error!(
				"RtlGetVersion returned {} when it should have been an \
				 infallible function, whose only valid return value is \
				 STATUS_SUCCESS. This may be indicative of a bug.",
				result);
			return 0
		}

		log::debug!(
			"Running Windows {}.{} build {}",
			version.major_version,
			version.minor_version,
			version.build_number);
		version.build_number
	}

	fn apps_use_light_theme(&self) -> Result<bool, Error> {
		let mut value: DWORD = 0;
		let mut size = std::mem::size_of::<DWORD>() as DWORD;

		let result = unsafe {
			RegGetValueA(
				HKEY_CURRENT_USER,
				cstr!("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize").as_ptr(),
				cstr!("AppsUseLightTheme").as_ptr(),
				RRF_RT_REG_DWORD,
				std::ptr::null_mut(),
				&mut value as *mut DWORD as PVOID,
				&mut size as *mut _)
		};
		if result as DWORD != ERROR_SUCCESS {
			return Err(Error::FailedInvocation {
				call: "RegGetValueA",
				description: "read the theme of the user's apps",
				error: WinError(result as DWORD)
			})
		}

		Ok(value != 0)
	}
}

/// A dynamically loaded system library, released when dropped.
struct Library {
	name: &'static str,
	handle: HMODULE,
}
impl Library {
	fn load(file: &'static CStr, name: &'static str) -> Result<Self, Error> {
		let handle = unsafe { LoadLibraryA(file.as_ptr()) };
		if handle.is_null() {
			return Err(Error::MissingFunctionality {
				name,
				error: WinError(unsafe { GetLastError() })
			})
		}

		Ok(Library { name, handle })
	}

	/// Looks up the address of an exported function.
	fn address(&self, symbol: &'static CStr, name: &'static str) -> Result<FARPROC, Error> {
		let address = unsafe { GetProcAddress(self.handle, symbol.as_ptr()) };
		if address.is_null() {
			return Err(Error::MissingFunctionality {
				name,
				error: WinError(unsafe { GetLastError() })
			})
		}

		Ok(address)
	}
}
impl Drop for Library {
	fn drop(&mut self) {
		log::trace!("Releasing {}", self.name);
		unsafe {
			FreeLibrary(self.handle);
		}
	}
}

/// The functions needed to decorate windows, loaded for the duration of a
/// single operation.
///
/// User32.dll and dwmapi.dll are not necessarily loaded in the host process,
/// so both are loaded explicitly and released once the session is dropped.
pub struct Session {
	set_window_pos: __SetWindowPos,
	set_window_long: __SetWindowLongA,
	set_window_attribute: __DwmSetWindowAttribute,
	extend_frame_into_client_area: __DwmExtendFrameIntoClientArea,
	_user32: Library,
	_dwmapi: Library,
}
impl Session {
	pub fn load() -> Result<Self, Error> {
		let user32 = Library::load(cstr!("user32.dll"), "user32.dll")?;
		let dwmapi = Library::load(cstr!("dwmapi.dll"), "dwmapi.dll")?;

		unsafe {
			let set_window_pos = std::mem::transmute::<FARPROC, __SetWindowPos>(
				user32.address(cstr!("SetWindowPos"), "user32.dll\\SetWindowPos")?);
			let set_window_long = std::mem::transmute::<FARPROC, __SetWindowLongA>(
				user32.address(cstr!("SetWindowLongA"), "user32.dll\\SetWindowLongA")?);
			let set_window_attribute = std::mem::transmute::<FARPROC, __DwmSetWindowAttribute>(
				dwmapi.address(
					cstr!("DwmSetWindowAttribute"),
					"dwmapi.dll\\DwmSetWindowAttribute")?);
			let extend_frame_into_client_area = std::mem::transmute::<FARPROC, __DwmExtendFrameIntoClientArea>(
				dwmapi.address(
					cstr!("DwmExtendFrameIntoClientArea"),
					"dwmapi.dll\\DwmExtendFrameIntoClientArea")?);

			Ok(Session {
				set_window_pos,
				set_window_long,
				set_window_attribute,
				extend_frame_into_client_area,
				_user32: user32,
				_dwmapi: dwmapi
			})
		}
	}
}

/// Turns a failed `HRESULT` into an error.
fn check(result: HRESULT, call: &'static str, description: &'static str) -> Result<(), Error> {
	if result < 0 {
		return Err(Error::FailedInvocation {
			call,
			description,
			error: WinError(result as DWORD)
		})
	}
	Ok(())
}

impl Compositor for Session {
	fn extend_frame_into_client_area(&self, hwnd: Handle, margins: Margins) -> Result<(), Error> {
		let margins = MARGINS {
			cxLeftWidth: margins.left,
			cxRightWidth: margins.right,
			cyTopHeight: margins.top,
			cyBottomHeight: margins.bottom
		};

		log::debug!("DwmExtendFrameIntoClientArea({:#x})", hwnd);
		let result = unsafe {
			(self.extend_frame_into_client_area)(hwnd as HWND, &margins as *const _)
		};
		check(
			result,
			"DwmExtendFrameIntoClientArea",
			"extend window frame into the client area")
	}

	fn set_window_attribute(&self, hwnd: Handle, attribute: Attribute, value: i32) -> Result<(), Error> {
		log::debug!("DwmSetWindowAttribute({:#x}, {:?}, {})", hwnd, attribute, value);
		let result = unsafe {
			(self.set_window_attribute)(
				hwnd as HWND,
				attribute as DWORD,
				&value as *const i32 as LPCVOID,
				std::mem::size_of::<i32>() as DWORD)
		};
		check(result, "DwmSetWindowAttribute", "set a window attribute")
	}

	fn set_window_style(&self, hwnd: Handle, style: u32) -> Result<(), Error> {
		log::debug!("SetWindowLongA({:#x}, GWL_STYLE, {:#010x})", hwnd, style);
		unsafe {
			/* A previous style of zero is indistinguishable from a failure,
			 * unless the last error is cleared beforehand. */
			SetLastError(0);
			let previous = (self.set_window_long)(hwnd as HWND, GWL_STYLE, style as LONG);
			let error = GetLastError();
			if previous == 0 && error != 0 {
				return Err(Error::FailedInvocation {
					call: "SetWindowLongA",
					description: "change the style of the window",
					error: WinError(error)
				})
			}
		}
		Ok(())
	}

	fn set_window_pos(&self, hwnd: Handle, bounds: Bounds, flags: u32) -> Result<(), Error> {
		log::debug!("SetWindowPos({:#x}, {:?}, {:#06x})", hwnd, bounds, flags);
		let result = unsafe {
			(self.set_window_pos)(
				hwnd as HWND,
				std::ptr::null_mut(),
				bounds.x,
				bounds.y,
				bounds.width,
				bounds.height,
				flags as UINT)
		};
		if result == 0 {
			return Err(Error::FailedInvocation {
				call: "SetWindowPos",
				description: "move the window",
				error: WinError(unsafe { GetLastError() })
			})
		}
		Ok(())
	}
}

/// Retrieve the message for the given error code from Windows, if available.
pub fn format_message(code: DWORD) -> Option<String> {
	let mut buffer: LPWSTR = std::ptr::null_mut();
	let size = unsafe {
		FormatMessageW(
			FORMAT_MESSAGE_ALLOCATE_BUFFER
				| FORMAT_MESSAGE_FROM_SYSTEM
				| FORMAT_MESSAGE_IGNORE_INSERTS,
			std::ptr::null_mut(),
			code,
			MAKELANGID(LANG_NEUTRAL, SUBLANG_NEUTRAL) as DWORD,
			&mut buffer as *mut LPWSTR as *mut _,
			0,
			std::ptr::null_mut())
	};
	if size == 0 {
		/* No message. */
		return None
	}

	let slice = unsafe {
		std::slice::from_raw_parts(buffer, size as usize)
	};
	let message = std::char::decode_utf16(slice.iter().cloned())
		.map(|c| c.unwrap_or('_'))
		.collect::<String>()
		.trim()
		.to_string();

	/* Free the buffer FormatMessageW allocated for us. */
	unsafe {
		LocalFree(buffer as *mut _);
	}

	Some(message)
}

/// The operating system version information.
#[repr(C)]
struct OperatingSystemVersionInfoWide {
	/// The size of this structure.
	///
	/// This field must be set to the size of the structure, in bytes, so that
	/// Windows may recognize its type and fill it correctly.
	byte_size: ULONG,
	/// The major version number of the operating system. Windows 11 still
	/// reports itself as version 10.
	major_version: ULONG,
	/// The minor version number of the operating system.
	minor_version: ULONG,
	/// The build number of the operating system.
	///
	/// Windows 10 and 11 share major and minor versions, so this is the only
	/// way to tell which compositor features are available.
	build_number: ULONG,
	/// The operating system platform.
	platform_id: ULONG,
	/// The service-pack version string.
	service_pack: [WCHAR; 128],
}
