//! The functions registered with Node.js.
//!
//! Arguments are taken as they come from JavaScript and checked here, so that
//! callers get the same errors for a missing argument as for a wrong one,
//! instead of whatever the generic conversion would report.
use napi::{JsUnknown, Status, ValueType};
use napi_derive::napi;
use crate::{Error, HostValue};

/// Sorts a JavaScript value into what the entry points understand.
fn host_value(value: JsUnknown) -> napi::Result<HostValue> {
	Ok(match value.get_type()? {
		ValueType::Undefined => HostValue::Missing,
		ValueType::Number => HostValue::Number(value.coerce_to_number()?.get_double()?),
		_ => HostValue::Other,
	})
}

fn host_values<const N: usize>(values: [JsUnknown; N]) -> napi::Result<Vec<HostValue>> {
	values.into_iter().map(host_value).collect()
}

/// Argument errors become JavaScript errors with the `InvalidArg` status,
/// everything else is a generic failure.
fn to_napi(error: Error) -> napi::Error {
	let status = match error {
		Error::InvalidArgument(_) => Status::InvalidArg,
		_ => Status::GenericFailure,
	};
	napi::Error::new(status, error.to_string())
}

/// `checkVibrancySupport(): 'full' | 'basic' | 'none'`
#[napi]
pub fn check_vibrancy_support() -> String {
	crate::check_vibrancy_support().as_str().to_owned()
}

/// `submitDwmCommand(hwnd: number, effect: number, value: number): void`
#[napi]
pub fn submit_dwm_command(hwnd: JsUnknown, effect: JsUnknown, value: JsUnknown) -> napi::Result<()> {
	let args = host_values([hwnd, effect, value])?;
	crate::submit_dwm_command(&args).map_err(to_napi)
}

/// `redrawWindow(hwnd: number, x: number, y: number, width: number, height: number): void`
#[napi]
pub fn redraw_window(
	hwnd: JsUnknown,
	x: JsUnknown,
	y: JsUnknown,
	width: JsUnknown,
	height: JsUnknown) -> napi::Result<()> {

	let args = host_values([hwnd, x, y, width, height])?;
	crate::redraw_window(&args).map_err(to_napi)
}
