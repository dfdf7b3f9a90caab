use crate::{Bounds, Command, Error, Handle};

/// An argument as received from a scripting host.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostValue {
	/// A number. Hosts such as JavaScript only have doubles.
	Number(f64),
	/// The argument was not passed at all.
	Missing,
	/// Anything other than a number.
	Other,
}

/// Checks that exactly `N` numbers were passed.
///
/// Trailing missing arguments count as a wrong number of arguments, while
/// anything else that is not a number is a wrong argument.
pub(crate) fn numbers<const N: usize>(args: &[HostValue]) -> Result<[f64; N], Error> {
	let passed = args.iter()
		.rposition(|arg| *arg != HostValue::Missing)
		.map_or(0, |last| last + 1);
	if passed < N {
		return Err(Error::InvalidArgument("Wrong number of arguments".into()))
	}

	let mut numbers = [0.0; N];
	for (slot, arg) in numbers.iter_mut().zip(args) {
		match *arg {
			HostValue::Number(number) => *slot = number,
			_ => return Err(Error::InvalidArgument("Wrong arguments".into()))
		}
	}
	Ok(numbers)
}

/// Converts a host number into a window handle.
pub(crate) fn handle(number: f64) -> Handle {
	number as Handle
}

/// Converts a host number into a 32-bit value.
///
/// Values above `i32::MAX` keep their bit pattern, so that unsigned values
/// such as `0xFFFFFFFE` for colors arrive intact. Everything else saturates.
pub(crate) fn dword(number: f64) -> i32 {
	if number > i32::MAX as f64 && number <= u32::MAX as f64 {
		number as u32 as i32
	} else {
		number as i32
	}
}

/// Parses the arguments of `submitDwmCommand`: handle, effect code and value.
pub fn dwm_command(args: &[HostValue]) -> Result<(Handle, Command), Error> {
	let [hwnd, effect, value] = numbers::<3>(args)?;
	let command = Command::from_raw(dword(effect), dword(value))?;
	Ok((handle(hwnd), command))
}

/// Parses the arguments of `redrawWindow`: handle, x, y, width and height.
pub fn redraw(args: &[HostValue]) -> Result<(Handle, Bounds), Error> {
	let [hwnd, x, y, width, height] = numbers::<5>(args)?;
	Ok((handle(hwnd), Bounds {
		x: x as i32,
		y: y as i32,
		width: width as i32,
		height: height as i32
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Backdrop, Color, Theme};
	use HostValue::*;

	fn is_invalid(result: Result<impl std::fmt::Debug, Error>, message: &str) -> bool {
		matches!(result, Err(Error::InvalidArgument(ref m)) if m == message)
	}

	#[test]
	fn counts_arguments() {
		assert!(is_invalid(dwm_command(&[]), "Wrong number of arguments"));
		assert!(is_invalid(dwm_command(&[Number(1.0), Number(2.0)]), "Wrong number of arguments"));
		assert!(is_invalid(
			dwm_command(&[Number(1.0), Number(2.0), Missing]),
			"Wrong number of arguments"));
		assert!(is_invalid(
			redraw(&[Number(1.0), Number(2.0), Number(3.0), Number(4.0)]),
			"Wrong number of arguments"));
	}

	#[test]
	fn rejects_non_numbers() {
		assert!(is_invalid(dwm_command(&[Number(1.0), Other, Number(0.0)]), "Wrong arguments"));
		assert!(is_invalid(dwm_command(&[Missing, Number(2.0), Number(0.0)]), "Wrong arguments"));
		assert!(is_invalid(
			redraw(&[Number(1.0), Number(2.0), Number(3.0), Number(4.0), Other]),
			"Wrong arguments"));
	}

	#[test]
	fn extra_arguments_are_ignored() {
		let (hwnd, command) = dwm_command(&[Number(42.0), Number(2.0), Number(1.0), Other]).unwrap();
		assert_eq!(hwnd, 42);
		assert_eq!(command, Command::Backdrop { backdrop: Backdrop::Mica, theme: Theme::Dark });
	}

	#[test]
	fn parses_redraw_bounds() {
		let args = [Number(7.0), Number(-10.0), Number(20.5), Number(800.0), Number(600.0)];
		let (hwnd, bounds) = redraw(&args).unwrap();
		assert_eq!(hwnd, 7);
		assert_eq!(bounds, Bounds { x: -10, y: 20, width: 800, height: 600 });
	}

	#[test]
	fn unsigned_colors_survive() {
		let args = [Number(1.0), Number(6.0), Number(4294967294.0)];
		let (_, command) = dwm_command(&args).unwrap();
		assert_eq!(command, Command::BorderColor(Color::NONE));

		assert_eq!(dword(-1.0), -1);
		assert_eq!(dword(1e12), i32::MAX);
		assert_eq!(dword(f64::NAN), 0);
	}
}
