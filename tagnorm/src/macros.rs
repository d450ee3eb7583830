// Shorthand for return Err(TagnormError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)        -> return Err(TagnormError::new(ErrorKind::Variant))
// - err!(Variant(args))  -> return Err(TagnormError::new(ErrorKind::Variant(args)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagnormError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($($arg:expr),+ $(,)?)) => {
		return Err(crate::error::TagnormError::new(
			crate::error::ErrorKind::$variant($($arg),+),
		))
	};
}

// Shorthand for CoercionError::new("target", offending_value)
//
// Usage:
//
// - coerce_err!("integer", value)
//
// or bail:
//
// - coerce_err!(@BAIL "integer", value)
macro_rules! coerce_err {
	($target:literal, $value:expr) => {
		Into::<crate::error::TagnormError>::into(crate::error::CoercionError::new($target, $value))
	};
	(@BAIL $target:literal, $value:expr) => {
		return Err(coerce_err!($target, $value))
	};
}

pub(crate) use {coerce_err, err};
