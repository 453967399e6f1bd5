use std::fmt;
use std::ops::{Add, Mul};

/// Scalar value wrapper with overloaded arithmetic.
///
/// Wraps a single `f64` and supports addition and multiplication through
/// the standard operator traits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Value {
	data: f64,
}

impl Value {
	/// Wraps a scalar.
	pub fn new(data: f64) -> Self {
		Self { data }
	}

	/// Returns the wrapped scalar.
	pub fn data(&self) -> f64 {
		self.data
	}
}

impl Add for Value {
	type Output = Value;

	fn add(self, other: Value) -> Value {
		Value::new(self.data + other.data)
	}
}

impl Mul for Value {
	type Output = Value;

	fn mul(self, other: Value) -> Value {
		Value::new(self.data * other.data)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Value(data={})", self.data)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn values_add() {
		let sum = Value::new(5.0) + Value::new(6.0);
		assert_eq!(sum.data(), 11.0);
	}

	#[test]
	fn values_multiply() {
		let product = Value::new(5.0) * Value::new(6.0);
		assert_eq!(product, Value::new(30.0));
	}

	#[test]
	fn display_shows_the_wrapped_data() {
		assert_eq!(format!("{}", Value::new(30.0)), "Value(data=30)");
	}
}
