//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::resolver::UnresolvedInput;

#[derive(Debug, Error)]
pub enum Error {
	#[error("unresolved resources: {}", display_list(.0))]
	Unresolved(Vec<UnresolvedInput>),
	#[error("command has already been run")]
	AlreadyRun,
}

fn display_list(inputs: &[UnresolvedInput]) -> String {
	inputs.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

impl Error {
	/// The inputs which failed to resolve, empty for any other error.
	pub fn unresolved_inputs(&self) -> &[UnresolvedInput] {
		match self {
			Error::Unresolved(inputs) => inputs,
			_ => &[],
		}
	}
}
