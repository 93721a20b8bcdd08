//! Errors reported by the collections in this crate.

use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result;

/// The red-black invariant or bookkeeping rule that a tree failed to uphold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    /// The root node is red.
    RedRoot,
    /// A red node has a red child.
    RedRed,
    /// Two paths from the same node reach the sentinel through different numbers of black nodes.
    BlackHeight,
    /// The in-order key sequence is not strictly increasing under the comparator.
    Order,
    /// A child does not point back at its parent, or the root has a parent.
    ParentLink,
    /// The stored length disagrees with the number of reachable nodes.
    Length,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match self {
            Violation::RedRoot => "root node is red",
            Violation::RedRed => "red node has a red child",
            Violation::BlackHeight => "black height is not uniform",
            Violation::Order => "keys are not strictly increasing",
            Violation::ParentLink => "parent link is inconsistent",
            Violation::Length => "length does not match node count",
        };
        write!(f, "{}", description)
    }
}

#[derive(Debug)]
pub enum Error {
    /// The requested key does not exist.
    KeyNotFound,
    /// Memory for a new node could not be reserved.
    AllocationFailure(TryReserveError),
    /// A structural invariant does not hold. Only reported by tree validation.
    InvariantViolation(Violation),
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::AllocationFailure(err)
    }
}

impl From<Violation> for Error {
    fn from(violation: Violation) -> Error {
        Error::InvariantViolation(violation)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::AllocationFailure(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "key not found"),
            Error::AllocationFailure(error) => write!(f, "allocation failure: {}", error),
            Error::InvariantViolation(violation) => write!(f, "invariant violation: {}", violation),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
