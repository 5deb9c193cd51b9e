use std::fmt;

use crate::registers::BufferError;

/// Errors returned by the driver. `E` is the transport's error type.
#[derive(Debug)]
pub enum Error<E> {
    /// Bus transport failure.
    Bus(E),
    /// The bulk read did not start at or below the calibration registers.
    InvalidBase(u8),
    /// The bulk read returned the wrong number of bytes.
    InvalidBufferLength { expected: usize, actual: usize },
}

pub type Result<T, E> = core::result::Result<T, Error<E>>;

impl<E> From<BufferError> for Error<E> {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::Base(base) => Error::InvalidBase(base),
            BufferError::Length { expected, actual } => {
                Error::InvalidBufferLength { expected, actual }
            }
        }
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {}", e),
            Error::InvalidBase(base) => write!(
                f,
                "register block starting at {:#04x} does not cover the calibration data",
                base
            ),
            Error::InvalidBufferLength { expected, actual } => write!(
                f,
                "register block is {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for Error<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Bus(e) => Some(e),
            _ => None,
        }
    }
}
