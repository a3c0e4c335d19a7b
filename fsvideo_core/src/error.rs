// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors from [`MediaSurface`](crate::surface::MediaSurface) operations.
///
/// `E` is the host's error type ([`Host::Error`](crate::backend::Host::Error)).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// `init` was called with an empty source list.
    NoSources,
    /// A host operation (element creation, listener attachment, timer
    /// scheduling) failed.
    Host(E),
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Host(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSources => write!(f, "no media sources given"),
            Self::Host(err) => write!(f, "host operation failed: {err:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
