// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// Everything that can stop a ticketing operation short of a response.
#[derive(Debug)]
pub enum Error {
    /// The client was not given what it needs to talk to the API (a bearer
    /// token, a usable base URL).
    Config(String),

    /// The customer payload could not be built.
    Validation(AddressError),

    /// The remote service answered with a non-2xx status.
    Http { status: u16, body: String },

    /// The request never produced a response: connection failure or timeout.
    Transport(reqwest::Error),

    /// A 2xx response whose body is not JSON.
    Decode(serde_json::Error),

    /// Cart creation succeeded but the response carried no cart id.
    MissingCartId,
}

impl Error {
    /// The HTTP status for errors that came back from the remote service.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Config(detail) => {
                write!(f, "configuration error: {detail}")
            }

            Error::Validation(_) => {
                write!(f, "invalid customer address")
            }

            Error::Http { status, body } => {
                write!(f, "ERROR {status}: {body}")
            }

            Error::Transport(_) => {
                write!(f, "request failed")
            }

            Error::Decode(_) => {
                write!(f, "response is not valid JSON")
            }

            Error::MissingCartId => {
                write!(f, "No cart id returned")
            }
        }
    }
}

// Variants that wrap another error leave its message to `source()`, so that
// chain-walking reports print it once.
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(e) => Some(e),
            Error::Transport(e) => Some(e),
            Error::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AddressError> for Error {
    fn from(e: AddressError) -> Error {
        Error::Validation(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Transport(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Decode(e)
    }
}
