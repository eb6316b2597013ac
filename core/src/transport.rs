// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// The HTTP collaborator that the ticketing operations are written against.
///
/// Both calls return the decoded JSON body of a 2xx response, and report any
/// other status as [`Error::Http`] carrying the status code and body text.
#[trait_variant::make(Send)]
pub trait ApiTransport {
    /// GET `path` with the query pairs appended in order. Keys may repeat.
    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, Error>;

    /// POST `body` as JSON to `path`.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, Error>;
}
