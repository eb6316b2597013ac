// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// TicketingApi implements the catalog queries and checkout flows over some
/// transport, shaping request bodies and handing back the raw JSON the remote
/// service returns.
pub struct TicketingApi<T: ApiTransport> {
    pub(crate) log: Logger,
    pub(crate) transport: T,
}

impl<T: ApiTransport> TicketingApi<T> {
    pub fn new(log: Logger, transport: T) -> Self {
        Self { log, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
