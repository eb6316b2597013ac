// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use slog::debug;

use super::*;

/// Event search always asks for the first page of this size.
pub const EVENTS_PER_PAGE: &str = "10";

/// Catalogs searched by autocomplete, in the order they are requested.
pub const AUTOCOMPLETE_CATALOGS: [&str; 4] =
    ["event", "performer", "venue", "category"];

impl<T: ApiTransport> TicketingApi<T> {
    /// `GET /Catalog/Events?query={query}&perPage=10&page=1`
    pub async fn search_events(&self, query: &str) -> Result<Value, Error> {
        debug!(self.log, "searching events"; "query" => query);

        self.transport
            .get(
                "/Catalog/Events",
                &[
                    ("query", query),
                    ("perPage", EVENTS_PER_PAGE),
                    ("page", "1"),
                ],
            )
            .await
    }

    /// `GET /Catalog/Events/{event_id}/Tickets`
    pub async fn event_tickets(&self, event_id: &str) -> Result<Value, Error> {
        debug!(self.log, "listing tickets"; "event_id" => event_id);

        self.transport
            .get(&format!("/Catalog/Events/{event_id}/Tickets"), &[])
            .await
    }

    /// `GET /Catalog/Autocomplete?searchText={search}` across every catalog
    /// in [`AUTOCOMPLETE_CATALOGS`].
    pub async fn autocomplete(&self, search: &str) -> Result<Value, Error> {
        debug!(self.log, "autocomplete"; "search" => search);

        let mut query = vec![("searchText", search)];
        query.extend(AUTOCOMPLETE_CATALOGS.iter().map(|c| ("catalogs", *c)));

        self.transport.get("/Catalog/Autocomplete", &query).await
    }
}
