// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[endpoint {
    method = GET,
    path = "/Catalog/Events"
}]
pub async fn search_events(
    rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();

    if let Err(response) = apictx.record(&rqctx, None) {
        return Ok(response);
    }

    Ok(json_response(
        StatusCode::OK,
        json!({
            "page": 1,
            "perPage": 10,
            "total": 1,
            "records": [
                {
                    "id": "E-100",
                    "name": "Chiefs vs Raiders",
                    "date": "2026-11-08",
                    "time": "12:00",
                    "categories": [
                        { "id": "C-1", "name": "NFL", "type": "sport" }
                    ],
                    "venue": {
                        "id": "V-1",
                        "name": "Arrowhead Stadium",
                        "city": "Kansas City",
                        "region": "MO",
                        "postalCode": "64129",
                        "country": "US"
                    }
                }
            ]
        }),
    ))
}

#[derive(Deserialize, JsonSchema)]
pub struct EventPathParam {
    event_id: String,
}

#[endpoint {
    method = GET,
    path = "/Catalog/Events/{event_id}/Tickets"
}]
pub async fn event_tickets(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<EventPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    if let Err(response) = apictx.record(&rqctx, None) {
        return Ok(response);
    }

    Ok(json_response(
        StatusCode::OK,
        json!({
            "eventId": path_param.event_id,
            "listings": [
                {
                    "id": "L1",
                    "section": "101",
                    "row": "A",
                    "quantity": 4,
                    "price": 26.0,
                    "currencyType": "USD"
                }
            ]
        }),
    ))
}

#[endpoint {
    method = GET,
    path = "/Catalog/Autocomplete"
}]
pub async fn autocomplete(
    rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();

    if let Err(response) = apictx.record(&rqctx, None) {
        return Ok(response);
    }

    Ok(json_response(
        StatusCode::OK,
        json!({
            "events": [{ "id": "E-100", "name": "Chiefs vs Raiders" }],
            "performers": [{ "id": "P-7", "name": "Kansas City Chiefs" }],
            "venues": [],
            "categories": []
        }),
    ))
}
