// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

fn cart_not_found(cart_id: &str) -> Response<Body> {
    json_response(
        StatusCode::NOT_FOUND,
        json!({ "message": format!("Cart {cart_id} not found") }),
    )
}

/// Echo a checkout back with a made-up order id.
fn checkout_response(cart_id: Option<&str>, request: Value) -> Response<Body> {
    json_response(
        StatusCode::OK,
        json!({
            "orderId": uuid::Uuid::new_v4().to_string(),
            "cartId": cart_id,
            "status": "Complete",
            "request": request,
        }),
    )
}

#[endpoint {
    method = POST,
    path = "/Cart"
}]
pub async fn create_cart(
    rqctx: RequestContext<Arc<ServerContext>>,
    body: TypedBody<Value>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();

    if let Err(response) = apictx.record(&rqctx, Some(body.into_inner())) {
        return Ok(response);
    }

    let cart_id = apictx.create_cart();

    Ok(json_response(StatusCode::OK, json!({ "id": cart_id, "items": [] })))
}

#[derive(Deserialize, JsonSchema)]
pub struct CartPathParam {
    cart_id: String,
}

// The router cannot hold a literal and a variable in the same path segment,
// so `POST /Cart/Checkout` arrives here with a cart id of "Checkout".
#[endpoint {
    method = POST,
    path = "/Cart/{cart_id}"
}]
pub async fn cart_action(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<CartPathParam>,
    body: TypedBody<Value>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    if let Err(response) = apictx.record(&rqctx, Some(request.clone())) {
        return Ok(response);
    }

    if path_param.cart_id != "Checkout" {
        return Ok(json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            json!({ "message": "POST is not supported on a cart" }),
        ));
    }

    Ok(checkout_response(None, request))
}

#[endpoint {
    method = POST,
    path = "/Cart/{cart_id}/Items"
}]
pub async fn add_item(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<CartPathParam>,
    body: TypedBody<Value>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    if let Err(response) = apictx.record(&rqctx, Some(request.clone())) {
        return Ok(response);
    }

    if !apictx.cart_exists(&path_param.cart_id) {
        return Ok(cart_not_found(&path_param.cart_id));
    }

    if request.get("listingId").and_then(Value::as_str)
        == Some(SOLD_OUT_LISTING)
    {
        return Ok(json_response(
            StatusCode::CONFLICT,
            json!({
                "message":
                    format!("Listing {SOLD_OUT_LISTING} is no longer available")
            }),
        ));
    }

    Ok(json_response(
        StatusCode::OK,
        json!({ "id": path_param.cart_id, "items": [request] }),
    ))
}

#[endpoint {
    method = POST,
    path = "/Cart/{cart_id}/Checkout"
}]
pub async fn checkout_cart(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<CartPathParam>,
    body: TypedBody<Value>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    if let Err(response) = apictx.record(&rqctx, Some(request.clone())) {
        return Ok(response);
    }

    if !apictx.cart_exists(&path_param.cart_id) {
        return Ok(cart_not_found(&path_param.cart_id));
    }

    Ok(checkout_response(Some(&path_param.cart_id), request))
}
