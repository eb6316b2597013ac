// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use slog::info;

use super::*;

/// One listing in a cart. Quantity and price are passed through as given;
/// the remote service decides what is valid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub listing_id: String,
    pub quantity: i64,
    pub currency_type: String,
    pub price: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ShoppingCart {
    pub items: Vec<LineItem>,
}

/// Body of `POST /Cart/{cart_id}/Checkout`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartCheckoutRequest {
    pub customer: Customer,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_identifier: Option<String>,
}

/// Body of `POST /Cart/Checkout`, carrying the whole cart inline.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnmanagedCheckoutRequest {
    pub customer: Customer,

    pub shopping_cart: ShoppingCart,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_identifier: Option<String>,
}

/// What to buy and who is buying it.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutOrder {
    pub listing_id: String,
    pub quantity: i64,
    pub price: f64,
    pub currency: String,
    pub customer: CustomerFields,
    pub client_order_id: Option<String>,
}

impl CheckoutOrder {
    pub fn line_item(&self) -> LineItem {
        LineItem {
            listing_id: self.listing_id.clone(),
            quantity: self.quantity,
            currency_type: self.currency.clone(),
            price: self.price,
        }
    }

    /// The client order id is only sent when it has content.
    pub fn client_order_identifier(&self) -> Option<String> {
        self.client_order_id
            .as_ref()
            .filter(|id| !id.trim().is_empty())
            .cloned()
    }
}

/// Pull the cart id out of a `POST /Cart` response. The service has been seen
/// to send it as either a string or a number.
fn cart_id_from_response(response: &Value) -> Result<String, Error> {
    match response.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(Error::MissingCartId),
    }
}

impl<T: ApiTransport> TicketingApi<T> {
    /// Buy through a server-side cart: create the cart, add the line item,
    /// then check the cart out. Each step must succeed before the next is
    /// issued.
    ///
    /// Nothing is undone when a later step fails. In particular the customer
    /// is only built after the item has been added, so an address error
    /// leaves a populated cart behind for the service to expire.
    pub async fn managed_checkout(
        &self,
        order: &CheckoutOrder,
    ) -> Result<Value, Error> {
        let cart = self
            .transport
            .post("/Cart", &serde_json::json!({ "items": [] }))
            .await?;
        let cart_id = cart_id_from_response(&cart)?;

        info!(self.log, "created cart"; "cart_id" => &cart_id);

        let item = serde_json::to_value(order.line_item())?;
        self.transport.post(&format!("/Cart/{cart_id}/Items"), &item).await?;

        info!(
            self.log,
            "added item to cart";
            "cart_id" => &cart_id,
            "listing_id" => &order.listing_id
        );

        let request = CartCheckoutRequest {
            customer: order.customer.build()?,
            client_order_identifier: order.client_order_identifier(),
        };

        let response = self
            .transport
            .post(
                &format!("/Cart/{cart_id}/Checkout"),
                &serde_json::to_value(&request)?,
            )
            .await?;

        info!(self.log, "checked out cart"; "cart_id" => &cart_id);

        Ok(response)
    }

    /// Buy in a single request with the cart embedded in the checkout body.
    pub async fn unmanaged_checkout(
        &self,
        order: &CheckoutOrder,
    ) -> Result<Value, Error> {
        let request = UnmanagedCheckoutRequest {
            customer: order.customer.build()?,
            shopping_cart: ShoppingCart { items: vec![order.line_item()] },
            client_order_identifier: order.client_order_identifier(),
        };

        let response = self
            .transport
            .post("/Cart/Checkout", &serde_json::to_value(&request)?)
            .await?;

        info!(
            self.log,
            "checked out inline cart";
            "listing_id" => &order.listing_id
        );

        Ok(response)
    }
}
