// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use anyhow::Context;
use aurora_rs::ApiTransport;
use aurora_rs::CheckoutOrder;
use aurora_rs::ClientConfig;
use aurora_rs::CustomerFields;
use aurora_rs::DEFAULT_ENV;
use aurora_rs::TicketingApi;
use aurora_rs::base_url_for_env;
use clap::Args as ClapArgs;
use clap::Parser;
use clap::Subcommand;
use serde_json::Value;

use crate::parse_log_level;

#[derive(Debug, Parser)]
#[clap(name = "aurora", about = "Aurora ticketing API client")]
pub struct Args {
    /// A Bearer token
    #[clap(long, env = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Environment subdomain, e.g. sandbox or prod
    #[clap(long, env = "ENV", default_value = DEFAULT_ENV)]
    pub env: String,

    /// Use this base URL instead of https://{env}.tflapis.com
    #[clap(long, env = "AURORA_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout
    #[clap(long, default_value_t = 60)]
    pub timeout_secs: u64,

    #[clap(
        long,
        env = "LOG_LEVEL",
        default_value = "warning",
        value_parser = parse_log_level
    )]
    pub log_level: slog::Level,

    #[clap(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| base_url_for_env(&self.env)),
            token: self.token.clone().unwrap_or_default(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search events by text
    QueryEvents { search: String },

    /// List the tickets for an event
    QueryTickets { event_id: String },

    /// Autocomplete across events, performers, venues and categories
    QueryAutocomplete { search: String },

    /// Create a cart, add a listing to it, then check it out
    #[clap(allow_negative_numbers = true)]
    ManagedCheckout(CheckoutArgs),

    /// Check out a listing in one request, without a server-side cart
    #[clap(allow_negative_numbers = true)]
    UnmanagedCheckout(CheckoutArgs),
}

#[derive(Debug, ClapArgs)]
pub struct CheckoutArgs {
    pub listing_id: String,

    pub quantity: i64,

    pub price: f64,

    /// Currency code, e.g. USD
    pub currency: String,

    #[clap(flatten)]
    pub customer: CustomerArgs,

    /// Passed through to the service as clientOrderIdentifier
    #[clap(long)]
    pub client_order_id: Option<String>,
}

impl From<CheckoutArgs> for CheckoutOrder {
    fn from(args: CheckoutArgs) -> CheckoutOrder {
        CheckoutOrder {
            listing_id: args.listing_id,
            quantity: args.quantity,
            price: args.price,
            currency: args.currency,
            customer: args.customer.into(),
            client_order_id: args.client_order_id,
        }
    }
}

/// Customer details. If any of address1, city, region, postal or country is
/// given then all of them are required; address2 is optional.
#[derive(Debug, ClapArgs)]
pub struct CustomerArgs {
    #[clap(long, env = "EMAIL")]
    pub email: Option<String>,

    #[clap(long, alias = "first", env = "FIRST_NAME")]
    pub first_name: Option<String>,

    #[clap(long, alias = "last", env = "LAST_NAME")]
    pub last_name: Option<String>,

    #[clap(long, env = "PHONE")]
    pub phone: Option<String>,

    #[clap(long, env = "ADDRESS1")]
    pub address1: Option<String>,

    #[clap(long, env = "ADDRESS2")]
    pub address2: Option<String>,

    #[clap(long, env = "CITY")]
    pub city: Option<String>,

    /// Region or state
    #[clap(long, env = "REGION")]
    pub region: Option<String>,

    /// Postal or zip code
    #[clap(long, env = "POSTAL")]
    pub postal: Option<String>,

    /// Country code
    #[clap(long, env = "COUNTRY")]
    pub country: Option<String>,
}

impl From<CustomerArgs> for CustomerFields {
    fn from(args: CustomerArgs) -> CustomerFields {
        CustomerFields {
            email: args.email,
            first: args.first_name,
            last: args.last_name,
            phone: args.phone,
            address1: args.address1,
            address2: args.address2,
            city: args.city,
            region: args.region,
            postal: args.postal,
            country: args.country,
        }
    }
}

/// Run one command and hand back the service's JSON response.
pub async fn run_command<T: ApiTransport>(
    api: &TicketingApi<T>,
    command: Command,
) -> anyhow::Result<Value> {
    let response = match command {
        Command::QueryEvents { search } => {
            api.search_events(&search).await.context("query-events")?
        }

        Command::QueryTickets { event_id } => {
            api.event_tickets(&event_id).await.context("query-tickets")?
        }

        Command::QueryAutocomplete { search } => {
            api.autocomplete(&search).await.context("query-autocomplete")?
        }

        Command::ManagedCheckout(args) => api
            .managed_checkout(&args.into())
            .await
            .context("managed-checkout")?,

        Command::UnmanagedCheckout(args) => api
            .unmanaged_checkout(&args.into())
            .await
            .context("unmanaged-checkout")?,
    };

    Ok(response)
}

#[cfg(test)]
mod test {
    use aurora_rs::{
        CheckoutOrder, CustomerFields, Error, HttpClient, TicketingApi,
    };
    use aurora_test_stub_server::create_http_server;
    use clap::Parser;
    use slog::Logger;

    use crate::{Args, Command, run_command};

    fn test_log() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    #[test]
    fn test_parse_query_commands() {
        let args = Args::try_parse_from(["aurora", "query-events", "Chiefs"])
            .unwrap();
        assert!(matches!(
            args.command,
            Command::QueryEvents { search } if search == "Chiefs"
        ));

        let args =
            Args::try_parse_from(["aurora", "query-tickets", "E-100"]).unwrap();
        assert!(matches!(
            args.command,
            Command::QueryTickets { event_id } if event_id == "E-100"
        ));

        let args = Args::try_parse_from([
            "aurora",
            "query-autocomplete",
            "Taylor Swift",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Command::QueryAutocomplete { search } if search == "Taylor Swift"
        ));
    }

    #[test]
    fn test_parse_checkout_positionals_then_flags() {
        let args = Args::try_parse_from([
            "aurora",
            "managed-checkout",
            "L1",
            "2",
            "26.0",
            "USD",
            "--first-name",
            "Jane",
            "--last",
            "Doe",
            "--address1",
            "1 Main",
            "--client-order-id",
            "order-1",
        ])
        .unwrap();

        let Command::ManagedCheckout(checkout) = args.command else {
            panic!("expected managed-checkout");
        };

        let order: CheckoutOrder = checkout.into();
        assert_eq!(order.listing_id, "L1");
        assert_eq!(order.quantity, 2);
        assert_eq!(order.price, 26.0);
        assert_eq!(order.currency, "USD");
        assert_eq!(order.customer.first.as_deref(), Some("Jane"));
        assert_eq!(order.customer.last.as_deref(), Some("Doe"));
        assert_eq!(order.customer.address1.as_deref(), Some("1 Main"));
        assert_eq!(order.client_order_id.as_deref(), Some("order-1"));
    }

    #[test]
    fn test_quantity_is_not_bounds_checked() {
        let args = Args::try_parse_from([
            "aurora",
            "unmanaged-checkout",
            "L1",
            "-1",
            "0",
            "USD",
        ])
        .unwrap();

        let Command::UnmanagedCheckout(checkout) = args.command else {
            panic!("expected unmanaged-checkout");
        };
        assert_eq!(checkout.quantity, -1);
        assert_eq!(checkout.price, 0.0);
    }

    #[test]
    fn test_usage_errors() {
        // Missing positionals
        assert!(
            Args::try_parse_from(["aurora", "managed-checkout", "L1"]).is_err()
        );

        // Quantity must be an integer
        assert!(
            Args::try_parse_from([
                "aurora",
                "unmanaged-checkout",
                "L1",
                "two",
                "26.0",
                "USD",
            ])
            .is_err()
        );

        // Unknown command
        assert!(Args::try_parse_from(["aurora", "refund", "O-1"]).is_err());
    }

    #[test]
    fn test_client_config() {
        let args = Args::try_parse_from([
            "aurora",
            "--token",
            "abc",
            "--env",
            "prod",
            "query-events",
            "x",
        ])
        .unwrap();

        let config = args.client_config();
        assert_eq!(config.base_url, "https://prod.tflapis.com");
        assert_eq!(config.token, "abc");

        let args = Args::try_parse_from([
            "aurora",
            "--base-url",
            "http://127.0.0.1:4567",
            "query-events",
            "x",
        ])
        .unwrap();
        assert_eq!(args.client_config().base_url, "http://127.0.0.1:4567");
    }

    #[test]
    fn test_address_error_reported_once() {
        let fields = CustomerFields {
            city: Some("KC".to_string()),
            ..Default::default()
        };
        let error = anyhow::Error::new(Error::from(fields.build().unwrap_err()))
            .context("managed-checkout");

        let report = format!("{error:?}");
        assert_eq!(report.matches("address2 is optional").count(), 1);
        assert!(report.contains("missing: address1, region, postal, country"));
    }

    #[tokio::test]
    async fn test_run_command_against_stub() {
        let server =
            create_http_server(test_log(), None, Some("abc".to_string()))
                .unwrap();

        let args = Args::try_parse_from([
            "aurora".to_string(),
            "--token".to_string(),
            "abc".to_string(),
            "--base-url".to_string(),
            format!("http://{}", server.local_addr()),
            "unmanaged-checkout".to_string(),
            "L1".to_string(),
            "2".to_string(),
            "26.0".to_string(),
            "USD".to_string(),
            "--city".to_string(),
            "KC".to_string(),
        ])
        .unwrap();

        let client =
            HttpClient::new(test_log(), args.client_config()).unwrap();
        let api = TicketingApi::new(test_log(), client);

        // A lone city trips the address rule before anything is sent.
        let error = run_command(&api, args.command).await.unwrap_err();
        assert_eq!(error.to_string(), "unmanaged-checkout");
        assert!(format!("{error:#}").contains("region"));
        assert!(server.app_private().requests().is_empty());

        let response = run_command(
            &api,
            Command::QueryTickets { event_id: "E-100".to_string() },
        )
        .await
        .unwrap();
        assert_eq!(response["listings"][0]["id"], "L1");

        server.close().await.unwrap();
    }
}
