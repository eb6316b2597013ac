// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use slog::Logger;

mod api;
mod catalog;
mod checkout;
mod customer;
mod error;
mod http_client;
mod transport;

pub use api::*;
pub use catalog::*;
pub use checkout::*;
pub use customer::*;
pub use error::*;
pub use http_client::*;
pub use transport::*;
