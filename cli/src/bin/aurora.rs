// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use aurora_cli::Args;
use aurora_cli::run_command;
use aurora_cli::stderr_logger;
use aurora_rs::HttpClient;
use aurora_rs::TicketingApi;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Usage errors exit with status 2 from here, before anything else runs.
    let opt: Args = Args::parse();

    let log = stderr_logger(opt.log_level);

    // A missing token is rejected here, before any request is made.
    let client = HttpClient::new(log.clone(), opt.client_config())?;
    let api = TicketingApi::new(log, client);

    let response = run_command(&api, opt.command).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
