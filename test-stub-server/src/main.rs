// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::net::SocketAddr;

use aurora_test_stub_server::create_http_server;
use clap::Parser;
use slog::Drain;

#[derive(Debug, Parser)]
#[clap(about = "Stub ticketing API server for local testing")]
struct Args {
    // Note that port "4567" is arbitrarily chosen.
    #[clap(long, default_value = "127.0.0.1:4567")]
    bind_addr: SocketAddr,

    /// Reject requests that do not carry this bearer token
    #[clap(long)]
    bearer: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt: Args = Args::try_parse()?;

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let log = slog::Logger::root(drain, slog::o!());

    let http_server = create_http_server(log, Some(opt.bind_addr), opt.bearer)?;
    if let Err(s) = http_server.await {
        anyhow::bail!("Error from start(): {}", s);
    }

    Ok(())
}
