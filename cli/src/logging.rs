// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use slog::Drain;
use slog::Level;
use slog::Logger;

/// Parse a level name as slog spells them: critical, error, warning, info,
/// debug, trace (or their short forms).
pub fn parse_log_level(level: &str) -> Result<Level, String> {
    Level::from_str(level).map_err(|()| format!("unknown log level {level}"))
}

/// A terminal logger on stderr, so that stdout only ever carries the JSON
/// response.
pub fn stderr_logger(level: Level) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();

    Logger::root(drain, slog::o!())
}
