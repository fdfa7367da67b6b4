//! Startup helpers: user name resolution and logging setup.

use fmsh::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

pub(crate) const ANONYMOUS_USER: &str = "Anonymous";

/// Display name for the session: `--username`, then the OS user, then
/// `Anonymous`.
pub(crate) fn resolve_user_name<FEnv>(arg: Option<&str>, env_lookup: FEnv) -> String
where
    FEnv: Fn(&str) -> Option<String>,
{
    arg.map(str::to_string)
        .into_iter()
        .chain(["USER", "USERNAME"].into_iter().filter_map(&env_lookup))
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| ANONYMOUS_USER.to_string())
}

/// Install the stderr `tracing` subscriber. An unparsable filter falls back to
/// the default level; a second call is a no-op.
pub(crate) fn init_logging(filter: &str) {
    let env_filter =
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
