//! Logging setup.
//!
//! Every environment emits JSON lines. `local` and `dev` log at debug level,
//! `prod` at info. `RUST_LOG` overrides the default directive.

use anyhow::Result;
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Environment;

pub fn default_level(env: Environment) -> LevelFilter {
    match env {
        Environment::Local | Environment::Dev => LevelFilter::DEBUG,
        Environment::Prod => LevelFilter::INFO,
    }
}

/// Build the subscriber for `env`, writing formatted events to `writer`.
pub fn subscriber<W>(env: Environment, writer: W) -> Result<impl Subscriber + Send + Sync + 'static>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(env).into())
        .from_env_lossy()
        .add_directive("sqlx=warn".parse()?)
        .add_directive("hyper=warn".parse()?);

    Ok(tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(writer)
        .finish())
}

/// Install the global subscriber, logging to stderr. Call once, before anything logs.
pub fn init(env: Environment) -> Result<()> {
    subscriber(env, std::io::stderr)?
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CapturedLogs, lock_env};

    #[test]
    fn test_default_level_by_env() {
        assert_eq!(default_level(Environment::Local), LevelFilter::DEBUG);
        assert_eq!(default_level(Environment::Dev), LevelFilter::DEBUG);
        assert_eq!(default_level(Environment::Prod), LevelFilter::INFO);
    }

    fn capture(env: Environment, emit: impl FnOnce()) -> Vec<serde_json::Value> {
        let logs = CapturedLogs::default();
        let subscriber = {
            let _env = lock_env();
            subscriber(env, logs.clone()).unwrap()
        };
        tracing::subscriber::with_default(subscriber, emit);

        logs.lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_local_logs_json_with_fields() {
        let events = capture(Environment::Local, || {
            tracing::debug!(num = 7, "number accepted");
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["level"], "DEBUG");
        assert_eq!(events[0]["fields"]["message"], "number accepted");
        assert_eq!(events[0]["fields"]["num"], 7);
    }

    #[test]
    fn test_prod_drops_debug_events() {
        let events = capture(Environment::Prod, || {
            tracing::debug!("hidden");
            tracing::info!("shown");
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["fields"]["message"], "shown");
    }
}
