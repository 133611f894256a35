use crate::errors::LoggingError;
use configs::{AppConfigs, Environment};
use tracing::warn;
use tracing_bunyan_formatter::BunyanFormattingLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{
        format::{Format, Pretty},
        Layer,
    },
    layer::SubscriberExt,
};

/// Crates whose logs are capped at `WARN` unless external logging is enabled.
const EXTERNAL_CRATES: [&str; 8] = [
    "aws_config",
    "aws_sdk_secretsmanager",
    "aws_smithy_runtime",
    "aws_smithy_runtime_api",
    "hyper",
    "h2",
    "rustls",
    "log",
];

/// Installs the global tracing subscriber: pretty output for local runs, bunyan JSON
/// everywhere else.
pub fn setup(cfg: &AppConfigs) -> Result<(), LoggingError> {
    if let Err(err) = LogTracer::init() {
        warn!(
            error = err.to_string(),
            "failure to initialize log bridge, probably it was already initialized"
        );
    }

    let mut fmt_pretty: Option<Layer<_, Pretty, Format<Pretty>>> = None;
    let mut fmt_json = None;

    if cfg.env == Environment::Local {
        fmt_pretty = Some(Layer::new().pretty());
    } else {
        fmt_json = Some(BunyanFormattingLayer::new(
            cfg.name.to_owned(),
            std::io::stdout,
        ));
    }

    match tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(fmt_json)
            .with(fmt_pretty)
            .with(target_filters(cfg)),
    ) {
        Err(err) => {
            warn!(error = err.to_string(), "failure to set tracing subscriber");
            Err(LoggingError::SubscriberAlreadySet)
        }
        _ => Ok(()),
    }
}

fn target_filters(cfg: &AppConfigs) -> Targets {
    let level_filter = get_log_level_filter(cfg);
    let targets = Targets::new().with_default(level_filter);

    if cfg.enable_external_creates_logging {
        return targets;
    }

    EXTERNAL_CRATES
        .iter()
        .fold(targets, |targets, krate| {
            targets.with_target(*krate, LevelFilter::WARN)
        })
}

fn get_log_level_filter(cfg: &AppConfigs) -> LevelFilter {
    match cfg.log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::OFF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn setup_successfully() {
        let res = setup(&AppConfigs::default());
        assert!(res.is_ok());
    }

    #[test]
    fn get_log_level_successfully() {
        let mut cfg = AppConfigs::default();

        for (level, expected) in [
            ("trace", LevelFilter::TRACE),
            ("Debug", LevelFilter::DEBUG),
            ("INFO", LevelFilter::INFO),
            ("warn", LevelFilter::WARN),
            ("Error", LevelFilter::ERROR),
            ("UNKNOWN", LevelFilter::OFF),
        ] {
            cfg.log_level = level.to_owned();
            assert_eq!(get_log_level_filter(&cfg), expected);
        }
    }

    #[test]
    fn caps_external_crates() {
        let mut cfg = AppConfigs::default();

        let targets = target_filters(&cfg);
        assert!(targets.would_enable("secret_connector", &Level::DEBUG));
        assert!(!targets.would_enable("aws_smithy_runtime", &Level::DEBUG));
        assert!(targets.would_enable("aws_smithy_runtime", &Level::WARN));

        cfg.enable_external_creates_logging = true;
        let targets = target_filters(&cfg);
        assert!(targets.would_enable("aws_smithy_runtime", &Level::DEBUG));
    }
}
