use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so `--format json` output stays parseable
pub fn init_tracing(default_level: LevelFilter) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
