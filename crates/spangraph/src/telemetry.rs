use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

pub fn init_cli_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false);

    // Machine-readable runs keep stderr free of color codes as well.
    let _ = if json {
        builder.with_ansi(false).json().try_init()
    } else {
        builder
            .with_ansi(std::io::stderr().is_terminal())
            .compact()
            .try_init()
    };
}
