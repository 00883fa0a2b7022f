use std::io::Write;

use log::LevelFilter;

/// `RUST_LOG` still wins over the command-line level when set.
pub(super) fn init(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .parse_default_env();

    // A logger may already be installed when embedded in another process.
    let _ = builder.try_init();
}
