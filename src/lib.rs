//! # grblwire
//!
//! Wire protocol layer of a GRBL-style CNC controller:
//! - numeric field decoding for incoming command lines
//! - response frames: acknowledgements, alarms, feedback messages, settings
//!   dump, coordinate parameters, modal state, build info
//! - the throttled `<...>` realtime status report
//! - frame delivery to serial and network clients
//!
//! ## Architecture
//!
//! 1. **grblwire-core** - Snapshot, settings, feature and code types
//! 2. **grblwire-protocol** - Decoder, encoders, status reporter, transports
//! 3. **grblwire-settings** - Configuration files
//! 4. **grblwire** - Facade and command-line harness

pub use grblwire_core as types;
pub use grblwire_protocol as protocol;
pub use grblwire_settings as settings;

pub use grblwire_core::{
    AlarmCode, ClientTarget, CoordinateFrame, CoordinateStore, Error, FeatureConfiguration,
    InMemoryCoordinateStore, MachineStateSnapshot, Result, RunState, SettingsRecord, StatusCode,
};
pub use grblwire_protocol::{
    read_float, FeedbackMessage, MemoryTransport, MessageLevel, ReportConfig, Reporter,
    StatusReporter, Transport, WriterTransport,
};
pub use grblwire_settings::{default_config_path, Config};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Decode the numeric words of a command line
///
/// Each word is a letter followed by a number. Whitespace between words is
/// skipped. The first word without a number fails the whole line.
pub fn decode_words(line: &str) -> Result<Vec<(char, f32)>> {
    let bytes = line.as_bytes();
    let mut words = Vec::new();
    let mut cursor = 0;
    while cursor < bytes.len() {
        let letter = bytes[cursor];
        if letter.is_ascii_whitespace() {
            cursor += 1;
            continue;
        }
        let field = read_float(bytes, cursor + 1)?;
        words.push((letter as char, field.value));
        cursor = field.end;
    }
    Ok(words)
}

/// Initialize logging with the default configuration
///
/// Logs go to stderr so frames written to stdout stay clean. `RUST_LOG`
/// overrides the default INFO level; `json` selects JSON lines.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_words() {
        let words = decode_words("G1 X10.5F-300").unwrap();
        assert_eq!(words, vec![('G', 1.0), ('X', 10.5), ('F', -300.0)]);
        assert!(decode_words("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_words_failure_acknowledges_bad_number() {
        let err = decode_words("G1 X.F300").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(err.status_code(), StatusCode::BadNumberFormat);
        assert_eq!(err.to_string(), "No numeric value at offset 4");
    }
}
