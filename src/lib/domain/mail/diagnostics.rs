//! Diagnostic sink

#[cfg(test)]
use mockall::mock;
use tracing::Level;

/// Receives one entry for every failed provider call
pub trait DiagnosticSink: Send + Sync + 'static {
    /// Records `message` at `level`
    fn log(&self, message: &str, level: Level);
}

/// Forwards diagnostics to `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, message: &str, level: Level) {
        if level == Level::ERROR {
            tracing::error!("{message}");
        } else if level == Level::WARN {
            tracing::warn!("{message}");
        } else if level == Level::INFO {
            tracing::info!("{message}");
        } else if level == Level::DEBUG {
            tracing::debug!("{message}");
        } else {
            tracing::trace!("{message}");
        }
    }
}

#[cfg(test)]
mock! {
    pub DiagnosticSink {}

    impl DiagnosticSink for DiagnosticSink {
        fn log(&self, message: &str, level: Level);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_sink_logs_at_requested_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let levels = [
            Level::ERROR,
            Level::WARN,
            Level::INFO,
            Level::DEBUG,
            Level::TRACE,
        ];

        tracing::subscriber::with_default(subscriber, || {
            for level in levels {
                TracingSink.log(&format!("entry at {level}"), level);
            }
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();

        for level in levels {
            assert!(
                output.lines().any(|line| {
                    line.contains(&format!("{level} ses_dispatch"))
                        && line.ends_with(&format!("entry at {level}"))
                }),
                "no {level} entry in {output:?}"
            );
        }
    }
}
