//! Tracing subscriber setup: console formatter and initialisation.

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits aqua-sync-style
/// console output.
struct AquaSyncFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for AquaSyncFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        let ansi = writer.has_ansi_escapes();
        let paint = |code: &str, text: &str| {
            if ansi {
                format!("\x1b[{code}m{text}\x1b[0m")
            } else {
                text.to_string()
            }
        };

        match level {
            tracing::Level::ERROR => writeln!(writer, "{} {msg}", paint("31", "ERROR")),
            tracing::Level::WARN => writeln!(writer, "{}  {msg}", paint("33", "WARN")),
            tracing::Level::INFO if target == "aqua_sync::stage" => {
                writeln!(writer, "{} {}", paint("1;34", "==>"), paint("1", msg))
            }
            tracing::Level::INFO if target == "aqua_sync::dry_run" => {
                writeln!(writer, "  {} {msg}", paint("33", "[DRY RUN]"))
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  {}", paint("2", msg)),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// All console output goes to stderr; stdout carries only the final summary
/// line. Warnings and errors are always shown, stage and info output only
/// with `verbose`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use std::io::IsTerminal as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let console_layer = fmt::layer()
        .event_format(AquaSyncFormatter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_filter(console_level);

    tracing_subscriber::registry().with(console_layer).init();
}
