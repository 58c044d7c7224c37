use colored::Colorize;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{FmtContext, FormatEvent, FormatFields, format},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

pub struct EventLoggerFormatter {
    quiet: bool,
}

impl<S, N> FormatEvent<S, N> for EventLoggerFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if self.quiet {
            return Ok(());
        }

        if event.metadata().name() == "SKIP_FORMAT" {
            ctx.field_format().format_fields(writer.by_ref(), event)?;
            return writeln!(writer);
        }

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string().dimmed();

        // Records bridged from `log` all share the same generic name, so they get their level as a label instead.
        let event_name = event.metadata().name();
        let label = match *event.metadata().level() {
            Level::ERROR => " error".bold().red(),
            Level::WARN => " warn".bold().yellow(),
            _ if event_name.is_empty() || event_name.starts_with("log event") || event_name.starts_with("event ") => {
                "".normal()
            }
            _ => format!(" {}", event_name.to_ascii_lowercase()).bold().bright_yellow(),
        };

        write!(writer, "{}{} ", timestamp, label)?;

        // Write fields on the event
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

pub fn init_logging(quiet: bool) {
    let tracing_formatter = tracing_subscriber::fmt::layer().event_format(EventLoggerFormatter { quiet });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("finx7=info,{}=info,tower_http=info", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_formatter)
        .init();
}
