//! Colorful console output for pipeline events.
//!
//! Provides a custom `tracing` layer that formats evaluation, aggregation
//! and pruning events with colors. Enabled with the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `statgram=info` filter; set
/// `RUST_LOG=statgram=debug,statgram_scoring=debug` to see every stage.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("statgram=info,statgram_scoring=info"));

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PipelineConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let version_line = format!(
        "statgram v{} - harmonic evaluation of candidate structures",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats pipeline events with colors.
pub struct PipelineConsoleLayer;

impl<S: Subscriber> Layer<S> for PipelineConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Only handle statgram events
        if !event.metadata().target().starts_with("statgram") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_pipeline_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    semantics: Option<String>,
    elements: Option<u64>,
    marked: Option<u64>,
    ignored: Option<u64>,
    marks: Option<u64>,
    ill_formed: Option<u64>,
    evaluated: Option<u64>,
    removed: Option<u64>,
    candidates: Option<u64>,
    well_formed: Option<u64>,
    total_harmony: Option<f64>,
    parallel: Option<bool>,
    empty: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "semantics" => self.semantics = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "elements" => self.elements = Some(value),
            "marked" => self.marked = Some(value),
            "ignored" => self.ignored = Some(value),
            "marks" => self.marks = Some(value),
            "ill_formed" => self.ill_formed = Some(value),
            "evaluated" => self.evaluated = Some(value),
            "removed" => self.removed = Some(value),
            "candidates" => self.candidates = Some(value),
            "well_formed" => self.well_formed = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "total_harmony" {
            self.total_harmony = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "parallel" => self.parallel = Some(value),
            "empty" => self.empty = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "semantics" => self.semantics = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_pipeline_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "eval_done" => format_eval_done(v),
        "stat_done" => format_stat_done(v),
        "prune_done" => format_prune_done(v),
        "select_done" => format_select_done(v),
        _ => String::new(),
    }
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_eval_done(v: &EventVisitor) -> String {
    let mode = if v.parallel.unwrap_or(false) {
        "parallel"
    } else {
        "sequential"
    };
    format!(
        "{} {} {} {} elements ({} marked, {} ignored), {} marks, {}",
        timestamp().bright_black(),
        "DEBUG".bright_blue(),
        "[Eval]".bright_cyan(),
        count(v.elements).bright_yellow(),
        count(v.marked).yellow(),
        count(v.ignored).white(),
        count(v.marks).bright_yellow(),
        mode.bright_black()
    )
}

fn format_stat_done(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} harmony ({}), ill-formed ({} of {})",
        timestamp().bright_black(),
        "DEBUG".bright_blue(),
        "[Stat]".bright_cyan(),
        semantics(v),
        format_harmony(v.total_harmony.unwrap_or(0.0)),
        count(v.ill_formed).bright_red(),
        count(v.elements).white()
    )
}

fn format_prune_done(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {} {} removed ({} of {}), harmony ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Prune]".bright_cyan(),
        semantics(v),
        count(v.removed).bright_red(),
        count(v.evaluated).white(),
        format_harmony(v.total_harmony.unwrap_or(0.0))
    );
    if v.empty.unwrap_or(false) {
        output.push_str(&format!(" {}", "language is empty".bright_red().bold()));
    }
    output
}

fn format_select_done(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} well-formed ({} of {})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Select]".bright_cyan(),
        semantics(v),
        count(v.well_formed).bright_green().bold(),
        count(v.candidates).white()
    )
}

fn semantics(v: &EventVisitor) -> String {
    v.semantics
        .as_deref()
        .unwrap_or("?")
        .white()
        .bold()
        .to_string()
}

fn format_harmony(h: f64) -> String {
    if h < 0.0 {
        h.to_string().bright_red().to_string()
    } else {
        h.to_string().bright_green().to_string()
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            semantics: Some("HG".to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_unknown_events_are_silent() {
        assert!(format_pipeline_event(&visitor("element_marked")).is_empty());
        assert!(format_pipeline_event(&EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_prune_event_reports_counts() {
        let mut v = visitor("prune_done");
        v.removed = Some(1234);
        v.evaluated = Some(5000);
        v.total_harmony = Some(-2.5);
        v.empty = Some(true);
        let line = format_pipeline_event(&v);
        assert!(line.contains("1,234"));
        assert!(line.contains("5,000"));
        assert!(line.contains("-2.5"));
        assert!(line.contains("language is empty"));
    }

    #[test]
    fn test_select_event() {
        let mut v = visitor("select_done");
        v.well_formed = Some(3);
        v.candidates = Some(5);
        let line = format_pipeline_event(&v);
        assert!(line.contains("[Select]"));
        assert!(line.contains('3'));
    }
}
