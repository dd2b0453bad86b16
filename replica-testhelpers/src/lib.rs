#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use replica_testhelpers_macros::test;

use std::sync::LazyLock;
use std::time::Instant;

use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a target filter, such as `replica=debug`.
pub const LOG_ENV: &str = "REPLICA_LOG";

static STARTED: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Timestamps events with the time since the first test started.
struct SinceStart;

impl FormatTime for SinceStart {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = STARTED.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

/// Backtrace frames that never point at the code under test.
const NOISY_FRAMES: &[&str] = &[
    "test::run_test",
    "test::__rust_begin_short_backtrace",
    "std::panicking::",
    "std::panic::",
    "core::panicking::",
    "core::ops::function::FnOnce::call_once",
    "std::sys::backtrace::",
    "std::thread::Builder::spawn_unchecked_",
    "__pthread",
];

fn install_backtraces() {
    color_backtrace::BacktracePrinter::new()
        .verbosity(color_backtrace::Verbosity::Full)
        .add_frame_filter(Box::new(|frames| {
            frames.retain(|frame| match &frame.name {
                Some(name) => !NOISY_FRAMES.iter().any(|prefix| name.starts_with(prefix)),
                None => true,
            });
        }))
        .install(Box::new(termcolor::StandardStream::stderr(
            termcolor::ColorChoice::AlwaysAnsi,
        )));
}

fn install_subscriber() {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|targets| targets.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::TRACE));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_timer(SinceStart)
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
}

static INSTALLED: LazyLock<()> = LazyLock::new(|| {
    LazyLock::force(&STARTED);
    install_backtraces();
    install_subscriber();
});

/// Install the test subscriber and the backtrace printer, once per process.
///
/// Called by [`test`] at the start of every test, so it rarely needs to be
/// called by hand.
pub fn setup() {
    LazyLock::force(&INSTALLED);
}

/// An error type that panics as soon as it is built, so that tests can use
/// `?` and still report where things went wrong.
#[derive(Debug)]
pub struct IPanic;

impl<E> From<E> for IPanic
where
    E: core::error::Error + Send + Sync,
{
    #[track_caller]
    fn from(err: E) -> Self {
        panic!("{}: {err}", core::panic::Location::caller())
    }
}
