// logging.rs - tracing -> browser console
//
// A plain fmt layer without timestamps (no clock on wasm32) whose writer
// hands each finished line to console.{error,warn,info,log} by level.

use std::io;
use std::sync::Once;

use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wasm_bindgen::JsValue;
use web_sys::console;

static INSTALL: Once = Once::new();

/// Install the console subscriber and panic hook. Safe to call repeatedly.
pub fn install() {
    INSTALL.call_once(|| {
        let level = if cfg!(debug_assertions) { LevelFilter::DEBUG } else { LevelFilter::INFO };

        let fmt = tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false)
            .with_writer(ConsoleMakeWriter);

        // Someone else got there first; keep theirs
        let _ = tracing_subscriber::registry().with(level).with(fmt).try_init();

        std::panic::set_hook(Box::new(|info| {
            console::error_1(&info.to_string().into());
        }));
    });
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one event, emits it on drop.
struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self { level, buf: Vec::with_capacity(128) }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() { return; }
        let text = String::from_utf8_lossy(&self.buf);
        let line: JsValue = text.trim_end().into();
        match self.level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            _ => console::log_1(&line),
        }
    }
}
