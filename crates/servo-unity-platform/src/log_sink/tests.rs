use std::sync::{Arc, Mutex};
use std::thread;

use servo_unity_config::LogLevel;
use tracing_subscriber::layer::SubscriberExt;

use super::*;

fn recording_sink(capacity: usize) -> (Arc<LogSink>, Arc<Mutex<Vec<String>>>) {
    let sink = Arc::new(LogSink::new(capacity));
    let lines = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    let callback: LogCallback = Arc::new(move |s: &str| {
        captured.lock().unwrap().push(s.to_string());
    });
    sink.register(Some(callback), true);
    (sink, lines)
}

#[test]
fn format_line_prefixes_level() {
    assert_eq!(format_line(LogLevel::Debug, "hi"), "[debug] hi\n");
    assert_eq!(format_line(LogLevel::Warn, "careful\n"), "[warning] careful\n");
    assert_eq!(format_line(LogLevel::Error, "x"), "[error] x\n");
}

#[test]
fn write_without_callback_is_not_delivered() {
    let sink = LogSink::default();
    assert!(!sink.has_callback());
    assert!(!sink.write(LogLevel::Error, "nobody listening"));
}

#[test]
fn same_thread_delivery_is_immediate() {
    let (sink, lines) = recording_sink(4096);
    assert!(sink.write(LogLevel::Info, "hello"));
    assert_eq!(*lines.lock().unwrap(), vec!["[info] hello\n".to_string()]);
}

#[test]
fn below_threshold_is_dropped() {
    let (sink, lines) = recording_sink(4096);
    sink.set_level(LogLevel::Warn);
    assert!(!sink.write(LogLevel::Info, "quiet"));
    assert!(sink.write(LogLevel::Error, "loud"));
    assert_eq!(lines.lock().unwrap().len(), 1);
    assert!(!sink.accepts(LogLevel::Debug));
    assert!(sink.accepts(LogLevel::Warn));
}

#[test]
fn empty_message_is_ignored() {
    let (sink, lines) = recording_sink(4096);
    assert!(!sink.write(LogLevel::Error, ""));
    assert!(lines.lock().unwrap().is_empty());
}

#[test]
fn other_thread_lines_wait_for_next_same_thread_line() {
    let (sink, lines) = recording_sink(4096);

    let worker = Arc::clone(&sink);
    thread::spawn(move || {
        worker.write(LogLevel::Info, "from worker");
    })
    .join()
    .unwrap();

    assert!(lines.lock().unwrap().is_empty());
    assert!(sink.pending_len() > 0);

    sink.write(LogLevel::Info, "from owner");
    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "[info] from worker\n");
    assert_eq!(lines[1], "[info] from owner\n");
    assert_eq!(sink.pending_len(), 0);
}

#[test]
fn flush_delivers_buffer_on_owner_thread() {
    let (sink, lines) = recording_sink(4096);

    let worker = Arc::clone(&sink);
    thread::spawn(move || {
        worker.write(LogLevel::Warn, "a");
        worker.write(LogLevel::Warn, "b");
        // Flushing from the wrong thread does nothing.
        worker.flush();
    })
    .join()
    .unwrap();
    assert!(lines.lock().unwrap().is_empty());

    sink.flush();
    assert_eq!(
        *lines.lock().unwrap(),
        vec!["[warning] a\n[warning] b\n".to_string()]
    );

    // Nothing left to flush.
    sink.flush();
    assert_eq!(lines.lock().unwrap().len(), 1);
}

#[test]
fn overflow_appends_marker_and_stops() {
    let (sink, lines) = recording_sink(32);

    let worker = Arc::clone(&sink);
    thread::spawn(move || {
        // "[info] 0123456789\n" is 18 bytes; the second one does not fit.
        worker.write(LogLevel::Info, "0123456789");
        worker.write(LogLevel::Info, "0123456789");
        worker.write(LogLevel::Info, "0123456789");
    })
    .join()
    .unwrap();

    assert!(sink.pending_len() <= 32 - 1);
    sink.flush();
    assert_eq!(
        *lines.lock().unwrap(),
        vec!["[info] 0123456789\n...".to_string()]
    );
}

#[test]
fn buffer_accepts_again_after_flush() {
    let (sink, lines) = recording_sink(32);

    let worker = Arc::clone(&sink);
    let fill = move || {
        worker.write(LogLevel::Info, "0123456789");
        worker.write(LogLevel::Info, "0123456789");
    };
    thread::spawn(fill.clone()).join().unwrap();
    sink.flush();
    thread::spawn(fill).join().unwrap();
    sink.flush();

    assert_eq!(lines.lock().unwrap().len(), 2);
}

#[test]
fn any_thread_delivery_when_not_same_thread_only() {
    let sink = Arc::new(LogSink::default());
    let lines = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    sink.register(
        Some(Arc::new(move |s: &str| captured.lock().unwrap().push(s.to_string()))),
        false,
    );

    let worker = Arc::clone(&sink);
    thread::spawn(move || {
        worker.write(LogLevel::Error, "direct");
    })
    .join()
    .unwrap();

    assert_eq!(*lines.lock().unwrap(), vec!["[error] direct\n".to_string()]);
}

#[test]
fn unregister_drops_buffer() {
    let (sink, _lines) = recording_sink(4096);
    let worker = Arc::clone(&sink);
    thread::spawn(move || {
        worker.write(LogLevel::Info, "pending");
    })
    .join()
    .unwrap();
    assert!(sink.pending_len() > 0);

    sink.register(None, true);
    assert_eq!(sink.pending_len(), 0);
    assert!(!sink.has_callback());
}

#[test]
fn callback_may_log_reentrantly() {
    let sink = Arc::new(LogSink::default());
    let inner = Arc::clone(&sink);
    let count = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&count);
    sink.register(
        Some(Arc::new(move |_s: &str| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n == 1 {
                drop(n);
                // Would deadlock if the sink held its lock during delivery.
                inner.set_level(LogLevel::Debug);
            }
        })),
        true,
    );
    sink.write(LogLevel::Info, "first");
    assert_eq!(*count.lock().unwrap(), 1);
    assert_eq!(sink.level(), LogLevel::Debug);
}

#[test]
fn layer_forwards_tracing_events() {
    let (sink, lines) = recording_sink(4096);
    let subscriber = tracing_subscriber::registry().with(HostLogLayer::new(Arc::clone(&sink)));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("window created");
        tracing::warn!(window = 3, "no texture");
        tracing::debug!("hidden at info level");
    });

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "[info] window created\n");
    assert_eq!(lines[1], "[warning] no texture window=3\n");
}

#[test]
fn layer_maps_trace_to_debug() {
    let (sink, lines) = recording_sink(4096);
    sink.set_level(LogLevel::Debug);
    let subscriber = tracing_subscriber::registry().with(HostLogLayer::new(Arc::clone(&sink)));

    tracing::subscriber::with_default(subscriber, || {
        tracing::trace!("very chatty");
    });

    assert_eq!(*lines.lock().unwrap(), vec!["[debug] very chatty\n".to_string()]);
}
