use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Initialize a global `tracing` subscriber that prints passthru output to
/// the console.
///
/// **Effects**
///
/// Installs a [`Registry`] with a `fmt` layer as the global default
/// subscriber, so everything the capture pipeline forwards through
/// [`TracingLogger`](crate::tracing_logger::TracingLogger) is visible on
/// stdout. Services that already install their own subscriber should skip
/// this and keep whatever they have; the capture pipeline does not care
/// which subscriber receives the forwarded messages.
pub fn init_passthru_output() {
    let subscriber = Registry::default().with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
}
