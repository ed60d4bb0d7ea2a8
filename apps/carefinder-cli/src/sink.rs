use carefinder_core::intent::Intent;
use carefinder_core::traits::IntentSink;

/// Terminal stand-in for the platform: records the intent in the log and
/// leaves the dialing, mapping and sharing to whoever reads it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

impl IntentSink for LoggingSink {
    fn dispatch(&self, intent: &Intent) -> anyhow::Result<()> {
        tracing::info!(?intent, "dispatching intent");
        Ok(())
    }
}
