use folio_types::EntryKey;

/// Receives requests to preload linked entries.
///
/// Requests are fire-and-forget: the caller never waits on the result.
/// Readiness is reported separately through the store's event channel.
pub trait LinkSink: Send + Sync {
    fn request_entry(&self, key: &EntryKey);
}

/// Discards every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLinkSink;

impl LinkSink for NoopLinkSink {
    fn request_entry(&self, _key: &EntryKey) {}
}
