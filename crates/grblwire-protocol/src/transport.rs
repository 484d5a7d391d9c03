//! Frame delivery
//!
//! The [`Transport`] trait is the seam between the encoders and the
//! physical channels. Encoders never fail on delivery: a channel that
//! cannot take a frame is the transport's problem to log or retry.

use grblwire_core::ClientTarget;
use std::io::Write;

/// Delivers finished frames to one or more logical clients
pub trait Transport {
    /// Send one complete frame to `client`
    fn send(&mut self, client: ClientTarget, frame: &[u8]);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, client: ClientTarget, frame: &[u8]) {
        (**self).send(client, frame)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, client: ClientTarget, frame: &[u8]) {
        (**self).send(client, frame)
    }
}

/// Transport over a serial writer and an optional network writer
pub struct WriterTransport<S: Write, N: Write> {
    serial: S,
    network: Option<N>,
}

impl<S: Write, N: Write> WriterTransport<S, N> {
    pub fn new(serial: S, network: Option<N>) -> Self {
        Self { serial, network }
    }

    pub fn into_inner(self) -> (S, Option<N>) {
        (self.serial, self.network)
    }

    fn write_to(channel: &str, sink: &mut dyn Write, frame: &[u8]) {
        if let Err(e) = sink.write_all(frame).and_then(|_| sink.flush()) {
            tracing::warn!("Failed to write frame to {} channel: {}", channel, e);
        }
    }
}

impl<S: Write> WriterTransport<S, std::io::Sink> {
    /// Transport with only a serial channel
    pub fn serial_only(serial: S) -> Self {
        Self {
            serial,
            network: None,
        }
    }
}

impl<S: Write, N: Write> Transport for WriterTransport<S, N> {
    fn send(&mut self, client: ClientTarget, frame: &[u8]) {
        let text = String::from_utf8_lossy(frame);
        tracing::trace!(%client, frame = %text.trim_end(), "send");
        if client.includes_serial() {
            Self::write_to("serial", &mut self.serial, frame);
        }
        if client.includes_network() {
            if let Some(network) = self.network.as_mut() {
                Self::write_to("network", network, frame);
            }
        }
    }
}

/// Transport that records every frame in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    frames: Vec<(ClientTarget, String)>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame sent so far, in order
    pub fn frames(&self) -> &[(ClientTarget, String)] {
        &self.frames
    }

    /// Text of the most recent frame
    pub fn last(&self) -> Option<&str> {
        self.frames.last().map(|(_, text)| text.as_str())
    }

    /// Concatenated text of every frame that reached `client`
    pub fn text_for(&self, client: ClientTarget) -> String {
        self.frames
            .iter()
            .filter(|(target, _)| match client {
                ClientTarget::Serial => target.includes_serial(),
                ClientTarget::Network => target.includes_network(),
                ClientTarget::All => true,
            })
            .map(|(_, text)| text.as_str())
            .collect()
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, client: ClientTarget, frame: &[u8]) {
        self.frames
            .push((client, String::from_utf8_lossy(frame).into_owned()));
    }
}
