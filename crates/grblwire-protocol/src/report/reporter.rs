//! Report delivery
//!
//! [`Reporter`] pairs the frame encoders with a [`Transport`] and applies
//! the delivery rules: verbosity filtering for feedback messages, the
//! broadcast and flush delay for alarms, and the error acknowledgement that
//! replaces a parameter report whose coordinate read fails.

use super::messages::{FeedbackMessage, MessageLevel};
use super::responses;
use super::status::StatusReporter;
use crate::transport::Transport;
use grblwire_core::{
    AlarmCode, ClientTarget, CoordinateStore, FeatureConfiguration, MachineStateSnapshot,
    SettingsRecord, StatusCode,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime delivery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Most verbose feedback level still sent to the host
    pub message_level: MessageLevel,
    /// Pause after an alarm frame so it drains before anything else runs
    pub alarm_flush_delay_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            message_level: MessageLevel::Info,
            alarm_flush_delay_ms: 500,
        }
    }
}

impl ReportConfig {
    pub fn alarm_flush_delay(&self) -> Duration {
        Duration::from_millis(self.alarm_flush_delay_ms)
    }
}

/// Sends protocol frames for one controller
pub struct Reporter<T: Transport> {
    transport: T,
    features: FeatureConfiguration,
    config: ReportConfig,
    status: StatusReporter,
}

impl<T: Transport> Reporter<T> {
    pub fn new(transport: T, features: FeatureConfiguration, config: ReportConfig) -> Self {
        Self {
            transport,
            features,
            config,
            status: StatusReporter::new(),
        }
    }

    pub fn features(&self) -> &FeatureConfiguration {
        &self.features
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn status_reporter(&self) -> &StatusReporter {
        &self.status
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn send(&mut self, client: ClientTarget, frame: String) {
        self.transport.send(client, frame.as_bytes());
    }

    /// Acknowledge a command line
    pub fn status_message(&mut self, client: ClientTarget, status: StatusCode) {
        self.send(client, responses::status_message(status.code()));
    }

    /// Broadcast an alarm and block for the flush delay
    pub fn alarm_message(&mut self, alarm: AlarmCode) {
        tracing::debug!("Alarm {}: {}", alarm.code(), alarm.description());
        self.send(ClientTarget::All, responses::alarm_message(alarm.code()));

        let delay = self.config.alarm_flush_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    /// Send a feedback message unless it is more verbose than the configured
    /// level. Returns whether a frame was sent.
    pub fn feedback_message(&mut self, client: ClientTarget, msg: FeedbackMessage) -> bool {
        if msg.level() > self.config.message_level {
            tracing::debug!(
                "Suppressed {:?} feedback at level {}",
                msg,
                self.config.message_level
            );
            return false;
        }
        self.send(client, responses::feedback_message(msg));
        true
    }

    /// Send free text as a `[MSG:]` frame
    pub fn message(&mut self, client: ClientTarget, text: &str) {
        self.send(client, responses::message(text));
    }

    pub fn init_message(&mut self, client: ClientTarget) {
        let frame = responses::init_message(&self.features.build);
        self.send(client, frame);
    }

    pub fn help_message(&mut self, client: ClientTarget) {
        self.send(client, responses::help_message());
    }

    pub fn settings(&mut self, client: ClientTarget, settings: &SettingsRecord) {
        let frame = responses::settings_dump(settings, &self.features);
        self.send(client, frame);
    }

    pub fn probe_parameters(
        &mut self,
        client: ClientTarget,
        snapshot: &MachineStateSnapshot,
        settings: &SettingsRecord,
    ) {
        self.send(client, responses::probe_parameters(snapshot, settings));
    }

    /// Send the `$#` report followed by the probe result
    ///
    /// When a stored frame cannot be read nothing of the report is sent;
    /// the host gets a single `error:` acknowledgement instead. Returns
    /// whether the full report went out.
    pub fn ngc_parameters<S: CoordinateStore + ?Sized>(
        &mut self,
        client: ClientTarget,
        store: &S,
        snapshot: &MachineStateSnapshot,
        settings: &SettingsRecord,
    ) -> bool {
        match responses::ngc_parameters(store, &snapshot.gcode, settings) {
            Ok(frame) => {
                self.send(client, frame);
                self.probe_parameters(client, snapshot, settings);
                true
            }
            Err(e) => {
                tracing::warn!("Parameter report aborted: {}", e);
                self.status_message(client, e.status_code());
                false
            }
        }
    }

    pub fn gcode_modes(
        &mut self,
        client: ClientTarget,
        snapshot: &MachineStateSnapshot,
        settings: &SettingsRecord,
    ) {
        let frame = responses::gcode_modes(snapshot, settings, &self.features);
        self.send(client, frame);
    }

    pub fn startup_line(&mut self, client: ClientTarget, index: u8, line: &str) {
        self.send(client, responses::startup_line(index, line));
    }

    /// Report a startup line that was just executed, with its result
    pub fn execute_startup_message(&mut self, client: ClientTarget, line: &str, status: StatusCode) {
        self.send(client, responses::execute_startup_message(line, status.code()));
    }

    pub fn build_info(&mut self, client: ClientTarget, line: &str) {
        let frame = responses::build_info(line, &self.features);
        self.send(client, frame);
    }

    pub fn echo_line_received(&mut self, client: ClientTarget, line: &str) {
        self.send(client, responses::echo_line_received(line));
    }

    /// Send a `<...>` status report and advance the throttle counters
    pub fn realtime_status(
        &mut self,
        client: ClientTarget,
        snapshot: &MachineStateSnapshot,
        settings: &SettingsRecord,
    ) {
        let frame = self.status.realtime_status(snapshot, settings, &self.features);
        self.send(client, frame);
    }

    /// Make the throttled status fields due on the next report
    pub fn reset_counters(&mut self) {
        self.status.reset_counters();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;
    use grblwire_core::{CoordinateFrame, InMemoryCoordinateStore};
    use std::time::Instant;

    /// Records when each frame reached the transport
    #[derive(Default)]
    struct TimedTransport {
        sent: Vec<(Instant, String)>,
    }

    impl Transport for TimedTransport {
        fn send(&mut self, _client: ClientTarget, frame: &[u8]) {
            self.sent
                .push((Instant::now(), String::from_utf8_lossy(frame).into_owned()));
        }
    }

    fn reporter() -> Reporter<MemoryTransport> {
        let config = ReportConfig {
            alarm_flush_delay_ms: 0,
            ..Default::default()
        };
        Reporter::new(MemoryTransport::default(), FeatureConfiguration::default(), config)
    }

    #[test]
    fn test_acknowledgements() {
        let mut r = reporter();
        r.status_message(ClientTarget::Serial, StatusCode::Ok);
        r.status_message(ClientTarget::Network, StatusCode::BadNumberFormat);

        let frames = r.transport().frames();
        assert_eq!(frames[0], (ClientTarget::Serial, "ok\r\n".to_string()));
        assert_eq!(frames[1], (ClientTarget::Network, "error:2\r\n".to_string()));
    }

    #[test]
    fn test_alarm_is_broadcast() {
        let mut r = reporter();
        r.alarm_message(AlarmCode::HardLimit);
        assert_eq!(r.transport().last(), Some("ALARM:1\r\n"));
        assert_eq!(r.transport().frames()[0].0, ClientTarget::All);
    }

    #[test]
    fn test_default_alarm_flush_delay() {
        assert_eq!(
            ReportConfig::default().alarm_flush_delay(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_alarm_blocks_for_flush_delay() {
        let config = ReportConfig {
            alarm_flush_delay_ms: 30,
            ..Default::default()
        };
        let mut r = Reporter::new(
            TimedTransport::default(),
            FeatureConfiguration::default(),
            config,
        );

        let start = Instant::now();
        r.alarm_message(AlarmCode::SoftLimit);
        let returned = Instant::now();

        let sent = &r.transport().sent;
        assert_eq!(sent.len(), 1);
        let (sent_at, frame) = &sent[0];
        assert_eq!(frame, "ALARM:2\r\n");
        assert!(returned.duration_since(start) >= Duration::from_millis(30));
        // The frame goes out before the pause, not after it.
        assert!(returned.duration_since(*sent_at) >= Duration::from_millis(30));
    }

    #[test]
    fn test_feedback_respects_level() {
        let mut r = reporter();
        assert!(r.feedback_message(ClientTarget::Serial, FeedbackMessage::ProgramEnd));
        assert_eq!(r.transport().frames().len(), 1);

        let config = ReportConfig {
            message_level: MessageLevel::Warning,
            alarm_flush_delay_ms: 0,
        };
        let mut quiet = Reporter::new(
            MemoryTransport::default(),
            FeatureConfiguration::default(),
            config,
        );
        assert!(!quiet.feedback_message(ClientTarget::Serial, FeedbackMessage::ProgramEnd));
        assert!(quiet.transport().frames().is_empty());
    }

    #[test]
    fn test_ngc_parameters_sends_probe_after_report() {
        let mut r = reporter();
        let store = InMemoryCoordinateStore::new();
        let sent = r.ngc_parameters(
            ClientTarget::Serial,
            &store,
            &MachineStateSnapshot::default(),
            &SettingsRecord::default(),
        );
        assert!(sent);

        let frames = r.transport().frames();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].1.starts_with("[G54:"));
        assert!(frames[0].1.ends_with("[TLO:0.000]\r\n"));
        assert_eq!(frames[1].1, "[PRB:0.000,0.000,0.000:0]\r\n");
    }

    #[test]
    fn test_ngc_parameters_read_failure_sends_single_error() {
        let mut r = reporter();
        let mut store = InMemoryCoordinateStore::new();
        store.mark_unreadable(CoordinateFrame::G56);

        let sent = r.ngc_parameters(
            ClientTarget::Serial,
            &store,
            &MachineStateSnapshot::default(),
            &SettingsRecord::default(),
        );
        assert!(!sent);
        assert_eq!(
            r.transport().frames(),
            &[(ClientTarget::Serial, "error:7\r\n".to_string())]
        );
    }

    #[test]
    fn test_reset_counters_makes_work_offset_due() {
        let mut r = reporter();
        let snapshot = MachineStateSnapshot::default();
        let settings = SettingsRecord::default();

        r.realtime_status(ClientTarget::Serial, &snapshot, &settings);
        r.realtime_status(ClientTarget::Serial, &snapshot, &settings);
        assert!(!r.transport().frames()[1].1.contains("|WCO:"));

        r.reset_counters();
        r.realtime_status(ClientTarget::Serial, &snapshot, &settings);
        assert!(r.transport().frames()[2].1.contains("|WCO:"));
    }

    #[test]
    fn test_startup_and_build_frames() {
        let mut r = reporter();
        r.startup_line(ClientTarget::Serial, 0, "G21");
        r.execute_startup_message(ClientTarget::Serial, "G21", StatusCode::Ok);
        r.build_info(ClientTarget::Serial, "");
        r.init_message(ClientTarget::Serial);

        let text = r.transport().text_for(ClientTarget::Serial);
        assert_eq!(
            text,
            "$N0=G21\r\n>G21:ok\r\n[VER:1.1f.20170801:]\r\n[OPT:V]\r\n\r\nGrbl 1.1f ['$' for help]\r\n"
        );
    }
}
