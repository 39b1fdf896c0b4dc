//! Outbound hit reports (client → authoritative server).
//!
//! Урон здесь provisional: сервер пересчитывает сам. Transport не ждёт ответа
//! и не возвращает ошибок в combat слой.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Report kind on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    /// Terminal combo step
    #[serde(rename = "Combo_Hit")]
    ComboHit,
    #[serde(rename = "Normal_Hit")]
    NormalHit,
}

impl HitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitKind::ComboHit => "Combo_Hit",
            HitKind::NormalHit => "Normal_Hit",
        }
    }
}

/// Event: one per successful attack, forwarded to `NetworkTransport`.
#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitReport {
    #[serde(skip)]
    pub attacker: Option<Entity>,
    pub kind: HitKind,
    pub combo_index: u32,
    pub damage: f32,
    pub is_critical: bool,
    /// Simulation time of the attack (seconds)
    pub timestamp: f64,
}

impl HitReport {
    /// Wire form: `{"kind":"Normal_Hit","comboIndex":1,...}`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Outbound transport for hit reports.
pub trait CombatTransport: Send + Sync + 'static {
    fn send(&mut self, report: &HitReport);
}

/// Resource: active transport.
#[derive(Resource)]
pub struct NetworkTransport(pub Box<dyn CombatTransport>);

impl NetworkTransport {
    pub fn new(transport: impl CombatTransport) -> Self {
        Self(Box::new(transport))
    }
}

/// Keeps every sent report in a shared buffer (tests, replays).
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<HitReport>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of reports sent so far.
    pub fn sent(&self) -> Vec<HitReport> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CombatTransport for RecordingTransport {
    fn send(&mut self, report: &HitReport) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(report.clone());
        }
    }
}

/// Writes the wire form of each report to the crate log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransport;

impl CombatTransport for LoggingTransport {
    fn send(&mut self, report: &HitReport) {
        match report.to_json() {
            Ok(json) => crate::logger::log_info(&format!("📡 NET: {}", json)),
            Err(e) => crate::logger::log_error(&format!("📡 NET: failed to encode hit report: {}", e)),
        }
    }
}

/// System: forward hit reports to the transport.
///
/// Без transport resource отчёты просто отбрасываются (offline режим).
pub fn dispatch_hit_reports(
    mut reports: EventReader<HitReport>,
    transport: Option<ResMut<NetworkTransport>>,
) {
    let Some(mut transport) = transport else {
        reports.clear();
        return;
    };

    for report in reports.read() {
        transport.0.send(report);
    }
}
