use std::collections::BTreeMap;

use credit_risk_core::RiskBand;
use parking_lot::Mutex;

/// Route label for requests that matched no known route. Keeps the label
/// set bounded whatever paths clients send.
pub const UNMATCHED_ROUTE: &str = "unmatched";

#[derive(Debug, Default)]
struct Counters {
    requests: BTreeMap<&'static str, u64>,
    responses: BTreeMap<u16, u64>,
    assessments: BTreeMap<RiskBand, u64>,
    rejected_profiles: u64,
}

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    counters: Mutex<Counters>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, route: &'static str, status: u16) {
        let mut locked = self.counters.lock();
        *locked.requests.entry(route).or_default() += 1;
        *locked.responses.entry(status).or_default() += 1;
    }

    pub fn record_assessment(&self, band: RiskBand) {
        *self.counters.lock().assessments.entry(band).or_default() += 1;
    }

    pub fn record_rejected_profile(&self) {
        self.counters.lock().rejected_profiles += 1;
    }

    pub fn assessments_for(&self, band: RiskBand) -> u64 {
        self.counters
            .lock()
            .assessments
            .get(&band)
            .copied()
            .unwrap_or(0)
    }

    /// Prometheus text exposition of all counters.
    pub fn render_text(&self) -> String {
        let locked = self.counters.lock();
        let mut lines = vec![
            "# TYPE credit_risk_http_requests_total counter".to_string(),
            "# TYPE credit_risk_http_responses_total counter".to_string(),
            "# TYPE credit_risk_assessments_total counter".to_string(),
            "# TYPE credit_risk_rejected_profiles_total counter".to_string(),
        ];
        for (route, count) in &locked.requests {
            lines.push(format!(
                "credit_risk_http_requests_total{{route=\"{route}\"}} {count}"
            ));
        }
        for (status, count) in &locked.responses {
            lines.push(format!(
                "credit_risk_http_responses_total{{status=\"{status}\"}} {count}"
            ));
        }
        for band in RiskBand::ALL {
            let count = locked.assessments.get(&band).copied().unwrap_or(0);
            lines.push(format!(
                "credit_risk_assessments_total{{rating=\"{}\"}} {count}",
                band.name()
            ));
        }
        lines.push(format!(
            "credit_risk_rejected_profiles_total {}",
            locked.rejected_profiles
        ));
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
