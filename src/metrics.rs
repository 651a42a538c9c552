use once_cell::sync::Lazy;
use prometheus::process_collector::ProcessCollector;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

use crate::models::StampOutcome;

pub static QUOTATIONS_GENERATED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "quotations_generated_total",
        "Number of quotation documents generated"
    )
    .expect("metric can be registered")
});

pub static STAMP_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "quotation_stamp_outcomes_total",
        "Stamp placement results by outcome",
        &["outcome"]
    )
    .expect("metric can be registered")
});

pub fn record_generation(stamp: StampOutcome) {
    QUOTATIONS_GENERATED.inc();
    STAMP_OUTCOMES.with_label_values(&[stamp.as_str()]).inc();
}

/// Registra las métricas del proceso (CPU, memoria, descriptores) en el registro global.
pub fn register_process_collector() -> prometheus::Result<()> {
    match prometheus::default_registry().register(Box::new(ProcessCollector::for_self())) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_metrics_are_exported() {
        register_process_collector().unwrap();
        // Una segunda llamada no falla
        register_process_collector().unwrap();

        let names: Vec<String> = prometheus::gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.iter().any(|name| name == "process_cpu_seconds_total"));
    }
}
