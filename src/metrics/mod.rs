use lazy_static::lazy_static;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::Opts;
use prometheus::Registry;

lazy_static! {
    pub static ref EVENTS_DECODED_TOTAL: IntCounter = IntCounter::new(
        "events_decoded_total",
        "Total event records decoded off the daemon stream"
    )
    .expect("metric can not be created");

    pub static ref EVENTS_DISPATCHED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "events_dispatched_total",
            "Total events dispatched to a bound callback"
        ),
        &["key"]
    )
    .expect("metric can not be created");

    pub static ref EVENTS_DROPPED_TOTAL: IntCounter = IntCounter::new(
        "events_dropped_total",
        "Total events dropped because no callback was bound to their key"
    )
    .expect("metric can not be created");

    pub static ref MONITOR_SESSIONS_TOTAL: IntCounter = IntCounter::new(
        "monitor_sessions_total",
        "Total monitor sessions started"
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = Registry::new();
}

pub fn register_custom_metrics() {
    REGISTRY
        .register(Box::new(EVENTS_DECODED_TOTAL.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(EVENTS_DISPATCHED_TOTAL.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(EVENTS_DROPPED_TOTAL.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(MONITOR_SESSIONS_TOTAL.clone()))
        .expect("collector can be registered");
}
