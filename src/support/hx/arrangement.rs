//! Flow arrangements supported by the zone analysis.

mod counter_flow;

pub use counter_flow::CounterFlow;
