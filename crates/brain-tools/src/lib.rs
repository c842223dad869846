//! Tooling primitives for brain schedulers.
//!
//! Engine-agnostic on purpose: inspectors and debug overlays belong in adapter crates that read
//! the [`TraceEvent`]s recorded here.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, record_transitions, TraceEvent, TraceLog, TraceSink, TAG_START, TAG_STOP, TRACE_LOG,
    TRACE_SINK,
};
