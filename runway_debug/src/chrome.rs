// Copyright 2026 the Runway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events from a [`RecorderSink`](super::recorder::RecorderSink)
//! recording and writes [Chrome Trace Event Format][spec] JSON to the given
//! writer. Gate transitions, play requests, and inputs become instant events;
//! drift samples become a counter track so drift can be read as a graph.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use runway_core::drift::DriftDecision;
use runway_core::trace::TimerAction;

use crate::recorder::RecordedEvent;

const TID_GATE: u32 = 0;
const TID_MEDIA: u32 = 1;
const TID_TIMERS: u32 = 2;
const TID_INPUT: u32 = 3;

fn instant(name: &str, cat: &str, ts: u64, tid: u32, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": tid,
        "s": "t",
        "args": args,
    })
}

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Timestamps are host microseconds.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::with_capacity(events.len());

    for recorded in events {
        let ts = recorded.at_micros();
        match recorded {
            RecordedEvent::Transition(e) => out.push(instant(
                e.to.as_str(),
                "Gate",
                ts,
                TID_GATE,
                json!({ "from": e.from.as_str() }),
            )),
            RecordedEvent::PlayRequested(e) => out.push(instant(
                "PlayRequested",
                "Media",
                ts,
                TID_MEDIA,
                json!({ "media": e.media.as_str(), "ticket": e.ticket.0 }),
            )),
            RecordedEvent::PlaySettled(e) => out.push(instant(
                "PlaySettled",
                "Media",
                ts,
                TID_MEDIA,
                json!({
                    "media": e.media.as_str(),
                    "ticket": e.ticket.0,
                    "rejection": e.result.err().map(|r| format!("{r:?}")),
                    "stale": e.stale,
                }),
            )),
            RecordedEvent::Drift(e) => match e.decision {
                DriftDecision::Skipped(_) => {}
                DriftDecision::WithinBand { drift } | DriftDecision::Correct { drift, .. } => {
                    out.push(json!({
                        "ph": "C",
                        "name": "drift",
                        "cat": "Drift",
                        "ts": ts,
                        "pid": 0,
                        "args": { "seconds": drift },
                    }));
                    if let DriftDecision::Correct { to, .. } = e.decision {
                        out.push(instant(
                            "Correct",
                            "Drift",
                            ts,
                            TID_MEDIA,
                            json!({ "to": to, "trigger": format!("{:?}", e.trigger) }),
                        ));
                    }
                }
            },
            RecordedEvent::Status(e) => out.push(instant(
                "Status",
                "Gate",
                ts,
                TID_GATE,
                json!({ "status": format!("{:?}", e.status) }),
            )),
            RecordedEvent::Timer(e) => {
                let action = match e.action {
                    TimerAction::Armed { .. } => "armed",
                    TimerAction::Disarmed => "disarmed",
                    TimerAction::Fired => "fired",
                };
                out.push(instant(
                    e.kind.as_str(),
                    "Timer",
                    ts,
                    TID_TIMERS,
                    json!({ "action": action }),
                ));
            }
            RecordedEvent::StorageError(e) => out.push(instant(
                "StorageError",
                "Storage",
                ts,
                TID_TIMERS,
                json!({ "key": e.key, "error": e.error.to_string() }),
            )),
            RecordedEvent::AudioRefused(e) => out.push(instant(
                "AudioRefused",
                "Media",
                ts,
                TID_MEDIA,
                json!({ "reason": e.reason.to_string() }),
            )),
            RecordedEvent::Input(e) => out.push(instant(
                "Input",
                "Input",
                ts,
                TID_INPUT,
                json!({ "input": format!("{:?}", e.input), "accepted": e.accepted }),
            )),
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use runway_core::drift::SkipReason;
    use runway_core::gate::GateState;
    use runway_core::time::HostTime;
    use runway_core::trace::{DriftEvent, DriftTrigger, TraceSink, TransitionEvent};

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_transition(&TransitionEvent {
            at: HostTime(1_000),
            from: GateState::VideoPlaying,
            to: GateState::AudioStarting,
        });
        rec.on_drift(&DriftEvent {
            at: HostTime(2_000),
            trigger: DriftTrigger::Interval,
            decision: DriftDecision::Correct { to: 4.0, drift: 0.5 },
        });
        rec.on_drift(&DriftEvent {
            at: HostTime(3_000),
            trigger: DriftTrigger::Interval,
            decision: DriftDecision::Skipped(SkipReason::VideoPaused),
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();

        // Transition, drift counter, correction marker; skipped checks vanish.
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "audio-starting");
        assert_eq!(parsed[1]["ph"], "C");
        assert_eq!(parsed[1]["args"]["seconds"], 0.5);
        assert_eq!(parsed[2]["name"], "Correct");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
