//! Timeline scheduling for node fade-ins and segment draws.
//!
//! The schedule follows the narrative of the diagram. Each node fades in
//! only after everything leading into it has finished drawing, separated by
//! a small gap:
//!
//! ```text
//! Agent ─gap─ AP vertical ── AP horizontal ─gap─ Processing
//!       ─gap─ ┬ Processing→Analysing ┬ ─gap─ Analysing
//!             └ Agent→Analysing ─────┘
//!       ─gap─ ┬ Analysing→Report ──────────────┬ ─gap─ Report
//!             ├ AR vertical                    │
//!             └──(draw+epsilon)── AR horizontal┘
//! ```
//!
//! Every entry is a pure function of [`TimingConstants`]; the schedule is
//! computed once and never depends on layout.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::{segments::SegmentKey, topology::NodeKey};

/// Durations and spacing used to build the schedule, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConstants {
    node_fade: f32,
    segment_draw: f32,
    gap: f32,
    epsilon: f32,
}

impl TimingConstants {
    pub fn new(node_fade: f32, segment_draw: f32, gap: f32, epsilon: f32) -> Self {
        Self {
            node_fade,
            segment_draw,
            gap,
            epsilon,
        }
    }

    /// Duration of a node fade-in.
    pub fn node_fade(&self) -> f32 {
        self.node_fade
    }

    /// Duration of a segment draw.
    pub fn segment_draw(&self) -> f32 {
        self.segment_draw
    }

    /// Pause between a finished step and the next one.
    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Extra delay before the Agent→Report horizontal leg.
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Checks that every constant is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending constant.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("node_fade", self.node_fade),
            ("segment_draw", self.segment_draw),
            ("gap", self.gap),
            ("epsilon", self.epsilon),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "timing constant `{name}` must be a non-negative number, got {value}"
                ));
            }
        }
        Ok(())
    }
}

impl Default for TimingConstants {
    fn default() -> Self {
        Self {
            node_fade: 0.6,
            segment_draw: 1.2,
            gap: 0.15,
            epsilon: 0.05,
        }
    }
}

/// What a timeline entry animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineTarget {
    /// Fade and scale-in of a node
    Node(NodeKey),
    /// Draw-in of one connector leg
    Segment(SegmentKey),
}

impl fmt::Display for TimelineTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(key) => write!(f, "node:{key}"),
            Self::Segment(key) => write!(f, "segment:{key}"),
        }
    }
}

/// Start delay and duration of one animation, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimelineEntry {
    delay: f32,
    duration: f32,
}

impl TimelineEntry {
    pub fn new(delay: f32, duration: f32) -> Self {
        Self { delay, duration }
    }

    pub fn delay(self) -> f32 {
        self.delay
    }

    pub fn duration(self) -> f32 {
        self.duration
    }

    /// Time at which the animation completes.
    pub fn end(self) -> f32 {
        self.delay + self.duration
    }
}

/// The full animation schedule: four node fade-ins and seven segment draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    entries: IndexMap<TimelineTarget, TimelineEntry>,
}

impl Timeline {
    /// Builds the schedule from `timing`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stageflow::timeline::{Timeline, TimingConstants};
    /// # use stageflow::topology::NodeKey;
    /// let timeline = Timeline::schedule(&TimingConstants::default());
    ///
    /// assert_eq!(timeline.node(NodeKey::Agent).delay(), 0.0);
    /// assert!((timeline.node(NodeKey::Processing).delay() - 3.30).abs() < 1e-4);
    /// ```
    pub fn schedule(timing: &TimingConstants) -> Self {
        let fade = timing.node_fade();
        let draw = timing.segment_draw();
        let gap = timing.gap();

        let mut entries = IndexMap::new();

        let agent = TimelineEntry::new(0.0, fade);
        entries.insert(TimelineTarget::Node(NodeKey::Agent), agent);

        let ap_vertical = TimelineEntry::new(agent.end() + gap, draw);
        let ap_horizontal = TimelineEntry::new(ap_vertical.end(), draw);
        entries.insert(
            TimelineTarget::Segment(SegmentKey::AgentProcessingVertical),
            ap_vertical,
        );
        entries.insert(
            TimelineTarget::Segment(SegmentKey::AgentProcessingHorizontal),
            ap_horizontal,
        );

        let processing = TimelineEntry::new(ap_horizontal.end() + gap, fade);
        entries.insert(TimelineTarget::Node(NodeKey::Processing), processing);

        let into_analysing = TimelineEntry::new(processing.end() + gap, draw);
        entries.insert(
            TimelineTarget::Segment(SegmentKey::ProcessingAnalysing),
            into_analysing,
        );
        entries.insert(
            TimelineTarget::Segment(SegmentKey::AgentAnalysing),
            into_analysing,
        );

        let analysing = TimelineEntry::new(into_analysing.end() + gap, fade);
        entries.insert(TimelineTarget::Node(NodeKey::Analysing), analysing);

        let into_report = TimelineEntry::new(analysing.end() + gap, draw);
        let ar_horizontal =
            TimelineEntry::new(into_report.delay() + draw + timing.epsilon(), draw);
        entries.insert(
            TimelineTarget::Segment(SegmentKey::AnalysingReport),
            into_report,
        );
        entries.insert(
            TimelineTarget::Segment(SegmentKey::AgentReportVertical),
            into_report,
        );
        entries.insert(
            TimelineTarget::Segment(SegmentKey::AgentReportHorizontal),
            ar_horizontal,
        );

        let report = TimelineEntry::new(into_report.end().max(ar_horizontal.end()) + gap, fade);
        entries.insert(TimelineTarget::Node(NodeKey::Report), report);

        let timeline = Self { entries };
        debug!(
            entries = timeline.len(),
            total_duration = timeline.total_duration();
            "Timeline scheduled"
        );
        timeline
    }

    pub fn get(&self, target: TimelineTarget) -> Option<TimelineEntry> {
        self.entries.get(&target).copied()
    }

    /// Fade-in entry of `key`.
    pub fn node(&self, key: NodeKey) -> TimelineEntry {
        // Every node is scheduled by construction
        self.entries[&TimelineTarget::Node(key)]
    }

    /// Draw entry of `key`.
    pub fn segment(&self, key: SegmentKey) -> TimelineEntry {
        self.entries[&TimelineTarget::Segment(key)]
    }

    /// Iterates entries in schedule order.
    pub fn iter(&self) -> impl Iterator<Item = (TimelineTarget, TimelineEntry)> + '_ {
        self.entries.iter().map(|(target, entry)| (*target, *entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// End of the last animation.
    pub fn total_duration(&self) -> f32 {
        self.entries
            .values()
            .map(|entry| entry.end())
            .fold(0.0, f32::max)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::schedule(&TimingConstants::default())
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    const EPS: f32 = 1e-3;

    // ===================
    // Strategies
    // ===================

    fn timing_strategy() -> impl Strategy<Value = TimingConstants> {
        (0.0f32..5.0, 0.0f32..5.0, 0.0f32..2.0, 0.0f32..1.0).prop_map(
            |(node_fade, segment_draw, gap, epsilon)| {
                TimingConstants::new(node_fade, segment_draw, gap, epsilon)
            },
        )
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Each node starts no earlier than everything leading into it ends,
    /// plus the gap.
    fn check_nodes_follow_predecessors(timing: TimingConstants) -> Result<(), TestCaseError> {
        let timeline = Timeline::schedule(&timing);
        let gap = timing.gap();

        let follows = |node: NodeKey, predecessors: &[SegmentKey]| {
            let start = timeline.node(node).delay();
            predecessors
                .iter()
                .all(|&segment| start + EPS >= timeline.segment(segment).end() + gap)
        };

        prop_assert!(follows(
            NodeKey::Processing,
            &[
                SegmentKey::AgentProcessingVertical,
                SegmentKey::AgentProcessingHorizontal
            ]
        ));
        prop_assert!(follows(
            NodeKey::Analysing,
            &[SegmentKey::ProcessingAnalysing, SegmentKey::AgentAnalysing]
        ));
        prop_assert!(follows(
            NodeKey::Report,
            &[
                SegmentKey::AnalysingReport,
                SegmentKey::AgentReportVertical,
                SegmentKey::AgentReportHorizontal
            ]
        ));
        Ok(())
    }

    /// Segments leaving a node start after that node has faded in.
    fn check_segments_follow_source(timing: TimingConstants) -> Result<(), TestCaseError> {
        let timeline = Timeline::schedule(&timing);

        let agent_end = timeline.node(NodeKey::Agent).end();
        let processing_end = timeline.node(NodeKey::Processing).end();
        let analysing_end = timeline.node(NodeKey::Analysing).end();

        prop_assert!(
            timeline.segment(SegmentKey::AgentProcessingVertical).delay() + EPS >= agent_end
        );
        prop_assert!(
            timeline.segment(SegmentKey::ProcessingAnalysing).delay() + EPS >= processing_end
        );
        prop_assert!(timeline.segment(SegmentKey::AnalysingReport).delay() + EPS >= analysing_end);

        let horizontal = timeline.segment(SegmentKey::AgentProcessingHorizontal);
        let vertical = timeline.segment(SegmentKey::AgentProcessingVertical);
        prop_assert!((horizontal.delay() - vertical.end()).abs() <= EPS);
        Ok(())
    }

    /// Total duration is the end of the Report fade-in.
    fn check_total_duration(timing: TimingConstants) -> Result<(), TestCaseError> {
        let timeline = Timeline::schedule(&timing);
        let report_end = timeline.node(NodeKey::Report).end();

        prop_assert!((timeline.total_duration() - report_end).abs() <= EPS);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn nodes_follow_predecessors(timing in timing_strategy()) {
            check_nodes_follow_predecessors(timing)?;
        }

        #[test]
        fn segments_follow_source(timing in timing_strategy()) {
            check_segments_follow_source(timing)?;
        }

        #[test]
        fn total_duration(timing in timing_strategy()) {
            check_total_duration(timing)?;
        }
    }
}
