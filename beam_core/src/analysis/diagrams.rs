//! # Diagram Sampler & Key Points
//!
//! Turns solved reactions into plot-ready shear/moment sequences and a
//! sparse table of left/right values at every structural event. Sampling
//! is segment-based: dense evenly-spaced points between consecutive
//! events, with epsilon-offset extras anchoring a tight cluster of
//! points where a point load sits. The exact one-sided values at a jump
//! come from the key-point table, not from the plot arrays.

use crate::model::{BeamModel, LoadKind};

use super::internal_forces::{internal_forces_at, Side};
use super::results::{KeyPointResult, MomentPeak, ReactionResult};
use super::{event_positions, POSITION_EPS};

/// Shear values closer than this at the same position collapse into one
/// plot point
const SHEAR_DEDUP_EPS: f64 = 1e-3;

/// Fuzzy window for matching a description key back to an event position
const DESCRIPTION_EPS: f64 = 1e-4;

/// Plot-ready diagram arrays plus the moment peak found along the way
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct DiagramSamples {
    pub x_points: Vec<f64>,
    pub shear_points: Vec<f64>,
    pub moment_points: Vec<f64>,
    pub peak_moment: Option<MomentPeak>,
}

/// True when some point load sits at `x`
fn point_load_at(model: &BeamModel, x: f64) -> bool {
    model.loads.iter().any(|l| match l.kind {
        LoadKind::Point { x: lx, .. } => (lx - x).abs() < POSITION_EPS,
        _ => false,
    })
}

/// Sample the shear and moment diagrams across the whole span.
///
/// `samples_per_segment` interior points are taken between each pair of
/// consecutive events. All evaluation is done as a left limit, so the
/// curve stays on the pre-jump branch through a point load and picks up
/// the post-jump value from the next interior sample.
pub(crate) fn sample_diagrams(
    model: &BeamModel,
    reactions: &[ReactionResult],
    samples_per_segment: usize,
) -> DiagramSamples {
    let events = event_positions(model);

    let mut raw_x: Vec<f64> = Vec::new();
    let mut raw_shear: Vec<f64> = Vec::new();
    let mut raw_moment: Vec<f64> = Vec::new();

    for i in 0..events.len().saturating_sub(1) {
        let a = events[i];
        let b = events[i + 1];

        let mut points = vec![a];
        if point_load_at(model, a) {
            points.push(a + POSITION_EPS);
        }
        for k in 1..=samples_per_segment {
            points.push(a + (b - a) * (k as f64 / (samples_per_segment as f64 + 1.0)));
        }
        if point_load_at(model, b) {
            points.push(b - POSITION_EPS);
        }
        points.push(b);

        for x in points {
            if x >= 0.0 && x <= model.beam.length {
                let forces = internal_forces_at(model, reactions, x, Side::Left);
                raw_x.push(x);
                raw_shear.push(forces.shear);
                raw_moment.push(forces.moment);
            }
        }
    }

    // Collapse points that neither advance in x nor change the shear.
    // Segment boundaries get sampled twice (end of one, start of the
    // next); this folds them back into a single point.
    let mut samples = DiagramSamples::default();
    if !raw_x.is_empty() {
        samples.x_points.push(raw_x[0]);
        samples.shear_points.push(raw_shear[0]);
        samples.moment_points.push(raw_moment[0]);
        for i in 1..raw_x.len() {
            let diff = raw_x[i] - raw_x[i - 1];
            if diff > POSITION_EPS
                || (diff < POSITION_EPS
                    && (raw_shear[i] - raw_shear[i - 1]).abs() > SHEAR_DEDUP_EPS)
            {
                samples.x_points.push(raw_x[i]);
                samples.shear_points.push(raw_shear[i]);
                samples.moment_points.push(raw_moment[i]);
            }
        }
    }

    let mut peak: Option<MomentPeak> = None;
    for (i, m) in samples.moment_points.iter().enumerate() {
        let candidate = m.abs();
        if peak.map_or(true, |p| candidate > p.value) {
            peak = Some(MomentPeak {
                x: samples.x_points[i],
                value: candidate,
            });
        }
    }
    samples.peak_moment = peak;

    samples
}

/// One description slot per quantized position, in insertion order
struct DescriptionTable {
    entries: Vec<(f64, Vec<String>)>,
}

impl DescriptionTable {
    fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Group descriptions under x rounded to 3 decimals so positions
    /// that differ only by float noise share one slot
    fn add(&mut self, x: f64, description: String) {
        let key = (x * 1000.0).round() / 1000.0;
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, list)) => {
                if !list.contains(&description) {
                    list.push(description);
                }
            }
            None => self.entries.push((key, vec![description])),
        }
    }

    /// Comma-joined descriptions for an event position, fuzzy-matched
    fn lookup(&self, x: f64) -> String {
        self.entries
            .iter()
            .find(|(k, _)| (k - x).abs() < DESCRIPTION_EPS)
            .map(|(_, list)| list.join(", "))
            .unwrap_or_default()
    }
}

/// Tabulate left- and right-limit forces at every event position,
/// labelled with whatever sits there.
pub(crate) fn key_point_table(
    model: &BeamModel,
    reactions: &[ReactionResult],
) -> Vec<KeyPointResult> {
    let mut descriptions = DescriptionTable::new();
    descriptions.add(0.0, "Start".to_string());
    descriptions.add(model.beam.length, "End".to_string());

    for support in &model.supports {
        descriptions.add(support.x, format!("Support {}", support.display_ref()));
    }
    for load in &model.loads {
        let label = load.display_ref();
        match load.kind {
            LoadKind::Point { x, .. } => {
                descriptions.add(x, format!("Load {}", label));
            }
            LoadKind::Udl { x_start, x_end, .. } => {
                descriptions.add(x_start, format!("UDL {} start", label));
                descriptions.add(x_end, format!("UDL {} end", label));
            }
            LoadKind::Moment { x, .. } => {
                descriptions.add(x, format!("Moment {}", label));
            }
        }
    }

    event_positions(model)
        .into_iter()
        .map(|x| {
            let left = internal_forces_at(model, reactions, x, Side::Left);
            let right = internal_forces_at(model, reactions, x, Side::Right);
            KeyPointResult {
                x,
                shear_left: left.shear,
                shear_right: right.shear,
                moment_left: left.moment,
                moment_right: right.moment,
                description: descriptions.lookup(x),
            }
        })
        .collect()
}
