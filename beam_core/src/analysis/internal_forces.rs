//! # Internal Force Evaluator
//!
//! Shear and bending moment at an arbitrary position by superposition of
//! everything acting to the left of it. Discontinuities are handled with
//! one-sided limits: evaluating a hair left or right of a concentrated
//! load captures the jump, and at exact coincidence the load counts only
//! on the right side, making the diagrams right-continuous.

use crate::model::{BeamModel, LoadKind};

use super::results::ReactionResult;
use super::POSITION_EPS;

/// Coincidence tolerance for "this load sits exactly at the requested x"
const COINCIDENCE_EPS: f64 = 1e-6;

/// Which one-sided limit to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Just before x
    Left,
    /// Just after x
    Right,
    /// Exactly at x
    #[default]
    Mid,
}

/// Shear and moment at one evaluation point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternalForces {
    /// Shear force V
    pub shear: f64,
    /// Bending moment M
    pub moment: f64,
}

/// Evaluate internal forces at `x` from the given solved reactions.
///
/// The side is realized by nudging the evaluation point by 1e-9 before
/// summing, which stands in for a strict one-sided limit. Downstream
/// tables depend on the exact values this produces at discontinuities,
/// so the nudge is part of the contract, not an implementation detail.
pub fn internal_forces_at(
    model: &BeamModel,
    reactions: &[ReactionResult],
    x: f64,
    side: Side,
) -> InternalForces {
    let xp = match side {
        Side::Left => x - POSITION_EPS,
        Side::Right => x + POSITION_EPS,
        Side::Mid => x,
    };

    let mut shear = 0.0;
    let mut moment = 0.0;

    for r in reactions {
        if r.x < xp {
            shear += r.ry;
            moment += r.ry * (xp - r.x) + r.m;
        }
    }

    for load in &model.loads {
        match load.kind {
            LoadKind::Point { magnitude, x: lx } => {
                if lx < xp {
                    shear += magnitude;
                    moment += magnitude * (xp - lx);
                } else if (lx - x).abs() < COINCIDENCE_EPS && side == Side::Right {
                    // Jump convention: the shear picks the load up at the
                    // point itself, the moment does not.
                    shear += magnitude;
                }
            }
            LoadKind::Udl { w, x_start, x_end } => {
                if xp > x_start {
                    let covered = xp.min(x_end) - x_start;
                    let magnitude = w * covered;
                    shear += magnitude;
                    let centroid = x_start + covered / 2.0;
                    moment += magnitude * (xp - centroid);
                }
            }
            LoadKind::Moment { magnitude, x: lx } => {
                if lx < xp {
                    moment += magnitude;
                } else if (lx - x).abs() < COINCIDENCE_EPS && side == Side::Right {
                    moment += magnitude;
                }
            }
        }
    }

    InternalForces { shear, moment }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Load, Support, SupportKind};
    use uuid::Uuid;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn reaction(x: f64, ry: f64, m: f64) -> ReactionResult {
        ReactionResult {
            support_id: Uuid::new_v4(),
            label: String::new(),
            x,
            ry,
            m,
        }
    }

    fn simply_supported_midspan() -> (BeamModel, Vec<ReactionResult>) {
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::point(-20.0, 5.0));
        let reactions = vec![reaction(0.0, 10.0, 0.0), reaction(10.0, 10.0, 0.0)];
        (model, reactions)
    }

    #[test]
    fn test_values_between_events() {
        let (model, reactions) = simply_supported_midspan();

        let at = internal_forces_at(&model, &reactions, 2.5, Side::Mid);
        assert!(approx_eq(at.shear, 10.0));
        assert!(approx_eq(at.moment, 25.0));

        let at = internal_forces_at(&model, &reactions, 7.5, Side::Mid);
        assert!(approx_eq(at.shear, -10.0));
        assert!(approx_eq(at.moment, 25.0));
    }

    #[test]
    fn test_shear_jump_at_point_load() {
        let (model, reactions) = simply_supported_midspan();

        let left = internal_forces_at(&model, &reactions, 5.0, Side::Left);
        let right = internal_forces_at(&model, &reactions, 5.0, Side::Right);

        assert!(approx_eq(left.shear, 10.0));
        assert!(approx_eq(right.shear, -10.0));
        // Jump equals the load magnitude; the moment stays continuous.
        assert!(approx_eq(right.shear - left.shear, -20.0));
        assert!(approx_eq(left.moment, 50.0));
        assert!(approx_eq(right.moment, 50.0));
    }

    #[test]
    fn test_moment_jump_at_applied_moment() {
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::moment(15.0, 3.0));
        let reactions = vec![reaction(0.0, 1.5, 0.0), reaction(10.0, -1.5, 0.0)];

        let left = internal_forces_at(&model, &reactions, 3.0, Side::Left);
        let right = internal_forces_at(&model, &reactions, 3.0, Side::Right);

        assert!(approx_eq(right.moment - left.moment, 15.0));
        assert!(approx_eq(right.shear - left.shear, 0.0));
    }

    #[test]
    fn test_right_continuity_at_left_support() {
        let (model, reactions) = simply_supported_midspan();

        let left = internal_forces_at(&model, &reactions, 0.0, Side::Left);
        let right = internal_forces_at(&model, &reactions, 0.0, Side::Right);

        assert!(approx_eq(left.shear, 0.0));
        assert!(approx_eq(right.shear, 10.0));
    }

    #[test]
    fn test_partial_udl_region() {
        // Span 10, P = -20 at 5, w = -2 over [0, 4]: R1 = 16.4, R2 = 11.6
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::point(-20.0, 5.0))
            .with_load(Load::udl(-2.0, 0.0, 4.0));
        let reactions = vec![reaction(0.0, 16.4, 0.0), reaction(10.0, 11.6, 0.0)];

        // Inside the UDL
        let at = internal_forces_at(&model, &reactions, 2.0, Side::Mid);
        assert!(approx_eq(at.shear, 16.4 - 4.0));
        assert!(approx_eq(at.moment, 16.4 * 2.0 - 4.0 * 1.0));

        // Past its end the UDL acts as its full resultant
        let at = internal_forces_at(&model, &reactions, 4.5, Side::Mid);
        assert!(approx_eq(at.shear, 16.4 - 8.0));
        assert!(approx_eq(at.moment, 16.4 * 4.5 - 8.0 * 2.5));
    }

    #[test]
    fn test_segments_are_affine() {
        let (model, reactions) = simply_supported_midspan();

        // Strictly between events the shear is constant and the moment
        // linear, so three samples must be colinear.
        let xs = [6.0, 7.0, 8.0];
        let forces: Vec<InternalForces> = xs
            .iter()
            .map(|&x| internal_forces_at(&model, &reactions, x, Side::Mid))
            .collect();

        assert!(approx_eq(forces[0].shear, forces[1].shear));
        assert!(approx_eq(forces[1].shear, forces[2].shear));

        let slope_a = forces[1].moment - forces[0].moment;
        let slope_b = forces[2].moment - forces[1].moment;
        assert!(approx_eq(slope_a, slope_b));
    }

    #[test]
    fn test_fixed_support_moment_enters_superposition() {
        // Cantilever fixed at 0: Ry = 20, M = 100
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Fixed))
            .with_load(Load::point(-20.0, 5.0));
        let reactions = vec![reaction(0.0, 20.0, 100.0)];

        let at = internal_forces_at(&model, &reactions, 2.5, Side::Mid);
        assert!(approx_eq(at.shear, 20.0));
        assert!(approx_eq(at.moment, 20.0 * 2.5 + 100.0));
    }
}
