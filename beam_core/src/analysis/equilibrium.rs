//! # Isostatic Solver
//!
//! Solves support reactions directly from the rigid-body equilibrium
//! equations. One row enforces the vertical force balance; each further
//! row enforces the moment balance about a reference point (x = 0 first,
//! then x = L). Only works when the unknown reaction components can be
//! determined by those equations alone; anything else surfaces as a
//! singular system and the caller falls back to the stiffness method.

use crate::errors::{BeamError, BeamResult};
use crate::linalg;
use crate::model::BeamModel;
use crate::units::UnitSystem;

use super::results::{EquilibriumCheck, ReactionResult};

/// Which reaction component an unknown column stands for
#[derive(Debug, Clone, Copy, PartialEq)]
enum Component {
    Vertical,
    Rotational,
}

/// One unknown reaction component, tied back to its support
#[derive(Debug, Clone, Copy)]
struct ReactionDof {
    support_index: usize,
    x: f64,
    component: Component,
}

/// Solve reactions from equilibrium alone.
///
/// Appends the total-load line to `log`; the caller owns the rest of the
/// report. Fails with `SingularSystem` when the equations cannot pin the
/// unknowns down (no supports, collocated supports, or more unknowns
/// than independent equations).
pub(crate) fn solve(
    model: &BeamModel,
    units: &UnitSystem,
    log: &mut Vec<String>,
) -> BeamResult<Vec<ReactionResult>> {
    log.push(format!(
        "Total applied vertical load: {:.3} {}",
        model.total_vertical_load(),
        units.force
    ));

    let mut dofs: Vec<ReactionDof> = Vec::new();
    for (support_index, support) in model.supports.iter().enumerate() {
        dofs.push(ReactionDof {
            support_index,
            x: support.x,
            component: Component::Vertical,
        });
        if support.kind.restrains_rotation() {
            dofs.push(ReactionDof {
                support_index,
                x: support.x,
                component: Component::Rotational,
            });
        }
    }

    let n = dofs.len();
    if n == 0 {
        return Err(BeamError::singular_system(
            "equilibrium equations",
            "no supports restrain the beam",
        ));
    }

    // Moment reference points: x = 0, and x = L once a second row exists.
    let mut eq_points = vec![0.0];
    if n >= 2 {
        eq_points.push(model.beam.length);
    }

    let mut a = vec![vec![0.0; n]; n];
    let mut b = vec![0.0; n];

    for i in 0..n {
        let ref_x = eq_points.get(i).copied().unwrap_or(model.beam.length);

        for (j, dof) in dofs.iter().enumerate() {
            a[i][j] = match dof.component {
                Component::Vertical => {
                    if i == 0 {
                        1.0
                    } else {
                        dof.x - ref_x
                    }
                }
                Component::Rotational => {
                    if i == 0 {
                        0.0
                    } else {
                        1.0
                    }
                }
            };
        }

        b[i] = if i == 0 {
            -model.total_vertical_load()
        } else {
            -model.applied_moment_about(ref_x)
        };
    }

    let sol = linalg::solve_linear(&a, &b)?;

    let mut reactions: Vec<ReactionResult> = model
        .supports
        .iter()
        .map(|s| ReactionResult {
            support_id: s.id,
            label: s.label.clone(),
            x: s.x,
            ry: 0.0,
            m: 0.0,
        })
        .collect();

    for (j, dof) in dofs.iter().enumerate() {
        match dof.component {
            Component::Vertical => reactions[dof.support_index].ry = sol[j],
            Component::Rotational => reactions[dof.support_index].m = sol[j],
        }
    }

    Ok(reactions)
}

/// Residuals of the global force and moment balance for a set of solved
/// reactions. Moments are taken about x = 0.
pub(crate) fn verify(model: &BeamModel, reactions: &[ReactionResult]) -> EquilibriumCheck {
    let sum_fy: f64 =
        reactions.iter().map(|r| r.ry).sum::<f64>() + model.total_vertical_load();

    let reaction_moments: f64 = reactions.iter().map(|r| r.ry * r.x + r.m).sum();
    let sum_m = reaction_moments + model.applied_moment_about(0.0);

    EquilibriumCheck { sum_fy, sum_m }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Load, Support, SupportKind};

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn solve_quiet(model: &BeamModel) -> BeamResult<Vec<ReactionResult>> {
        let mut log = Vec::new();
        solve(model, &UnitSystem::default(), &mut log)
    }

    #[test]
    fn test_simply_supported_midspan_point() {
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned).with_label("S1"))
            .with_support(Support::new(10.0, SupportKind::Roller).with_label("S2"))
            .with_load(Load::point(-20.0, 5.0));

        let reactions = solve_quiet(&model).unwrap();
        assert_eq!(reactions.len(), 2);
        assert!(approx_eq(reactions[0].ry, 10.0));
        assert!(approx_eq(reactions[1].ry, 10.0));
        assert!(approx_eq(reactions[0].m, 0.0));

        let check = verify(&model, &reactions);
        assert!(check.sum_fy.abs() < 1e-6);
        assert!(check.sum_m.abs() < 1e-6);
    }

    #[test]
    fn test_asymmetric_point_load() {
        // P at 2.5 on a 10 span: far support carries P/4
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::point(-20.0, 2.5));

        let reactions = solve_quiet(&model).unwrap();
        assert!(approx_eq(reactions[0].ry, 15.0));
        assert!(approx_eq(reactions[1].ry, 5.0));
    }

    #[test]
    fn test_cantilever_fixed_at_origin() {
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Fixed).with_label("S1"))
            .with_load(Load::point(-20.0, 5.0));

        let reactions = solve_quiet(&model).unwrap();
        assert_eq!(reactions.len(), 1);
        assert!(approx_eq(reactions[0].ry, 20.0));
        assert!(approx_eq(reactions[0].m, 100.0));

        let check = verify(&model, &reactions);
        assert!(check.sum_fy.abs() < 1e-6);
        assert!(check.sum_m.abs() < 1e-6);
    }

    #[test]
    fn test_udl_and_point_demo_configuration() {
        // 10 span, P = -20 at 5, w = -2 over [0, 4]
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::point(-20.0, 5.0))
            .with_load(Load::udl(-2.0, 0.0, 4.0));

        let reactions = solve_quiet(&model).unwrap();
        // By moments about each end: R2 = 11.6, R1 = 16.4
        assert!(approx_eq(reactions[0].ry, 16.4));
        assert!(approx_eq(reactions[1].ry, 11.6));

        let check = verify(&model, &reactions);
        assert!(check.sum_fy.abs() < 1e-6);
        assert!(check.sum_m.abs() < 1e-6);
    }

    #[test]
    fn test_applied_moment_load() {
        // Pure moment couple: R1 = -M/L, R2 = +M/L
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::moment(50.0, 3.0));

        let reactions = solve_quiet(&model).unwrap();
        assert!(approx_eq(reactions[0].ry, 5.0));
        assert!(approx_eq(reactions[1].ry, -5.0));

        let check = verify(&model, &reactions);
        assert!(check.sum_fy.abs() < 1e-6);
        assert!(check.sum_m.abs() < 1e-6);
    }

    #[test]
    fn test_no_supports_is_singular() {
        let model = BeamModel::new(10.0).with_load(Load::point(-20.0, 5.0));
        let err = solve_quiet(&model).unwrap_err();
        assert_eq!(err.error_code(), "SINGULAR_SYSTEM");
    }

    #[test]
    fn test_collocated_supports_are_singular() {
        let model = BeamModel::new(10.0)
            .with_support(Support::new(5.0, SupportKind::Pinned))
            .with_support(Support::new(5.0, SupportKind::Roller))
            .with_load(Load::point(-20.0, 5.0));

        assert!(solve_quiet(&model).is_err());
    }

    #[test]
    fn test_three_rollers_overdetermined() {
        // Three vertical unknowns but only two independent equations.
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(5.0, SupportKind::Roller))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::point(-20.0, 5.0));

        assert!(solve_quiet(&model).is_err());
    }

    #[test]
    fn test_log_records_total_load() {
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::point(-20.0, 5.0))
            .with_load(Load::udl(-2.0, 0.0, 4.0));

        let mut log = Vec::new();
        solve(&model, &UnitSystem::default(), &mut log).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0], "Total applied vertical load: -28.000 kN");
    }
}
