//! # Stiffness Solver
//!
//! Direct stiffness method for beams the equilibrium equations cannot
//! solve. Meshes the span into Euler-Bernoulli elements with cubic
//! Hermite shape functions (two degrees of freedom per node: deflection
//! and rotation), nodes placed at every structural event so point loads
//! and UDL boundaries always land on a node. Reactions come from
//! `R = K·u - F` at the constrained degrees of freedom.

use crate::errors::{BeamError, BeamResult};
use crate::linalg;
use crate::model::{BeamModel, LoadKind};

use super::results::ReactionResult;
use super::{event_positions, POSITION_EPS};

/// Index of the node sitting at `x`, if the mesh has one there
fn node_index(nodes: &[f64], x: f64) -> Option<usize> {
    nodes.iter().position(|n| (n - x).abs() < POSITION_EPS)
}

/// Solve reactions with the stiffness method.
///
/// `ei` is the flexural rigidity; the caller checks it exists before
/// dispatching here. Reaction magnitudes do not depend on its value for
/// a given mesh, only the (discarded) displacements do.
pub(crate) fn solve(model: &BeamModel, ei: f64) -> BeamResult<Vec<ReactionResult>> {
    let nodes = event_positions(model);
    let n_nodes = nodes.len();
    let ndof = 2 * n_nodes;

    let mut k = vec![vec![0.0; ndof]; ndof];
    let mut f = vec![0.0; ndof];

    // Assemble element stiffness and equivalent nodal loads.
    for e in 0..n_nodes.saturating_sub(1) {
        let x1 = nodes[e];
        let x2 = nodes[e + 1];
        let l = x2 - x1;
        if l <= POSITION_EPS {
            continue;
        }

        let k_factor = ei / (l * l * l);
        let k_local = [
            [12.0, 6.0 * l, -12.0, 6.0 * l],
            [6.0 * l, 4.0 * l * l, -6.0 * l, 2.0 * l * l],
            [-12.0, -6.0 * l, 12.0, -6.0 * l],
            [6.0 * l, 2.0 * l * l, -6.0 * l, 4.0 * l * l],
        ];
        let dof_map = [2 * e, 2 * e + 1, 2 * (e + 1), 2 * (e + 1) + 1];

        for i in 0..4 {
            for j in 0..4 {
                k[dof_map[i]][dof_map[j]] += k_local[i][j] * k_factor;
            }
        }

        // Consistent nodal loads for any UDL covering this element. The
        // mesh splits at UDL boundaries, so overlap means full coverage.
        for load in &model.loads {
            if let LoadKind::Udl { w, x_start, x_end } = load.kind {
                let a = x_start.max(x1);
                let b = x_end.min(x2);
                if b - a > POSITION_EPS {
                    let fe = [
                        w * l / 2.0,
                        w * l * l / 12.0,
                        w * l / 2.0,
                        -w * l * l / 12.0,
                    ];
                    for i in 0..4 {
                        f[dof_map[i]] += fe[i];
                    }
                }
            }
        }
    }

    // Concentrated loads land directly on their node.
    for load in &model.loads {
        match load.kind {
            LoadKind::Point { magnitude, x } => {
                if let Some(i) = node_index(&nodes, x) {
                    f[2 * i] += magnitude;
                }
            }
            LoadKind::Moment { magnitude, x } => {
                if let Some(i) = node_index(&nodes, x) {
                    f[2 * i + 1] += magnitude;
                }
            }
            LoadKind::Udl { .. } => {}
        }
    }

    // Boundary conditions: supports pin deflection, fixed ones rotation too.
    let mut constrained = vec![false; ndof];
    for support in &model.supports {
        if let Some(i) = node_index(&nodes, support.x) {
            constrained[2 * i] = true;
            if support.kind.restrains_rotation() {
                constrained[2 * i + 1] = true;
            }
        }
    }

    let free_dofs: Vec<usize> = (0..ndof).filter(|&i| !constrained[i]).collect();

    // Reduce to the free system and solve for displacements.
    let mut k_rr = vec![vec![0.0; free_dofs.len()]; free_dofs.len()];
    let mut f_r = vec![0.0; free_dofs.len()];
    for (i, &di) in free_dofs.iter().enumerate() {
        f_r[i] = f[di];
        for (j, &dj) in free_dofs.iter().enumerate() {
            k_rr[i][j] = k[di][dj];
        }
    }

    let u_r = linalg::solve_linear(&k_rr, &f_r)
        .map_err(|e| BeamError::singular_system("stiffness system", e.to_string()))?;

    let mut u = vec![0.0; ndof];
    for (i, &dof) in free_dofs.iter().enumerate() {
        u[dof] = u_r[i];
    }

    // Reactions at the constrained dofs: R = K*u - F.
    let mut r = vec![0.0; ndof];
    for i in 0..ndof {
        let mut ku = 0.0;
        for j in 0..ndof {
            ku += k[i][j] * u[j];
        }
        r[i] = ku - f[i];
    }

    let reactions = model
        .supports
        .iter()
        .map(|s| {
            let (ry, m) = match node_index(&nodes, s.x) {
                Some(i) => {
                    let moment = if s.kind.restrains_rotation() {
                        r[2 * i + 1]
                    } else {
                        0.0
                    };
                    (r[2 * i], moment)
                }
                None => (0.0, 0.0),
            };
            ReactionResult {
                support_id: s.id,
                label: s.label.clone(),
                x: s.x,
                ry,
                m,
            }
        })
        .collect();

    Ok(reactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::equilibrium;
    use crate::model::{Load, Support, SupportKind};
    use crate::units::UnitSystem;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    const EI: f64 = 210_000.0 * 8.5e-5;

    #[test]
    fn test_two_span_continuous_udl() {
        // Equal spans under full-length UDL: end reactions 3wL/8,
        // center reaction 10wL/8 (L = span length).
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned).with_label("S1"))
            .with_support(Support::new(5.0, SupportKind::Roller).with_label("S2"))
            .with_support(Support::new(10.0, SupportKind::Roller).with_label("S3"))
            .with_load(Load::udl(-2.0, 0.0, 10.0));

        let reactions = solve(&model, EI).unwrap();
        assert_eq!(reactions.len(), 3);
        assert!(approx_eq(reactions[0].ry, 3.75));
        assert!(approx_eq(reactions[1].ry, 12.5));
        assert!(approx_eq(reactions[2].ry, 3.75));

        let check = equilibrium::verify(&model, &reactions);
        assert!(check.sum_fy.abs() < 1e-6);
        assert!(check.sum_m.abs() < 1e-6);
    }

    #[test]
    fn test_propped_cantilever_midspan_point() {
        // Fixed at 0, roller at L, P at midspan: the fixed end carries
        // 11P/16 and 3PL/16, the prop 5P/16.
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Fixed).with_label("S1"))
            .with_support(Support::new(10.0, SupportKind::Roller).with_label("S2"))
            .with_load(Load::point(-20.0, 5.0));

        let reactions = solve(&model, EI).unwrap();
        assert!(approx_eq(reactions[0].ry, 13.75));
        assert!(approx_eq(reactions[0].m, 37.5));
        assert!(approx_eq(reactions[1].ry, 6.25));
        assert!(approx_eq(reactions[1].m, 0.0));
    }

    #[test]
    fn test_fixed_fixed_midspan_point() {
        // Both ends fixed, P at midspan: R = P/2 each, end moments PL/8.
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Fixed))
            .with_support(Support::new(10.0, SupportKind::Fixed))
            .with_load(Load::point(-20.0, 5.0));

        let reactions = solve(&model, EI).unwrap();
        assert!(approx_eq(reactions[0].ry, 10.0));
        assert!(approx_eq(reactions[1].ry, 10.0));
        assert!(approx_eq(reactions[0].m, 25.0));
        assert!(approx_eq(reactions[1].m, -25.0));
    }

    #[test]
    fn test_reactions_independent_of_rigidity() {
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(4.0, SupportKind::Roller))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::point(-20.0, 7.0))
            .with_load(Load::udl(-2.0, 0.0, 4.0));

        let soft = solve(&model, 1.0).unwrap();
        let stiff = solve(&model, 1.0e9).unwrap();
        for (a, b) in soft.iter().zip(stiff.iter()) {
            assert!(approx_eq(a.ry, b.ry));
            assert!(approx_eq(a.m, b.m));
        }
    }

    #[test]
    fn test_isostatic_case_matches_equilibrium() {
        let model = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Pinned))
            .with_support(Support::new(10.0, SupportKind::Roller))
            .with_load(Load::point(-20.0, 5.0))
            .with_load(Load::udl(-2.0, 0.0, 4.0))
            .with_load(Load::moment(15.0, 8.0));

        let fem = solve(&model, EI).unwrap();

        let mut log = Vec::new();
        let iso = equilibrium::solve(&model, &UnitSystem::default(), &mut log).unwrap();

        for (a, b) in fem.iter().zip(iso.iter()) {
            assert!((a.ry - b.ry).abs() < 1e-3);
            assert!((a.m - b.m).abs() < 1e-3);
        }
    }

    #[test]
    fn test_unsupported_beam_is_singular() {
        let model = BeamModel::new(10.0).with_load(Load::point(-20.0, 5.0));
        let err = solve(&model, EI).unwrap_err();
        assert_eq!(err.error_code(), "SINGULAR_SYSTEM");
    }
}
