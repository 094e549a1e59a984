/*!
A LinUCB contextual bandit.

The controller treats each branching heuristic as an arm, and each arm as a ridge
regression from context vectors to rewards.
Per arm *i* the state is a d×d positive-definite matrix Aᵢ (initially the identity)
and a d-vector bᵢ (initially zero), with the estimate θᵢ = Aᵢ⁻¹bᵢ.

On [select](LinUcb::select) each arm is scored

> θᵢᵀx + α·√(xᵀAᵢ⁻¹x)

where the first term is the estimated reward and the second an upper-confidence bonus
shrinking as the arm gathers observations along the direction of x.
The arm with the greatest score wins, and ties resolve to the smallest index so a run
is reproducible.

On [update](LinUcb::update) the chosen arm's state absorbs the observation:
Aᵢ ← Aᵢ + xxᵀ and bᵢ ← bᵢ + r·x.
Rather than invert Aᵢ on every selection the inverse is maintained directly with the
Sherman–Morrison identity for a rank-1 update:

> A⁻¹ ← A⁻¹ − (A⁻¹x xᵀA⁻¹) / (1 + xᵀA⁻¹x)

# Numerical care

The denominator 1 + xᵀA⁻¹x is at least 1 while A⁻¹ remains positive-definite.
Still, the controller must never fail, so a pathological context or reward (a
non-finite entry, or a denominator driven non-positive by accumulated rounding) is
rejected rather than absorbed, and the square root argument is clamped at zero.
*/

use crate::misc::log::targets::{self};

/// The per-arm state: a maintained inverse of A, and b.
struct ArmEstimate {
    a_inv: Vec<Vec<f64>>,
    b: Vec<f64>,
}

impl ArmEstimate {
    fn fresh(dim: usize) -> Self {
        let mut a_inv = vec![vec![0.0; dim]; dim];
        for (i, row) in a_inv.iter_mut().enumerate() {
            row[i] = 1.0;
        }

        ArmEstimate {
            a_inv,
            b: vec![0.0; dim],
        }
    }
}

/// A LinUCB bandit over a fixed number of arms and a fixed context dimension.
pub struct LinUcb {
    /// The exploration constant.
    alpha: f64,

    /// The context dimension.
    dim: usize,

    /// Per-arm estimates, indexed by arm.
    arms: Vec<ArmEstimate>,
}

impl LinUcb {
    pub fn new(arm_count: usize, dim: usize, alpha: f64) -> Self {
        LinUcb {
            alpha,
            dim,
            arms: (0..arm_count).map(|_| ArmEstimate::fresh(dim)).collect(),
        }
    }

    /// The context dimension the bandit was built for.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The arm with the greatest upper-confidence score on the given context.
    /// Ties resolve to the smallest arm index.
    pub fn select(&self, x: &[f64]) -> usize {
        debug_assert_eq!(x.len(), self.dim);

        let mut best_arm = 0;
        let mut best_score = f64::NEG_INFINITY;

        for (arm, estimate) in self.arms.iter().enumerate() {
            let a_inv_x = mat_vec(&estimate.a_inv, x);

            // θᵀx with θ = A⁻¹b.  A⁻¹ is symmetric, so θᵀx = bᵀ(A⁻¹x).
            let exploit = dot(&estimate.b, &a_inv_x);
            let explore = self.alpha * f64::max(0.0, dot(x, &a_inv_x)).sqrt();
            let score = exploit + explore;

            if score > best_score {
                best_score = score;
                best_arm = arm;
            }
        }

        best_arm
    }

    /// Absorbs the observation that context `x` on `arm` produced `reward`.
    ///
    /// Non-finite observations are rejected, as is any update whose Sherman–Morrison
    /// denominator is not positive and finite.
    pub fn update(&mut self, arm: usize, x: &[f64], reward: f64) {
        debug_assert_eq!(x.len(), self.dim);

        if !reward.is_finite() || x.iter().any(|entry| !entry.is_finite()) {
            log::warn!(target: targets::BANDIT, "Rejected update of arm {arm}: non-finite observation");
            return;
        }

        let estimate = &mut self.arms[arm];
        let a_inv_x = mat_vec(&estimate.a_inv, x);
        let denominator = 1.0 + dot(x, &a_inv_x);

        if !(denominator.is_finite() && denominator > 0.0) {
            log::warn!(target: targets::BANDIT, "Rejected update of arm {arm}: denominator {denominator}");
            return;
        }

        for i in 0..self.dim {
            for j in 0..self.dim {
                estimate.a_inv[i][j] -= (a_inv_x[i] * a_inv_x[j]) / denominator;
            }
        }

        for (entry, x_entry) in estimate.b.iter_mut().zip(x) {
            *entry += reward * x_entry;
        }
    }

    /// The Euclidean norm of bᵢ, a measure of how much the arm has observed.
    pub fn b_norm(&self, arm: usize) -> f64 {
        self.arms[arm].b.iter().map(|entry| entry * entry).sum::<f64>().sqrt()
    }
}

/// The product Mv for a square matrix M in row order.
fn mat_vec(matrix: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    matrix.iter().map(|row| dot(row, vector)).collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod bandit_tests {
    use super::*;

    #[test]
    fn fresh_selection_takes_the_first_arm() {
        let bandit = LinUcb::new(4, 3, 0.3);
        assert_eq!(bandit.select(&[1.0, 0.5, 0.25]), 0);
    }

    #[test]
    fn rewards_steer_selection() {
        let mut bandit = LinUcb::new(2, 2, 0.0);
        let x = [1.0, 1.0];

        bandit.update(0, &x, -1.0);
        bandit.update(1, &x, 1.0);

        assert_eq!(bandit.select(&x), 1);
        assert!(bandit.b_norm(0) > 0.0);
    }

    #[test]
    fn maintained_inverse_matches_the_direct_inverse() {
        // After observing x on a 2-dimensional arm, A = I + xxᵀ can be inverted by
        // hand and compared against the Sherman–Morrison maintained inverse.
        let mut bandit = LinUcb::new(1, 2, 0.3);
        let x = [1.0, 2.0];
        bandit.update(0, &x, 1.0);

        // A = [[2, 2], [2, 5]], det = 6.
        let expected = [[5.0 / 6.0, -2.0 / 6.0], [-2.0 / 6.0, 2.0 / 6.0]];

        for i in 0..2 {
            for j in 0..2 {
                let maintained = bandit.arms[0].a_inv[i][j];
                assert!((maintained - expected[i][j]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn non_finite_observations_are_rejected() {
        let mut bandit = LinUcb::new(1, 2, 0.3);

        bandit.update(0, &[f64::NAN, 1.0], 1.0);
        bandit.update(0, &[1.0, 1.0], f64::INFINITY);

        assert_eq!(bandit.b_norm(0), 0.0);
    }
}
