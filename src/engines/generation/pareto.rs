//! NSGA-II fast non-dominated sorting and crowding distance over one
//! generation's working set.

use super::individual::Individual;
use std::cmp::Ordering;

/// Ranking objectives: compounded growth and risk-adjusted return, both
/// maximised. `a` dominates `b` when it regresses on neither objective and
/// strictly improves at least one.
pub fn dominates(a: &Individual, b: &Individual) -> bool {
    a.cagr >= b.cagr
        && a.sharpe_ratio >= b.sharpe_ratio
        && (a.cagr > b.cagr || a.sharpe_ratio > b.sharpe_ratio)
}

/// Partition the arena into Pareto fronts (0 = best), writing
/// `dominated_by`, `dominates` and `rank` on every member. Indices in the
/// returned fronts, and in each `dominates` list, address this arena only
/// and must not outlive the generation. Quadratic in arena size.
pub fn fast_non_dominated_sort(population: &mut [Individual]) -> Vec<Vec<usize>> {
    let n = population.len();
    if n == 0 {
        return Vec::new();
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut first_front = Vec::new();

    // Pairwise pass: record who each member dominates, count who it is
    // dominated by
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            if dominates(&population[i], &population[j]) {
                population[i].dominates.push(j);
            } else if dominates(&population[j], &population[i]) {
                population[i].dominated_by += 1;
            }
        }

        if population[i].dominated_by == 0 {
            population[i].rank = 0;
            first_front.push(i);
        }
    }

    fronts.push(first_front);

    // Peel subsequent fronts: releasing a front decrements the domination
    // count of everything it dominates
    let mut front_index = 0;
    while front_index < fronts.len() && !fronts[front_index].is_empty() {
        let mut next_front = Vec::new();

        for idx in fronts[front_index].clone() {
            let dominated = population[idx].dominates.clone();
            for j in dominated {
                population[j].dominated_by -= 1;
                if population[j].dominated_by == 0 {
                    population[j].rank = front_index + 1;
                    next_front.push(j);
                }
            }
        }

        if !next_front.is_empty() {
            fronts.push(next_front);
        }
        front_index += 1;
    }

    fronts
}

/// Diversity objectives. Intentionally broader than the ranking pair:
/// spreading the front across raw pnl, drawdown and Sharpe keeps survivors
/// diverse in risk/return shape, not just along the ranking axes.
const CROWDING_OBJECTIVES: usize = 3;

fn objective(individual: &Individual, index: usize) -> f64 {
    match index {
        0 => individual.pnl,
        1 => individual.max_drawdown,
        _ => individual.sharpe_ratio,
    }
}

/// Crowding distance of every member of one front. Boundary members get
/// `+inf`; interior members accumulate the normalised gap between their
/// neighbours for each objective. A flat objective (min == max across the
/// front) contributes nothing.
pub fn crowding_distance(population: &mut [Individual], front: &[usize]) {
    let front_size = front.len();
    if front_size == 0 {
        return;
    }
    if front_size <= 2 {
        for &idx in front {
            population[idx].crowding_distance = f64::INFINITY;
        }
        return;
    }

    for obj in 0..CROWDING_OBJECTIVES {
        let mut sorted: Vec<usize> = front.to_vec();
        // Stable sort keeps input order on ties, which keeps rank
        // assignment reproducible
        sorted.sort_by(|&a, &b| {
            objective(&population[a], obj)
                .partial_cmp(&objective(&population[b], obj))
                .unwrap_or(Ordering::Equal)
        });

        population[sorted[0]].crowding_distance = f64::INFINITY;
        population[sorted[front_size - 1]].crowding_distance = f64::INFINITY;

        let min_value = objective(&population[sorted[0]], obj);
        let max_value = objective(&population[sorted[front_size - 1]], obj);
        let range = max_value - min_value;
        if range == 0.0 {
            continue;
        }

        for k in 1..front_size - 1 {
            let gap = objective(&population[sorted[k + 1]], obj)
                - objective(&population[sorted[k - 1]], obj);
            population[sorted[k]].crowding_distance += gap / range;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParamValue, Parameters};

    fn candidate(id: i64, cagr: f64, sharpe: f64) -> Individual {
        let mut params = Parameters::new();
        params.insert("id".to_string(), ParamValue::Int(id));
        let mut ind = Individual::new(params);
        ind.cagr = cagr;
        ind.sharpe_ratio = sharpe;
        ind
    }

    #[test]
    fn test_dominates() {
        // Better in both
        assert!(dominates(&candidate(0, 0.3, 2.0), &candidate(1, 0.1, 1.0)));
        // Better in one, equal in the other
        assert!(dominates(&candidate(0, 0.3, 1.0), &candidate(1, 0.1, 1.0)));
        // Better in one, worse in the other
        assert!(!dominates(&candidate(0, 0.3, 0.5), &candidate(1, 0.1, 1.0)));
        // Equal in both
        assert!(!dominates(&candidate(0, 0.3, 1.0), &candidate(1, 0.3, 1.0)));
    }

    #[test]
    fn test_sentinel_scores_never_dominate() {
        let healthy = candidate(0, 0.2, 1.1);
        let mut degenerate = candidate(1, 0.0, 0.0);
        degenerate.cagr = f64::NEG_INFINITY;
        degenerate.sharpe_ratio = f64::NEG_INFINITY;

        assert!(dominates(&healthy, &degenerate));
        assert!(!dominates(&degenerate, &healthy));
        // Two degenerates are mutually non-dominating
        assert!(!dominates(&degenerate, &degenerate.clone()));
    }

    #[test]
    fn test_front_partition_on_known_layout() {
        // (cagr, sharpe): (1,1) is dominated by all three others, which
        // are mutually non-dominating and therefore share front 0
        let mut population = vec![
            candidate(0, 1.0, 1.0),
            candidate(1, 5.0, 5.0),
            candidate(2, 10.0, 1.0),
            candidate(3, 1.0, 10.0),
        ];

        let fronts = fast_non_dominated_sort(&mut population);

        assert_eq!(fronts.len(), 2);
        assert_eq!(fronts[0], vec![1, 2, 3]);
        assert_eq!(fronts[1], vec![0]);

        assert_eq!(population[1].rank, 0);
        assert_eq!(population[2].rank, 0);
        assert_eq!(population[3].rank, 0);
        assert_eq!(population[0].rank, 1);
    }

    #[test]
    fn test_first_front_members_were_undominated() {
        let mut population = vec![
            candidate(0, 1.0, 5.0),
            candidate(1, 3.0, 3.0),
            candidate(2, 5.0, 1.0),
            candidate(3, 2.0, 2.0),
            candidate(4, 1.0, 1.0),
        ];

        let fronts = fast_non_dominated_sort(&mut population);

        assert_eq!(fronts[0], vec![0, 1, 2]);
        // No member of a front is dominated by a member of any earlier or
        // equal front
        for (k, front) in fronts.iter().enumerate() {
            for &i in front {
                for earlier in &fronts[..=k] {
                    for &j in earlier {
                        assert!(
                            !dominates(&population[j], &population[i]) || population[j].rank < k,
                            "front {k} member {i} dominated from within reach"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_is_deterministic_on_reset_inputs() {
        let build = || {
            vec![
                candidate(0, 1.0, 5.0),
                candidate(1, 3.0, 3.0),
                candidate(2, 5.0, 1.0),
                candidate(3, 2.0, 2.0),
            ]
        };

        let mut first = build();
        let mut second = build();

        let fronts_a = fast_non_dominated_sort(&mut first);
        let fronts_b = fast_non_dominated_sort(&mut second);

        assert_eq!(fronts_a, fronts_b);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.rank, b.rank);
        }
    }

    #[test]
    fn test_crowding_boundary_members_get_infinity() {
        let mut population: Vec<Individual> = (0..4)
            .map(|i| {
                let mut ind = candidate(i, 0.0, 0.0);
                ind.pnl = i as f64 * 10.0;
                ind.max_drawdown = 0.5 - i as f64 * 0.1;
                ind.sharpe_ratio = i as f64;
                ind
            })
            .collect();

        let front: Vec<usize> = (0..4).collect();
        crowding_distance(&mut population, &front);

        // 0 and 3 are the extremes on every objective
        assert!(population[0].crowding_distance.is_infinite());
        assert!(population[3].crowding_distance.is_infinite());
        assert!(population[1].crowding_distance.is_finite());
        assert!(population[2].crowding_distance.is_finite());
        assert!(population[1].crowding_distance > 0.0);
    }

    #[test]
    fn test_crowding_tiny_front_is_all_infinite() {
        let mut population = vec![candidate(0, 1.0, 1.0), candidate(1, 2.0, 2.0)];
        crowding_distance(&mut population, &[0, 1]);
        assert!(population[0].crowding_distance.is_infinite());
        assert!(population[1].crowding_distance.is_infinite());
    }

    #[test]
    fn test_flat_objectives_contribute_zero() {
        let mut population: Vec<Individual> = (0..4)
            .map(|i| {
                let mut ind = candidate(i, 0.0, 0.0);
                ind.pnl = 42.0;
                ind.max_drawdown = 0.1;
                ind.sharpe_ratio = 1.0;
                ind
            })
            .collect();

        let front: Vec<usize> = (0..4).collect();
        crowding_distance(&mut population, &front);

        // Extremes by sort order still get infinity; the interior gets no
        // contribution from any flat objective
        assert_eq!(population[1].crowding_distance, 0.0);
        assert_eq!(population[2].crowding_distance, 0.0);
    }
}
