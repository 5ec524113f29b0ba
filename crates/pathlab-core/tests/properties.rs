//! Whole-engine properties checked against brute-force shortest paths.

use std::collections::VecDeque;

use pathlab_core::{Grid, Heuristic, HeuristicKind, Movement, Pos, search};

const EPS: f64 = 1e-9;

/// Bellman-Ford style relaxation until fixpoint: slow, obviously correct.
fn brute_force_costs(grid: &Grid, from: Pos, movement: Movement) -> Vec<f64> {
    let cols = grid.cols();
    let idx = |p: Pos| (p.row * cols + p.col) as usize;
    let mut dist = vec![f64::INFINITY; grid.len()];
    dist[idx(from)] = 0.0;
    loop {
        let mut changed = false;
        for cell in grid.iter() {
            let p = cell.pos();
            let d = dist[idx(p)];
            if !d.is_finite() || cell.is_wall() {
                continue;
            }
            for (n, cost) in grid.neighbors_of(p, movement) {
                if d + cost < dist[idx(n)] - EPS {
                    dist[idx(n)] = d + cost;
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

fn reachable_count(grid: &Grid, from: Pos, movement: Movement) -> usize {
    let mut seen = vec![from];
    let mut queue = VecDeque::from([from]);
    while let Some(p) = queue.pop_front() {
        for (n, _) in grid.neighbors_of(p, movement) {
            if !seen.contains(&n) {
                seen.push(n);
                queue.push_back(n);
            }
        }
    }
    seen.len()
}

/// A fixed pattern of walls that leaves the corners open.
fn patterned(rows: i32, cols: i32, salt: i32) -> Grid {
    let mut g = Grid::build(rows, cols).unwrap();
    for r in 0..rows {
        for c in 0..cols {
            let corner = (r == 0 || r == rows - 1) && (c == 0 || c == cols - 1);
            if !corner && (r * 7 + c * 13 + salt) % 5 == 0 {
                g.set_wall(Pos::new(r, c), true).unwrap();
            }
        }
    }
    g
}

#[test]
fn straight_lines_have_manhattan_length() {
    let h = HeuristicKind::Manhattan;
    for (rows, cols) in [(1, 8), (6, 1), (5, 7), (9, 4)] {
        let start = Pos::new(0, 0);
        for end in [Pos::new(0, cols - 1), Pos::new(rows - 1, 0)] {
            if end == start {
                continue;
            }
            let mut g = Grid::build(rows, cols).unwrap();
            let r = search(&mut g, start, end, &h, h.movement()).unwrap();
            let (dr, dc) = start.abs_delta(end);
            assert!(r.found);
            assert_eq!(r.path_length(), (dr + dc) as usize);
        }
    }
}

#[test]
fn heuristics_are_admissible_on_open_grid() {
    let g = Grid::build(5, 5).unwrap();
    for h in HeuristicKind::ALL {
        for a in g.iter().map(|c| c.pos()) {
            let costs = brute_force_costs(&g, a, h.movement());
            for b in g.iter().map(|c| c.pos()) {
                let truth = costs[(b.row * 5 + b.col) as usize];
                assert!(
                    h.estimate(a, b) <= truth + EPS,
                    "{h} overestimates {a} -> {b}: {} > {truth}",
                    h.estimate(a, b)
                );
            }
        }
    }
}

#[test]
fn paths_are_optimal_with_walls() {
    for salt in 0..5 {
        for h in HeuristicKind::ALL {
            let mut g = patterned(7, 9, salt);
            let start = Pos::new(0, 0);
            let end = Pos::new(6, 8);
            let truth = brute_force_costs(&g, start, h.movement())[g.len() - 1];
            let r = search(&mut g, start, end, &h, h.movement()).unwrap();
            assert_eq!(r.found, truth.is_finite(), "salt {salt}, {h}");
            if r.found {
                assert!((r.cost - truth).abs() < EPS, "salt {salt}, {h}");
                let walked: f64 = r
                    .path
                    .windows(2)
                    .map(|w| {
                        let (dr, dc) = w[0].abs_delta(w[1]);
                        assert!(dr <= 1 && dc <= 1);
                        if dr + dc == 2 { std::f64::consts::SQRT_2 } else { 1.0 }
                    })
                    .sum();
                assert!((walked - r.cost).abs() < EPS);
            }
        }
    }
}

#[test]
fn sealed_goal_explores_exactly_the_reachable_region() {
    let mut g = patterned(8, 8, 2);
    let end = Pos::new(7, 7);
    for n in [Pos::new(6, 7), Pos::new(7, 6), Pos::new(6, 6)] {
        g.set_wall(n, true).unwrap();
    }
    let start = Pos::new(0, 0);
    let expected = reachable_count(&g, start, Movement::FourWay);
    let h = HeuristicKind::Manhattan;
    let r = search(&mut g, start, end, &h, h.movement()).unwrap();
    assert!(!r.found);
    assert_eq!(r.nodes_explored, expected);
}

#[test]
fn zero_heuristic_degrades_to_dijkstra() {
    let zero = |_: Pos, _: Pos| 0.0;
    let mut g = patterned(6, 6, 1);
    let start = Pos::new(0, 0);
    let end = Pos::new(5, 5);
    let truth = brute_force_costs(&g, start, Movement::EightWay)[g.len() - 1];
    let r = search(&mut g, start, end, &zero, Movement::EightWay).unwrap();
    assert!(r.found);
    assert!((r.cost - truth).abs() < EPS);
}
