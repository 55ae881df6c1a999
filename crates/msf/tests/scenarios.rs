//! Integration tests replaying the concrete link/cut/expose scenarios and
//! a randomized stress test through the full `MsfDriver`, checked against
//! the offline Kruskal oracle.

use msf::driver::{EdgeOutcome, MsfDriver};
use msf::kruskal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn s1_four_vertex_path_exposes_the_max_edge() {
    let mut driver = MsfDriver::new();
    driver.process_edge(1, 2, 5);
    driver.process_edge(2, 3, 7);
    driver.process_edge(3, 4, 3);

    let path = driver.tree_mut().expose(1, 4).expect("1 and 4 should be connected");
    assert_eq!(path.max_cost, 7);
    let (bu, bv) = driver.tree().forest().boundary(path.leaf);
    let names = (driver.tree().forest().vertex_name(bu), driver.tree().forest().vertex_name(bv));
    assert!(names == (2, 3) || names == (3, 2));
}

#[test]
fn s2_cut_and_swap_changes_the_path_max() {
    let mut driver = MsfDriver::new();
    driver.process_edge(1, 2, 5);
    driver.process_edge(2, 3, 7);
    driver.process_edge(3, 4, 3);

    let outcome = driver.process_edge(1, 4, 2);
    assert_eq!(outcome, EdgeOutcome::Swapped { evicted: (2, 3, 7) });

    let path = driver.tree_mut().expose(2, 3).expect("2 and 3 should remain connected");
    assert_eq!(path.max_cost, 5);
}

#[test]
fn s3_equal_weight_cycle_closer_is_dropped() {
    let mut driver = MsfDriver::new();
    driver.process_edge(1, 2, 1);
    driver.process_edge(2, 3, 1);
    let outcome = driver.process_edge(3, 1, 1);
    assert_eq!(outcome, EdgeOutcome::Dropped);
    assert_eq!(driver.total_weight(), 2);
}

#[test]
fn s4_disjoint_components_expose_to_none() {
    let mut driver = MsfDriver::new();
    driver.process_edge(1, 2, 4);
    driver.process_edge(3, 4, 9);
    assert!(driver.tree_mut().expose(1, 4).is_none());
}

#[test]
fn s5_isolated_vertex_exposes_to_none() {
    let mut driver = MsfDriver::new();
    driver.process_edge(1, 2, 5);
    assert!(driver.tree_mut().expose(3, 3).is_none());
}

#[test]
fn s6_thousand_random_edges_match_kruskal() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut edges = Vec::new();
    let mut seen = std::collections::HashSet::new();
    while edges.len() < 1000 {
        let u = rng.gen_range(0..100);
        let v = rng.gen_range(0..100);
        if u == v {
            continue;
        }
        let key = (u.min(v), u.max(v));
        if !seen.insert(key) {
            continue;
        }
        let w = rng.gen_range(1..1000);
        edges.push((u, v, w));
    }

    let mut driver = MsfDriver::new();
    for &(u, v, w) in &edges {
        driver.process_edge(u, v, w);
    }

    let oracle = kruskal::minimum_spanning_forest(&edges);
    let oracle_weight: i64 = oracle.iter().map(|&(_, _, w)| w).sum();
    assert_eq!(driver.total_weight(), oracle_weight);
}
