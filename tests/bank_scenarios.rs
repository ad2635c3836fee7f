use rstest::rstest;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use steiner_bank::display::SolutionReport;
use steiner_bank::{BankSolver, MultiDiGraph, Solution, SolverConfig, SolverError};

fn graph(edges: &[(&str, &str, &str, f64)]) -> MultiDiGraph {
    let mut g = MultiDiGraph::new();
    for &(s, t, k, w) in edges {
        g.add_edge(s, t, k, w);
    }
    g
}

fn config(contract: bool) -> SolverConfig {
    SolverConfig { allow_chain_contraction: contract, ..Default::default() }
}

fn edge_set(g: &MultiDiGraph) -> BTreeSet<(String, String, String)> {
    g.edges().map(|(s, t, d)| (s.to_string(), t.to_string(), d.key.clone())).collect()
}

fn root_names(input: &MultiDiGraph, sol: &Solution) -> Vec<String> {
    sol.roots().iter().map(|&r| input.node_name(r).unwrap().to_string()).collect()
}

fn reachable(g: &MultiDiGraph, from: &str) -> HashSet<String> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for (s, t, _) in g.edges() {
        children.entry(s).or_default().push(t);
    }
    let mut seen = HashSet::from([from.to_string()]);
    let mut queue = VecDeque::from([from]);
    while let Some(n) = queue.pop_front() {
        for &c in children.get(n).into_iter().flatten() {
            if seen.insert(c.to_string()) {
                queue.push_back(c);
            }
        }
    }
    seen
}

fn is_acyclic(g: &MultiDiGraph) -> bool {
    let mut in_deg: HashMap<&str, usize> = HashMap::new();
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for (s, t, _) in g.edges() {
        in_deg.entry(s).or_default();
        *in_deg.entry(t).or_default() += 1;
        children.entry(s).or_default().push(t);
    }
    let mut ready: Vec<&str> = in_deg.iter().filter(|(_, &d)| d == 0).map(|(&n, _)| n).collect();
    let mut removed = 0;
    while let Some(n) = ready.pop() {
        removed += 1;
        for &c in children.get(n).into_iter().flatten() {
            let d = in_deg.get_mut(c).unwrap();
            *d -= 1;
            if *d == 0 {
                ready.push(c);
            }
        }
    }
    removed == in_deg.len()
}

/// Two sources feeding a shared hub, a side chain and a few cross links.
fn bank() -> MultiDiGraph {
    graph(&[
        ("Root", "Hub", "id", 1.0),
        ("Root", "Side", "id", 2.0),
        ("Alt", "Hub", "id", 0.5),
        ("Alt", "Side", "name", 3.0),
        ("Hub", "Mid", "id", 1.0),
        ("Mid", "T1", "id", 1.0),
        ("Hub", "T2", "id", 4.0),
        ("Hub", "T2", "code", 2.5),
        ("Side", "T2", "id", 1.0),
        ("Side", "Tail", "id", 1.0),
        ("Tail", "T3", "id", 1.0),
        ("Mid", "T3", "ref", 6.0),
        ("T1", "T3", "ref", 0.5),
    ])
}

#[test]
fn test_simple_chain() {
    let g = graph(&[("A", "B", "p", 1.0), ("B", "C", "p", 1.0), ("C", "D", "p", 1.0)]);

    let out = BankSolver::new(&g, ["A", "D"], SolverConfig::default()).solve().unwrap();

    assert_eq!(out.len(), 1);
    let (subgraph, sol) = &out[0];
    assert_eq!(sol.weight(), 3.0);
    assert_eq!(root_names(&g, sol), vec!["A"]);
    assert_eq!(edge_set(subgraph), edge_set(&g));
}

#[test]
fn test_diamond_has_no_single_root() {
    let g = graph(&[("A", "C", "p", 1.0), ("B", "C", "p", 1.0)]);

    let err = BankSolver::new(&g, ["A", "B"], SolverConfig::default()).solve().unwrap_err();

    assert_eq!(err, SolverError::NoSingleRoot { terminals: vec!["A".into(), "B".into()] });
}

#[rstest]
#[case(true)]
#[case(false)]
fn test_unsolvable_component_fails_the_whole_split(#[case] contract: bool) {
    let g = graph(&[("A", "C", "p", 1.0), ("B", "C", "p", 1.0), ("R", "X", "p", 1.0), ("R", "Y", "p", 1.0)]);

    let err = BankSolver::new(&g, ["A", "B", "X", "Y"], config(contract)).solve().unwrap_err();

    assert_eq!(err, SolverError::NoSingleRoot { terminals: vec!["A".into(), "B".into()] });
}

#[test]
fn test_parallel_edges_pick_cheaper() {
    let g = graph(&[("R", "T", "slow", 5.0), ("R", "T", "fast", 2.0)]);

    let out = BankSolver::new(&g, ["T"], SolverConfig::default()).solve().unwrap();

    let (subgraph, sol) = &out[0];
    assert_eq!(sol.weight(), 2.0);
    assert_eq!(sol.edges().len(), 1);
    assert!(subgraph.has_edge("R", "T", "fast"));
    assert!(!subgraph.has_edge("R", "T", "slow"));
}

#[rstest]
#[case(true)]
#[case(false)]
fn test_disconnected_components_combine_into_forest(#[case] contract: bool) {
    let left = [("R1", "A", "p", 1.0), ("R1", "B", "p", 2.0), ("Q1", "A", "p", 0.5), ("Q1", "B", "p", 5.0)];
    let right = [("R2", "C", "p", 3.0), ("X", "R2", "p", 1.0), ("X", "D", "p", 1.0), ("R2", "D", "p", 4.0)];
    let both: Vec<_> = left.iter().chain(right.iter()).copied().collect();

    let best = |edges: &[(&str, &str, &str, f64)], terminals: [&str; 2]| {
        let g = graph(edges);
        let w = BankSolver::new(&g, terminals, config(contract)).solve().unwrap()[0].1.weight();
        w
    };
    let expected = best(&left, ["A", "B"]) + best(&right, ["C", "D"]);

    let g = graph(&both);
    let out = BankSolver::new(&g, ["A", "B", "C", "D"], config(contract)).solve().unwrap();

    let (subgraph, sol) = &out[0];
    assert_eq!(sol.weight(), expected);
    assert_eq!(sol.roots().len(), 2);
    for root in root_names(&g, sol) {
        let reach = reachable(subgraph, &root);
        let covers_left = reach.contains("A") && reach.contains("B");
        let covers_right = reach.contains("C") && reach.contains("D");
        assert!(covers_left || covers_right, "root {} spans neither terminal pair", root);
    }
}

#[rstest]
#[case(true)]
#[case(false)]
fn test_repeated_runs_are_identical(#[case] contract: bool) {
    let g = bank();
    let run = || {
        BankSolver::new(&g, ["T1", "T2", "T3"], config(contract))
            .solve()
            .unwrap()
            .iter()
            .map(|(_, sol)| SolutionReport::new(&g, sol).to_json().unwrap())
            .collect::<Vec<_>>()
    };

    let first = run();
    assert!(!first.is_empty());
    for _ in 0..5 {
        assert_eq!(run(), first);
    }
}

#[rstest]
#[case(&["T1", "T2", "T3"], true)]
#[case(&["T1", "T2", "T3"], false)]
#[case(&["T2", "T3"], true)]
#[case(&["Mid", "T2"], false)]
fn test_solutions_are_rooted_acyclic_and_sorted(#[case] terminals: &[&str], #[case] contract: bool) {
    let g = bank();
    let out = BankSolver::new(&g, terminals.iter().copied(), config(contract)).solve().unwrap();
    assert!(!out.is_empty());

    for (subgraph, sol) in &out {
        assert!(is_acyclic(subgraph));
        let roots = root_names(&g, sol);
        assert_eq!(roots.len(), 1);
        let reach = reachable(subgraph, &roots[0]);
        for t in terminals {
            assert!(reach.contains(*t), "{} unreachable from {}", t, roots[0]);
        }
        let subgraph_weight: f64 = subgraph.edges().map(|(_, _, d)| d.weight).sum();
        assert!((subgraph_weight - sol.weight()).abs() < 1e-9);
    }

    for pair in out.windows(2) {
        assert!(pair[0].1.weight() <= pair[1].1.weight());
    }
}

#[test]
fn test_postprocessing_without_contraction_keeps_exact_edges() {
    let g = bank();
    let out = BankSolver::new(&g, ["T1", "T2", "T3"], config(false)).solve().unwrap();

    for (subgraph, sol) in &out {
        let selected: BTreeSet<(String, String, String)> = sol
            .edges()
            .iter()
            .map(|e| {
                assert!(!e.is_contracted());
                (
                    g.node_name(e.source).unwrap().to_string(),
                    g.node_name(e.target).unwrap().to_string(),
                    e.key.clone(),
                )
            })
            .collect();
        assert_eq!(edge_set(subgraph), selected);
    }
}

#[test]
fn test_beam_widths_bound_output() {
    let g = bank();
    let narrow = SolverConfig { top_k_arborescences: 2, top_k_paths_per_node: 1, allow_chain_contraction: true };

    let out = BankSolver::new(&g, ["T1", "T2", "T3"], narrow).solve().unwrap();

    assert!(!out.is_empty() && out.len() <= 2);
}

#[test]
fn test_negative_weight_is_rejected() {
    let g = graph(&[("R", "T", "p", 1.0)]);
    let err = BankSolver::new(&g, ["T"], SolverConfig::default())
        .with_weight_fn(|_, _, _| -1.0)
        .solve()
        .unwrap_err();
    assert!(matches!(err, SolverError::InvalidWeight { .. }));
}
