#[cfg(test)]
mod tests {
    use crate::algorithms::centrality::{BetweennessCentrality, ClosenessCentrality};
    use crate::algorithms::coloring::{is_proper_coloring, GreedyColoring, OrderStrategy};
    use crate::algorithms::components::{ConnectedComponents, StronglyConnectedComponents};
    use crate::algorithms::metrics::{Diameter, DiameterMode, NetworkMetrics};
    use crate::algorithms::pathfinding::ShortestPath;
    use crate::algorithms::spanning_tree::MinimumSpanningForest;
    use crate::error::GraphError;
    use crate::graph::{MailGraph, UndirectedView};

    /// A -> B (w1), A -> C (w4), B -> C (w2), C -> D (w1), D -> E (w1).
    fn create_test_graph() -> MailGraph {
        let mut graph = MailGraph::new();
        graph.add_edge("A", "B", 1, None).unwrap();
        graph.add_edge("A", "C", 4, None).unwrap();
        graph.add_edge("B", "C", 2, None).unwrap();
        graph.add_edge("C", "D", 1, None).unwrap();
        graph.add_edge("D", "E", 1, None).unwrap();
        graph
    }

    /// Two components of three nodes each.
    fn create_disconnected_graph() -> MailGraph {
        let mut graph = MailGraph::new();
        graph.add_edge("A", "B", 1, None).unwrap();
        graph.add_edge("B", "C", 1, None).unwrap();
        graph.add_edge("X", "Y", 1, None).unwrap();
        graph.add_edge("Y", "Z", 1, None).unwrap();
        graph
    }

    #[test]
    fn test_shortest_path_same_node() {
        let graph = create_test_graph();
        let result = ShortestPath.shortest_path(&graph, "A", "A").unwrap();
        assert_eq!(result.path, Some(vec!["A".to_string()]));
        assert_eq!(result.cost, Some(0.0));
        assert_eq!(result.hops, 0);
    }

    #[test]
    fn test_shortest_path_prefers_high_traffic() {
        let graph = create_test_graph();
        // A->C direct costs 1/4; A->B->C costs 1 + 1/2.
        let result = ShortestPath.shortest_path(&graph, "A", "D").unwrap();
        assert_eq!(
            result.path,
            Some(vec!["A".to_string(), "C".to_string(), "D".to_string()])
        );
        assert_eq!(result.cost, Some(0.25 + 1.0));
        assert_eq!(result.hops, 2);
    }

    #[test]
    fn test_shortest_path_unreachable_is_a_valid_outcome() {
        let graph = create_disconnected_graph();
        let result = ShortestPath.shortest_path(&graph, "A", "Z").unwrap();
        assert!(result.path.is_none());
        assert!(result.cost.is_none());
        assert!(!result.is_reachable());
    }

    #[test]
    fn test_shortest_path_respects_direction() {
        let graph = create_test_graph();
        // Edges all point away from A; E cannot reach A.
        let result = ShortestPath.shortest_path(&graph, "E", "A").unwrap();
        assert!(result.path.is_none());
    }

    #[test]
    fn test_shortest_path_unknown_node() {
        let graph = create_test_graph();
        assert!(matches!(
            ShortestPath.shortest_path(&graph, "A", "missing"),
            Err(GraphError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_paths_from_source() {
        let graph = create_test_graph();
        let results = ShortestPath.paths_from(&graph, "A").unwrap();
        let targets: Vec<&str> = results.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["B", "C", "D", "E"]);
        assert!(results.iter().all(|r| r.is_reachable()));
    }

    #[test]
    fn test_path_metadata() {
        let graph = create_test_graph();
        let meta = ShortestPath
            .path_metadata(&graph, &["A".into(), "C".into(), "D".into()])
            .unwrap();
        assert_eq!(meta.hop_count, 2);
        assert_eq!(meta.edge_weights, vec![4, 1]);
        assert_eq!(meta.total_weight, 5);
        assert_eq!(meta.average_weight, 2.5);
    }

    #[test]
    fn test_spanning_forest_selects_v_minus_c_edges() {
        let connected = create_test_graph();
        let forest = MinimumSpanningForest.compute(&connected).unwrap();
        assert_eq!(forest.edges.len(), 5 - 1);
        assert_eq!(forest.component_count, 1);

        let disconnected = create_disconnected_graph();
        let forest = MinimumSpanningForest.compute(&disconnected).unwrap();
        assert_eq!(forest.edges.len(), 6 - 2);
        assert_eq!(forest.component_count, 2);
    }

    #[test]
    fn test_spanning_forest_prefers_heavy_edges() {
        let mut graph = MailGraph::new();
        // Triangle: two heavy links and one light one.
        graph.add_edge("A", "B", 5, None).unwrap();
        graph.add_edge("B", "C", 5, None).unwrap();
        graph.add_edge("C", "A", 1, None).unwrap();

        let forest = MinimumSpanningForest.compute(&graph).unwrap();
        assert_eq!(forest.edges.len(), 2);
        assert!(forest.edges.iter().all(|edge| edge.weight == 5));
        assert_eq!(forest.total_weight, 10);
        assert_eq!(forest.average_edge_weight, 5.0);
    }

    #[test]
    fn test_spanning_forest_empty_graph() {
        let graph = MailGraph::new();
        assert!(matches!(
            MinimumSpanningForest.compute(&graph),
            Err(GraphError::EmptyGraph)
        ));
    }

    #[test]
    fn test_betweenness_star_center() {
        let mut graph = MailGraph::new();
        graph.add_edge("hub", "l1", 1, None).unwrap();
        graph.add_edge("hub", "l2", 1, None).unwrap();
        graph.add_edge("hub", "l3", 1, None).unwrap();

        let scores = BetweennessCentrality.compute(&graph).unwrap();
        let hub = scores.iter().find(|s| s.node == "hub").unwrap();
        assert!((hub.score - 1.0).abs() < 1e-9);
        for leaf in scores.iter().filter(|s| s.node != "hub") {
            assert_eq!(leaf.score, 0.0);
        }
    }

    #[test]
    fn test_betweenness_path_graph() {
        let mut graph = MailGraph::new();
        graph.add_edge("a", "b", 1, None).unwrap();
        graph.add_edge("b", "c", 1, None).unwrap();
        graph.add_edge("c", "d", 1, None).unwrap();

        let scores = BetweennessCentrality.compute(&graph).unwrap();
        let by_node = |id: &str| scores.iter().find(|s| s.node == id).unwrap().score;
        // b and c each sit on two of the three intermediary-bearing pairs.
        assert!((by_node("b") - 2.0 / 3.0).abs() < 1e-9);
        assert!((by_node("c") - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(by_node("a"), 0.0);
        assert_eq!(by_node("d"), 0.0);
    }

    /// Brute-force cross-check on a small weighted graph: enumerate all
    /// simple paths per pair, keep the cheapest, and count intermediates.
    #[test]
    fn test_betweenness_matches_brute_force() {
        let graph = create_test_graph();
        let n = graph.node_count();
        let view = UndirectedView::build(&graph);

        let mut expected = vec![0.0f64; n];
        for s in 0..n {
            for t in (s + 1)..n {
                let mut best = f64::INFINITY;
                let mut shortest: Vec<Vec<usize>> = Vec::new();
                let mut stack = vec![(s, vec![s], 0.0)];
                while let Some((node, path, cost)) = stack.pop() {
                    if cost > best + 1e-12 {
                        continue;
                    }
                    if node == t {
                        if cost + 1e-12 < best {
                            best = cost;
                            shortest.clear();
                        }
                        if (cost - best).abs() <= 1e-12 {
                            shortest.push(path);
                        }
                        continue;
                    }
                    for &(next, weight) in view.neighbors(node) {
                        if !path.contains(&next) {
                            let mut extended = path.clone();
                            extended.push(next);
                            stack.push((next, extended, cost + 1.0 / weight as f64));
                        }
                    }
                }
                let sigma = shortest.len() as f64;
                for path in &shortest {
                    for &via in &path[1..path.len() - 1] {
                        expected[via] += 1.0 / sigma;
                    }
                }
            }
        }
        let normalization = (n - 1) as f64 * (n - 2) as f64 / 2.0;
        for value in &mut expected {
            *value /= normalization;
        }

        let scores = BetweennessCentrality.compute(&graph).unwrap();
        for (index, score) in scores.iter().enumerate() {
            assert!(
                (score.score - expected[index]).abs() < 1e-9,
                "betweenness mismatch for {}: {} vs {}",
                score.node,
                score.score,
                expected[index]
            );
        }
    }

    #[test]
    fn test_closeness_zero_iff_isolated() {
        let mut graph = MailGraph::new();
        graph.add_edge("a", "b", 1, None).unwrap();
        // Receive-only node: still connected in the undirected projection.
        graph.add_edge("c", "b", 1, None).unwrap();
        // Self-loop only: isolated.
        graph.add_edge("loner", "loner", 3, None).unwrap();

        let scores = ClosenessCentrality.compute(&graph).unwrap();
        for score in &scores {
            if score.node == "loner" {
                assert_eq!(score.score, 0.0);
            } else {
                assert!(score.score > 0.0, "{} should be reachable", score.node);
            }
        }
    }

    #[test]
    fn test_closeness_two_node_value() {
        let mut graph = MailGraph::new();
        graph.add_edge("a", "b", 5, None).unwrap();
        let scores = ClosenessCentrality.compute(&graph).unwrap();
        // One reachable node at cost 1/5: closeness = 1 / 0.2.
        for score in &scores {
            assert!((score.score - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_closeness_single_node() {
        let mut graph = MailGraph::new();
        graph.add_edge("only", "only", 1, None).unwrap();
        let scores = ClosenessCentrality.compute(&graph).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 0.0);
    }

    #[test]
    fn test_connected_components_partition() {
        let graph = create_disconnected_graph();
        let result = ConnectedComponents.compute(&graph).unwrap();
        assert_eq!(result.component_count(), 2);

        let sizes: Vec<usize> = result.components.iter().map(|c| c.size).collect();
        assert_eq!(sizes, vec![3, 3]);

        // Exhaustive and disjoint.
        let mut members: Vec<&String> = result
            .components
            .iter()
            .flat_map(|c| c.members.iter())
            .collect();
        assert_eq!(members.len(), graph.node_count());
        members.sort();
        members.dedup();
        assert_eq!(members.len(), graph.node_count());
    }

    #[test]
    fn test_singleton_component() {
        let mut graph = MailGraph::new();
        graph.add_edge("a", "b", 1, None).unwrap();
        graph.add_edge("loner", "loner", 1, None).unwrap();
        let result = ConnectedComponents.compute(&graph).unwrap();
        assert_eq!(result.component_count(), 2);
        assert_eq!(result.largest().unwrap().size, 2);
    }

    #[test]
    fn test_strongly_connected_components() {
        let mut graph = MailGraph::new();
        // a and b reply to each other; c only receives.
        graph.add_edge("a", "b", 1, None).unwrap();
        graph.add_edge("b", "a", 1, None).unwrap();
        graph.add_edge("b", "c", 1, None).unwrap();

        let weak = ConnectedComponents.compute(&graph).unwrap();
        assert_eq!(weak.component_count(), 1);

        let strong = StronglyConnectedComponents.compute(&graph).unwrap();
        assert_eq!(strong.component_count(), 2);
        let mutual = strong
            .components
            .iter()
            .find(|c| c.members.contains(&"a".to_string()))
            .unwrap();
        assert_eq!(mutual.size, 2);
        assert!(mutual.members.contains(&"b".to_string()));
    }

    #[test]
    fn test_greedy_coloring_is_proper() {
        for strategy in [
            OrderStrategy::DegreeDescending,
            OrderStrategy::InsertionOrder,
            OrderStrategy::IdentifierAscending,
        ] {
            for graph in [create_test_graph(), create_disconnected_graph()] {
                let result = GreedyColoring.compute(&graph, strategy).unwrap();
                assert!(is_proper_coloring(&graph, &result));
                assert_eq!(result.colors.len(), graph.node_count());
            }
        }
    }

    #[test]
    fn test_coloring_triangle_needs_three_colors() {
        let mut graph = MailGraph::new();
        graph.add_edge("a", "b", 1, None).unwrap();
        graph.add_edge("b", "c", 1, None).unwrap();
        graph.add_edge("c", "a", 1, None).unwrap();

        let result = GreedyColoring
            .compute(&graph, OrderStrategy::DegreeDescending)
            .unwrap();
        assert_eq!(result.color_count, 3);
        assert_eq!(result.distribution().len(), 3);
    }

    #[test]
    fn test_coloring_star_needs_two_colors() {
        let mut graph = MailGraph::new();
        graph.add_edge("hub", "l1", 1, None).unwrap();
        graph.add_edge("hub", "l2", 1, None).unwrap();
        graph.add_edge("hub", "l3", 1, None).unwrap();

        let result = GreedyColoring
            .compute(&graph, OrderStrategy::DegreeDescending)
            .unwrap();
        assert_eq!(result.color_count, 2);
        assert_eq!(result.nodes_with_color(0), vec!["hub"]);
    }

    #[test]
    fn test_density() {
        let graph = create_test_graph();
        // 5 edges of a possible 5 * 4.
        assert_eq!(NetworkMetrics.density(&graph), 5.0 / 20.0);
        assert_eq!(NetworkMetrics.density(&MailGraph::new()), 0.0);
    }

    #[test]
    fn test_diameter_hops_and_cost() {
        let graph = create_test_graph();
        // Longest hop distance in the undirected view: A..E = 3 hops.
        assert_eq!(
            NetworkMetrics.diameter(&graph, DiameterMode::Hops),
            Diameter::Finite(3.0)
        );
        match NetworkMetrics.diameter(&graph, DiameterMode::Cost) {
            Diameter::Finite(value) => assert!(value > 0.0),
            other => panic!("expected finite cost diameter, got {other:?}"),
        }
    }

    #[test]
    fn test_diameter_disconnected_is_explicit() {
        let graph = create_disconnected_graph();
        assert_eq!(
            NetworkMetrics.diameter(&graph, DiameterMode::Hops),
            Diameter::Disconnected
        );
    }

    #[test]
    fn test_diameter_undefined_below_two_nodes() {
        assert_eq!(
            NetworkMetrics.diameter(&MailGraph::new(), DiameterMode::Hops),
            Diameter::Undefined
        );
        let mut graph = MailGraph::new();
        graph.add_edge("only", "only", 1, None).unwrap();
        assert_eq!(
            NetworkMetrics.diameter(&graph, DiameterMode::Hops),
            Diameter::Undefined
        );
    }

    #[test]
    fn test_clustering_triangle() {
        let mut graph = MailGraph::new();
        graph.add_edge("a", "b", 1, None).unwrap();
        graph.add_edge("b", "c", 1, None).unwrap();
        graph.add_edge("c", "a", 1, None).unwrap();

        let scores = NetworkMetrics.local_clustering(&graph);
        assert!(scores.iter().all(|s| s.coefficient == 1.0));
        assert_eq!(NetworkMetrics.average_clustering(&graph), 1.0);
        assert_eq!(NetworkMetrics.triangle_count(&graph), 1);
    }

    #[test]
    fn test_clustering_path_is_zero() {
        let mut graph = MailGraph::new();
        graph.add_edge("a", "b", 1, None).unwrap();
        graph.add_edge("b", "c", 1, None).unwrap();
        assert_eq!(NetworkMetrics.average_clustering(&graph), 0.0);
        assert_eq!(NetworkMetrics.triangle_count(&graph), 0);
    }

    #[test]
    fn test_degree_distribution() {
        let graph = create_test_graph();
        let distribution = NetworkMetrics.degree_distribution(&graph);
        // Out-degrees: A=2, B=1, C=1, D=1, E=0.
        assert_eq!(distribution.out_unweighted.get(&0), Some(&1));
        assert_eq!(distribution.out_unweighted.get(&1), Some(&3));
        assert_eq!(distribution.out_unweighted.get(&2), Some(&1));
        // A sends weight 5 in total.
        assert_eq!(distribution.out_weighted.get(&5), Some(&1));
    }

    #[test]
    fn test_degree_sequence_and_extremes() {
        let graph = create_test_graph();
        assert_eq!(NetworkMetrics.degree_sequence(&graph), vec![2, 1, 1, 1, 0]);
        assert_eq!(
            NetworkMetrics.max_out_degree_node(&graph),
            Some(("A".to_string(), 2))
        );
        assert_eq!(
            NetworkMetrics.max_in_degree_node(&graph),
            Some(("C".to_string(), 2))
        );
    }

    #[test]
    fn test_average_path_length_uses_largest_component() {
        let graph = create_disconnected_graph();
        // Each component is a 3-node path: mean of {1, 1, 2} pairwise hops.
        let average = NetworkMetrics.average_path_length(&graph).unwrap();
        assert!((average - 4.0 / 3.0).abs() < 1e-9);
        assert_eq!(NetworkMetrics.average_path_length(&MailGraph::new()), None);
    }

    /// End-to-end scenario from the design brief: a two-node graph with a
    /// single weighted edge.
    #[test]
    fn test_two_node_graph_end_to_end() {
        let mut graph = MailGraph::new();
        graph.add_edge("a", "b", 5, None).unwrap();

        let forest = MinimumSpanningForest.compute(&graph).unwrap();
        assert_eq!(forest.edges.len(), 1);

        assert_eq!(NetworkMetrics.density(&graph), 0.5);

        let components = ConnectedComponents.compute(&graph).unwrap();
        assert_eq!(components.component_count(), 1);

        let coloring = GreedyColoring
            .compute(&graph, OrderStrategy::DegreeDescending)
            .unwrap();
        // a and b are adjacent, so two colors are forced.
        assert_eq!(coloring.color_count, 2);
    }
}
