//! Random Graph Generation
//!
//! Builders for the two random topologies the sweep driver runs against.
//! Both produce undirected graphs (each edge listed at both endpoints) with a
//! given expected degree.

use rand::Rng;

use crate::gs_interface::{NodeId, SpreadError};
use crate::gs_topology::Topology;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphModel {
    #[default]
    ErdosRenyi,
    GeometricRandom,
}

impl GraphModel {
    pub fn generate<R: Rng + ?Sized>(
        &self,
        node_count: usize,
        average_neighbors: f64,
        rng: &mut R,
    ) -> Result<Topology, SpreadError> {
        match self {
            GraphModel::ErdosRenyi => erdos_renyi(node_count, average_neighbors, rng),
            GraphModel::GeometricRandom => geometric_random(node_count, average_neighbors, rng),
        }
    }
}

fn check_average(average_neighbors: f64) -> Result<(), SpreadError> {
    if average_neighbors.is_nan() || average_neighbors < 0.0 {
        return Err(SpreadError::InvalidParameter {
            name: "average_neighbors",
            value: average_neighbors.to_string(),
            reason: "must be non-negative",
        });
    }
    Ok(())
}

/// G(n, p) with p = average_neighbors / n
///
/// Walks the lower triangle of the adjacency matrix with geometric skips
/// (Batagelj & Brandes), so the cost is linear in nodes plus edges.
pub fn erdos_renyi<R: Rng + ?Sized>(
    node_count: usize,
    average_neighbors: f64,
    rng: &mut R,
) -> Result<Topology, SpreadError> {
    check_average(average_neighbors)?;
    if node_count == 0 {
        return Err(SpreadError::EmptyTopology);
    }

    let p = average_neighbors / node_count as f64;
    if p >= 1.0 {
        return Topology::complete(node_count);
    }

    let mut neighbors: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
    if p <= 0.0 {
        return Topology::new(neighbors);
    }

    let log_q = (-p).ln_1p();
    if log_q >= 0.0 {
        // p below f64 resolution: no edge is ever drawn
        return Topology::new(neighbors);
    }
    // a skip this long runs past the last lower-triangle entry
    let pairs = node_count as f64 * (node_count as f64 - 1.0) / 2.0;

    let mut v: usize = 1;
    let mut w: i64 = -1;
    while v < node_count {
        let log_r = (1.0 - rng.gen::<f64>()).ln();
        let skip = (log_r / log_q).floor();
        if skip >= pairs {
            break;
        }
        w += 1 + skip as i64;
        while w >= v as i64 && v < node_count {
            w -= v as i64;
            v += 1;
        }
        if v < node_count {
            let u = w as NodeId;
            neighbors[v].push(u);
            neighbors[u].push(v);
        }
    }

    Topology::new(neighbors)
}

/// Points uniform in the unit square, linked when within
/// r = sqrt(average_neighbors / (n * pi)) of each other
pub fn geometric_random<R: Rng + ?Sized>(
    node_count: usize,
    average_neighbors: f64,
    rng: &mut R,
) -> Result<Topology, SpreadError> {
    check_average(average_neighbors)?;
    if node_count == 0 {
        return Err(SpreadError::EmptyTopology);
    }

    let positions: Vec<(f64, f64)> = (0..node_count)
        .map(|_| (rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();
    let radius = (average_neighbors / node_count as f64 / std::f64::consts::PI).sqrt();

    let mut neighbors: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
    if radius <= 0.0 {
        return Topology::new(neighbors);
    }

    // bucket points into square cells of side >= radius; every pair within
    // range then sits in the same or an adjacent cell. Cell count is capped
    // near n so sparse grids stay small.
    let max_cells = ((node_count as f64).sqrt().ceil() as usize).max(1);
    let cells = ((1.0 / radius).floor() as usize).clamp(1, max_cells);
    let cell_of = |x: f64| ((x * cells as f64) as usize).min(cells - 1);
    let mut grid: Vec<Vec<NodeId>> = vec![Vec::new(); cells * cells];
    for (node, &(x, y)) in positions.iter().enumerate() {
        grid[cell_of(y) * cells + cell_of(x)].push(node);
    }

    let radius_sq = radius * radius;
    for (node, &(x, y)) in positions.iter().enumerate() {
        let (cx, cy) = (cell_of(x), cell_of(y));
        for gy in cy.saturating_sub(1)..=(cy + 1).min(cells - 1) {
            for gx in cx.saturating_sub(1)..=(cx + 1).min(cells - 1) {
                for &other in &grid[gy * cells + gx] {
                    if other <= node {
                        continue;
                    }
                    let (ox, oy) = positions[other];
                    let (dx, dy) = (x - ox, y - oy);
                    if dx * dx + dy * dy <= radius_sq {
                        neighbors[node].push(other);
                        neighbors[other].push(node);
                    }
                }
            }
        }
    }

    Topology::new(neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_simple_undirected(topology: &Topology) {
        for node in 0..topology.len() {
            let list = topology.neighbors(node);
            assert!(!list.contains(&node), "self-loop at {}", node);
            let mut sorted = list.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), list.len(), "duplicate edge at {}", node);
            for &other in list {
                assert!(topology.neighbors(other).contains(&node));
            }
        }
    }

    #[test]
    fn test_erdos_renyi_average_degree() {
        let mut rng = StdRng::seed_from_u64(1);
        let topology = erdos_renyi(5_000, 10.0, &mut rng).unwrap();

        assert_eq!(topology.len(), 5_000);
        assert_simple_undirected(&topology);
        let average = topology.average_degree();
        assert!((average - 10.0).abs() < 0.5, "average degree {}", average);
    }

    #[test]
    fn test_erdos_renyi_extremes() {
        let mut rng = StdRng::seed_from_u64(2);

        let empty = erdos_renyi(50, 0.0, &mut rng).unwrap();
        assert_eq!(empty.edge_entries(), 0);

        let full = erdos_renyi(20, 40.0, &mut rng).unwrap();
        assert_eq!(full.edge_entries(), 20 * 19);

        assert_eq!(erdos_renyi(0, 5.0, &mut rng).unwrap_err(), SpreadError::EmptyTopology);
        assert!(matches!(
            erdos_renyi(10, -1.0, &mut rng),
            Err(SpreadError::InvalidParameter { name: "average_neighbors", .. })
        ));
    }

    #[test]
    fn test_erdos_renyi_vanishing_edge_probability() {
        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let topology = erdos_renyi(10, 1e-17, &mut rng).unwrap();
            assert_eq!(topology.len(), 10);
            assert_eq!(topology.edge_entries(), 0);

            // p tiny but resolvable: skips overshoot the triangle, still edgeless
            let topology = erdos_renyi(10, 1e-12, &mut rng).unwrap();
            assert_eq!(topology.edge_entries(), 0);
        }
    }

    #[test]
    fn test_geometric_random_average_degree() {
        let mut rng = StdRng::seed_from_u64(3);
        let topology = geometric_random(5_000, 10.0, &mut rng).unwrap();

        assert_eq!(topology.len(), 5_000);
        assert_simple_undirected(&topology);
        // boundary effects pull the mean a little below the target
        let average = topology.average_degree();
        assert!(average > 8.5 && average < 10.5, "average degree {}", average);
    }

    #[test]
    fn test_graph_model_from_yaml() {
        let model: GraphModel = serde_yaml::from_str("geometric_random").unwrap();
        assert_eq!(model, GraphModel::GeometricRandom);

        let mut rng = StdRng::seed_from_u64(4);
        let topology = model.generate(100, 6.0, &mut rng).unwrap();
        assert_eq!(topology.len(), 100);
    }
}
