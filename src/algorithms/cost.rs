//! Node cost model: f = steps taken + straight-line distance to the destination.

use crate::grid::Coordinate;

/// Euclidean distance between two cells.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let rows = f64::from(a.row) - f64::from(b.row);
    let columns = f64::from(a.column) - f64::from(b.column);
    (rows * rows + columns * columns).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Origin,
    Destination,
    Intermediate,
}

/// Index of a node inside one search run's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    pub coordinate: Coordinate,
    pub role: NodeRole,
    pub steps_from_origin: u32,
    pub distance_to_destination: f64,
    pub total_cost: f64,
    pub parent: Option<NodeId>,
}

impl SearchNode {
    pub fn root(origin: Coordinate, destination: Coordinate) -> Self {
        let initial_distance = distance(origin, destination);
        SearchNode {
            coordinate: origin,
            role: NodeRole::Origin,
            steps_from_origin: 0,
            distance_to_destination: initial_distance,
            total_cost: initial_distance,
            parent: None,
        }
    }

    /// Every move costs one step, diagonal or not.
    pub fn child(
        parent_id: NodeId,
        parent: &SearchNode,
        coordinate: Coordinate,
        destination: Coordinate,
    ) -> Self {
        let steps_from_origin = parent.steps_from_origin + 1;
        let distance_to_destination = distance(coordinate, destination);
        let role = if distance_to_destination == 0.0 {
            NodeRole::Destination
        } else {
            NodeRole::Intermediate
        };

        SearchNode {
            coordinate,
            role,
            steps_from_origin,
            distance_to_destination,
            total_cost: f64::from(steps_from_origin) + distance_to_destination,
            parent: Some(parent_id),
        }
    }

    pub fn reached_destination(&self) -> bool {
        self.distance_to_destination == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean_and_symmetric() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(3, 4);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance(b, a), 5.0);
        assert_eq!(distance(b, b), 0.0);
    }

    #[test]
    fn distance_is_never_negative() {
        for row in -3..=3 {
            for column in -3..=3 {
                let d = distance(Coordinate::new(row, column), Coordinate::new(1, -2));
                assert!(d >= 0.0);
            }
        }
    }

    #[test]
    fn root_cost_is_the_heuristic() {
        let root = SearchNode::root(Coordinate::new(0, 0), Coordinate::new(0, 2));
        assert_eq!(root.role, NodeRole::Origin);
        assert_eq!(root.steps_from_origin, 0);
        assert_eq!(root.total_cost, 2.0);
        assert_eq!(root.parent, None);
    }

    #[test]
    fn diagonal_child_costs_one_step() {
        let destination = Coordinate::new(2, 2);
        let root = SearchNode::root(Coordinate::new(0, 0), destination);
        let child = SearchNode::child(NodeId(0), &root, Coordinate::new(1, 1), destination);

        assert_eq!(child.steps_from_origin, 1);
        assert_eq!(child.total_cost, 1.0 + 2f64.sqrt());
        assert_eq!(child.role, NodeRole::Intermediate);
        assert_eq!(child.parent, Some(NodeId(0)));
    }

    #[test]
    fn child_on_destination_is_tagged() {
        let destination = Coordinate::new(0, 1);
        let root = SearchNode::root(Coordinate::new(0, 0), destination);
        let child = SearchNode::child(NodeId(0), &root, destination, destination);
        assert_eq!(child.role, NodeRole::Destination);
        assert!(child.reached_destination());
        assert_eq!(child.total_cost, 1.0);
    }
}
