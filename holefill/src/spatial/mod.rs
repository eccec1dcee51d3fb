//! 2-D k-d tree over integer pixel coordinates.
//!
//! Built once per fill call over the boundary pixels and queried once per
//! hole pixel, either for everything within a radius or for the k closest.


use crate::coord::Coord;

/// A query hit: index into the slice the tree was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub index: usize,
    /// Squared Euclidean distance, exact for integer coordinates.
    pub dist_sq: i64,
}

#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    points: Vec<Coord>,
}

#[derive(Debug, Clone)]
struct KdNode {
    point_idx: usize,
    left: Option<usize>,
    right: Option<usize>,
    axis: Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn of_depth(depth: usize) -> Self {
        if depth % 2 == 0 { Axis::X } else { Axis::Y }
    }

    #[inline]
    fn key(self, c: Coord) -> i32 {
        match self {
            Axis::X => c.x,
            Axis::Y => c.y,
        }
    }
}

impl KdTree {
    /// Builds a balanced tree by median split, `None` for no points.
    pub fn build(points: &[Coord]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut indices: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());
        Self::build_recursive(points, &mut indices, 0, &mut nodes);

        Some(Self {
            nodes,
            points: points.to_vec(),
        })
    }

    fn build_recursive(
        points: &[Coord],
        indices: &mut [usize],
        depth: usize,
        nodes: &mut Vec<KdNode>,
    ) -> Option<usize> {
        if indices.is_empty() {
            return None;
        }

        let axis = Axis::of_depth(depth);
        let median = indices.len() / 2;
        indices.select_nth_unstable_by_key(median, |&i| axis.key(points[i]));

        let node_idx = nodes.len();
        nodes.push(KdNode {
            point_idx: indices[median],
            left: None,
            right: None,
            axis,
        });

        let (left_indices, rest) = indices.split_at_mut(median);
        let right_indices = &mut rest[1..];

        let left = Self::build_recursive(points, left_indices, depth + 1, nodes);
        let right = Self::build_recursive(points, right_indices, depth + 1, nodes);
        nodes[node_idx].left = left;
        nodes[node_idx].right = right;

        Some(node_idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn point(&self, index: usize) -> Coord {
        self.points[index]
    }

    /// The `k` closest points to `query`, nearest first.
    pub fn k_nearest(&self, query: Coord, k: usize) -> Vec<Neighbor> {
        if self.nodes.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut heap = BoundedMaxHeap::new(k);
        self.k_nearest_recursive(0, query, &mut heap);

        let mut result = heap.into_vec();
        result.sort_by_key(|n| (n.dist_sq, n.index));
        result
    }

    fn k_nearest_recursive(&self, node_idx: usize, query: Coord, heap: &mut BoundedMaxHeap) {
        let node = &self.nodes[node_idx];
        let point = self.points[node.point_idx];
        heap.push(Neighbor {
            index: node.point_idx,
            dist_sq: dist_sq(query, point),
        });

        let diff = (node.axis.key(query) - node.axis.key(point)) as i64;
        let (near, far) = if diff < 0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.k_nearest_recursive(near, query, heap);
        }

        // The far side can only help if the splitting plane is closer than
        // the current worst candidate.
        if let Some(far) = far
            && (!heap.is_full() || diff * diff < heap.max_dist_sq())
        {
            self.k_nearest_recursive(far, query, heap);
        }
    }

    /// All points within `radius` of `query` (inclusive), nearest first.
    pub fn radius_search(&self, query: Coord, radius: f32) -> Vec<Neighbor> {
        let mut results = Vec::new();
        self.radius_search_into(query, radius, &mut results);
        results.sort_by_key(|n| (n.dist_sq, n.index));
        results
    }

    /// Unsorted radius search appending into a reusable buffer.
    pub fn radius_search_into(&self, query: Coord, radius: f32, out: &mut Vec<Neighbor>) {
        out.clear();
        if self.nodes.is_empty() || radius < 0.0 {
            return;
        }
        let radius_sq = radius as f64 * radius as f64;
        self.radius_search_recursive(0, query, radius_sq, out);
    }

    fn radius_search_recursive(
        &self,
        node_idx: usize,
        query: Coord,
        radius_sq: f64,
        out: &mut Vec<Neighbor>,
    ) {
        let node = &self.nodes[node_idx];
        let point = self.points[node.point_idx];

        let d = dist_sq(query, point);
        if d as f64 <= radius_sq {
            out.push(Neighbor {
                index: node.point_idx,
                dist_sq: d,
            });
        }

        let diff = (node.axis.key(query) - node.axis.key(point)) as i64;
        let plane_sq = (diff * diff) as f64;

        if let Some(left) = node.left
            && (diff <= 0 || plane_sq <= radius_sq)
        {
            self.radius_search_recursive(left, query, radius_sq, out);
        }
        if let Some(right) = node.right
            && (diff >= 0 || plane_sq <= radius_sq)
        {
            self.radius_search_recursive(right, query, radius_sq, out);
        }
    }
}

#[inline]
fn dist_sq(a: Coord, b: Coord) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

/// Keeps the `capacity` nearest candidates seen so far, farthest at the root.
#[derive(Debug)]
struct BoundedMaxHeap {
    capacity: usize,
    items: Vec<Neighbor>,
}

impl BoundedMaxHeap {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, candidate: Neighbor) {
        if self.items.len() < self.capacity {
            self.items.push(candidate);
            self.sift_up(self.items.len() - 1);
        } else if candidate.dist_sq < self.items[0].dist_sq {
            self.items[0] = candidate;
            self.sift_down(0);
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    #[inline]
    fn max_dist_sq(&self) -> i64 {
        self.items.first().map_or(i64::MAX, |n| n.dist_sq)
    }

    fn into_vec(self) -> Vec<Neighbor> {
        self.items
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.items[idx].dist_sq <= self.items[parent].dist_sq {
                break;
            }
            self.items.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let mut largest = idx;
            for child in [2 * idx + 1, 2 * idx + 2] {
                if child < len && self.items[child].dist_sq > self.items[largest].dist_sq {
                    largest = child;
                }
            }
            if largest == idx {
                break;
            }
            self.items.swap(idx, largest);
            idx = largest;
        }
    }
}
