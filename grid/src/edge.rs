use crate::ids::{EdgeId, TileId, VertexId};
use geometry::{Edge, Point};

// EdgeSide is the tile on one side of a grid edge, with the index of the edge within that tile
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EdgeSide {
    pub tile: TileId,
    pub edge_index: usize,
}

// GridEdge joins two grid vertices. Vertex a has the smaller point key.
// Side a is the tile traversing a -> b, side b the tile traversing b -> a.
#[derive(Clone, Debug)]
pub struct GridEdge {
    pub id: EdgeId,
    pub a: VertexId,
    pub b: VertexId,
    pub point_a: Point,
    pub point_b: Point,
    pub side_a: Option<EdgeSide>,
    pub side_b: Option<EdgeSide>,
}

impl GridEdge {
    pub(crate) fn new(id: EdgeId, (a, point_a): (VertexId, Point), (b, point_b): (VertexId, Point)) -> GridEdge {
        GridEdge { id, a, b, point_a, point_b, side_a: None, side_b: None }
    }

    pub fn tile_a(&self) -> Option<TileId> {
        self.side_a.map(|side| side.tile)
    }

    pub fn tile_b(&self) -> Option<TileId> {
        self.side_b.map(|side| side.tile)
    }

    pub fn tiles(&self) -> impl Iterator<Item = TileId> {
        self.tile_a().into_iter().chain(self.tile_b())
    }

    pub fn edge(&self) -> Edge {
        Edge(self.point_a, self.point_b)
    }

    pub fn midpoint(&self) -> Point {
        self.point_a.midpoint(&self.point_b)
    }

    // is_frontier checks whether exactly one side of the edge has a tile
    pub fn is_frontier(&self) -> bool {
        self.side_a.is_some() != self.side_b.is_some()
    }

    pub fn is_unused(&self) -> bool {
        self.side_a.is_none() && self.side_b.is_none()
    }

    // side_of returns the side of the given tile, if the tile borders the edge
    pub fn side_of(&self, tile: TileId) -> Option<EdgeSide> {
        self.side_a.filter(|side| side.tile == tile).or_else(|| self.side_b.filter(|side| side.tile == tile))
    }

    // opposite_side returns the side facing the given tile
    pub fn opposite_side(&self, tile: TileId) -> Option<EdgeSide> {
        match (self.side_a, self.side_b) {
            (Some(side), other) if side.tile == tile => other,
            (other, Some(side)) if side.tile == tile => other,
            _ => None,
        }
    }

    // open_edge returns the edge as a new tile on the empty side would traverse it,
    // or None unless the edge is on the frontier
    pub fn open_edge(&self) -> Option<Edge> {
        match (self.side_a, self.side_b) {
            (Some(_), None) => Some(self.edge().reversed()),
            (None, Some(_)) => Some(self.edge()),
            _ => None,
        }
    }
}
