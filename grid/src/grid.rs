use crate::{
    color::{Color, TileColors},
    edge::{EdgeSide, GridEdge},
    error::GridError,
    ids::{EdgeId, SegmentId, TileId, VertexId},
    tile::{Tile, TileSegment},
    vertex::{Corner, GridVertex},
};
use atlas::{Atlas, Shape};
use common::{wrap_index, EPSILON};
use geometry::{BBox, Point, Polygon, ORIGIN};
use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, trace};
use random::{select_random, Prng};
use std::{collections::HashMap, sync::Arc};

// BUCKET_SIZE is the side length of the cells of the spatial tile index
const BUCKET_SIZE: f64 = 1.;

type PointKey = (i64, i64);

// Placement is a shape and polygon that fits on a frontier edge
#[derive(Clone, Debug)]
pub struct Placement {
    pub shape: Arc<Shape>,
    pub polygon: Polygon,
    // edge_index is the edge of the new tile that lies on the frontier edge
    pub edge_index: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SegmentNeighbors {
    pub prev: SegmentId,
    pub next: SegmentId,
    // across is the segment on the other side of the tile edge, None when no tile is there
    pub across: Option<SegmentId>,
}

impl SegmentNeighbors {
    pub fn iter(&self) -> impl Iterator<Item = SegmentId> {
        [Some(self.prev), Some(self.next), self.across].into_iter().flatten()
    }
}

// Grid owns the tiles, vertices and edges of a tiling. Tiles, vertices and edges live in arenas
// addressed by their ids; removing an item leaves its slot vacant.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    atlas: Option<Arc<Atlas>>,
    tiles: Vec<Option<Tile>>,
    vertices: Vec<Option<GridVertex>>,
    edges: Vec<Option<GridEdge>>,
    vertex_keys: HashMap<PointKey, VertexId>,
    edge_keys: HashMap<(PointKey, PointKey), EdgeId>,
    // frontier holds the edges with a tile on exactly one side, in the order they opened
    frontier: IndexSet<EdgeId>,
    buckets: HashMap<PointKey, Vec<TileId>>,
    tile_count: usize,
    area: f64,
    weighted_centroid: Point,
    bbox: Option<BBox>,
}

impl Grid {
    pub fn new(atlas: Option<Arc<Atlas>>) -> Grid {
        Grid { atlas, ..Default::default() }
    }

    pub fn atlas(&self) -> Option<&Arc<Atlas>> {
        self.atlas.as_ref()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0).and_then(Option::as_ref)
    }

    fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.0).and_then(Option::as_mut)
    }

    // tiles iterates the tiles in placement order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn is_empty(&self) -> bool {
        self.tile_count == 0
    }

    pub fn segment(&self, id: SegmentId) -> Option<&TileSegment> {
        self.tile(id.tile).and_then(|tile| tile.segment(id.index))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&GridVertex> {
        self.vertices.get(id.0).and_then(Option::as_ref)
    }

    fn vertex_mut(&mut self, id: VertexId) -> Option<&mut GridVertex> {
        self.vertices.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &GridVertex> {
        self.vertices.iter().flatten()
    }

    pub fn vertex_at(&self, point: &Point) -> Option<&GridVertex> {
        self.vertex_keys.get(&point.key()).and_then(|id| self.vertex(*id))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&GridEdge> {
        self.edges.get(id.0).and_then(Option::as_ref)
    }

    fn edge_mut(&mut self, id: EdgeId) -> Option<&mut GridEdge> {
        self.edges.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn edges(&self) -> impl Iterator<Item = &GridEdge> {
        self.edges.iter().flatten()
    }

    pub fn edge_between(&self, a: &Point, b: &Point) -> Option<&GridEdge> {
        let (key, _) = edge_key(a, b);
        self.edge_keys.get(&key).and_then(|id| self.edge(*id))
    }

    pub fn frontier(&self) -> &IndexSet<EdgeId> {
        &self.frontier
    }

    pub fn is_frontier(&self, id: EdgeId) -> bool {
        self.frontier.contains(&id)
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn bbox(&self) -> Option<BBox> {
        self.bbox
    }

    // centroid is the area weighted centroid of all tiles
    pub fn centroid(&self) -> Option<Point> {
        if self.tile_count == 0 || self.area <= 0. {
            return None;
        }
        Some(self.weighted_centroid.mul(1. / self.area))
    }

    // add_tile links the tile into the grid. Nothing changes when an edge of the polygon
    // already has a tile on the same side.
    pub fn add_tile(&mut self, shape: Arc<Shape>, polygon: Polygon) -> Result<TileId, GridError> {
        if polygon.size() != shape.size() {
            return Err(GridError::ShapeMismatch {
                shape: shape.name.clone(),
                expected: shape.size(),
                actual: polygon.size(),
            });
        }
        self.check_edges_free(&polygon)?;

        let id = TileId(self.tiles.len());
        let mut tile = Tile::new(id, shape, polygon);
        let n = tile.size();

        let mut vertices = Vec::with_capacity(n);
        for (i, point) in tile.polygon.vertices().iter().enumerate() {
            let vertex_id = self.vertex_or_insert(point);
            let corner = Corner::new(id, &tile.shape, &tile.polygon, i);
            if let Some(vertex) = self.vertex_mut(vertex_id) {
                vertex.corners.add(corner);
            }
            vertices.push(vertex_id);
        }

        let mut edges = Vec::with_capacity(n);
        for (i, edge) in tile.polygon.edges().iter().enumerate() {
            let edge_id = self.edge_or_insert((vertices[i], *edge.a()), (vertices[(i + 1) % n], *edge.b()));
            let side = Some(EdgeSide { tile: id, edge_index: i });
            let frontier = match self.edge_mut(edge_id) {
                Some(grid_edge) => {
                    if grid_edge.a == vertices[i] {
                        grid_edge.side_a = side;
                    } else {
                        grid_edge.side_b = side;
                    }
                    grid_edge.is_frontier()
                }
                None => false,
            };
            if frontier {
                self.frontier.insert(edge_id);
            } else {
                self.frontier.shift_remove(&edge_id);
            }
            edges.push(edge_id);
        }
        tile.vertices = vertices;
        tile.edges = edges;

        let (area, centroid, bbox) = (tile.area(), tile.centroid(), tile.bbox());
        self.area += area;
        self.weighted_centroid = &self.weighted_centroid + &centroid.mul(area);
        self.bbox = Some(self.bbox.map_or(bbox, |other| other.merge(&bbox)));
        for cell in cells(&bbox) {
            self.buckets.entry(cell).or_default().push(id);
        }

        trace!("added {} {} at {}", id, tile.shape.name, centroid);
        self.tiles.push(Some(tile));
        self.tile_count += 1;
        Ok(id)
    }

    // remove_tile unlinks the tile, drops the vertices and edges no other tile uses,
    // and puts the edges it shared with other tiles back on the frontier
    pub fn remove_tile(&mut self, id: TileId) -> Result<Tile, GridError> {
        let tile = self.tiles.get_mut(id.0).and_then(Option::take).ok_or(GridError::UnknownTile(id))?;

        for edge_id in tile.edges.iter() {
            let unused = match self.edge_mut(*edge_id) {
                Some(edge) => {
                    if edge.tile_a() == Some(id) {
                        edge.side_a = None;
                    }
                    if edge.tile_b() == Some(id) {
                        edge.side_b = None;
                    }
                    edge.is_unused()
                }
                None => continue,
            };
            if unused {
                self.frontier.shift_remove(edge_id);
                if let Some(edge) = self.edges.get_mut(edge_id.0).and_then(Option::take) {
                    self.edge_keys.remove(&edge_key(&edge.point_a, &edge.point_b).0);
                }
            } else {
                self.frontier.insert(*edge_id);
            }
        }

        for vertex_id in tile.vertices.iter() {
            let unused = match self.vertex_mut(*vertex_id) {
                Some(vertex) => {
                    vertex.corners.remove_tile(id);
                    vertex.corners.is_empty()
                }
                None => continue,
            };
            if unused {
                if let Some(vertex) = self.vertices.get_mut(vertex_id.0).and_then(Option::take) {
                    self.vertex_keys.remove(&vertex.point.key());
                }
            }
        }

        for cell in cells(&tile.bbox()) {
            if let Some(bucket) = self.buckets.get_mut(&cell) {
                bucket.retain(|other| *other != id);
            }
        }

        self.tile_count -= 1;
        if self.tile_count == 0 {
            self.area = 0.;
            self.weighted_centroid = ORIGIN;
        } else {
            self.area -= tile.area();
            self.weighted_centroid = &self.weighted_centroid - &tile.centroid().mul(tile.area());
        }
        self.bbox = self.tiles().map(Tile::bbox).reduce(|a, b| a.merge(&b));

        debug!("removed {} {}, {} tiles left", id, tile.shape.name, self.tile_count);
        Ok(tile)
    }

    // check_fit checks whether the polygon can be placed: its edges are free on its side,
    // every vertex it touches still matches the atlas, and it overlaps no tile
    pub fn check_fit(&self, shape: &Arc<Shape>, polygon: &Polygon) -> bool {
        if polygon.size() != shape.size() || self.check_edges_free(polygon).is_err() {
            return false;
        }
        if let Some(atlas) = self.atlas.as_ref() {
            let placeholder = TileId(self.tiles.len());
            for (i, point) in polygon.vertices().iter().enumerate() {
                let corner = Corner::new(placeholder, shape, polygon, i);
                let matches = match self.vertex_at(point) {
                    Some(vertex) => atlas.check_match(vertex.corners.with_corner(corner).as_slice()),
                    None => atlas.check_match(std::slice::from_ref(&corner)),
                };
                if !matches {
                    return false;
                }
            }
        }
        !self.overlaps_any(polygon)
    }

    // compute_possibilities lists every atlas shape and unique rotation that fits on the open side
    // of a frontier edge
    pub fn compute_possibilities(&self, id: EdgeId) -> Vec<Placement> {
        let (atlas, edge) = match (self.atlas.as_ref(), self.edge(id).and_then(GridEdge::open_edge)) {
            (Some(atlas), Some(edge)) => (atlas, edge),
            _ => return vec![],
        };
        atlas
            .shapes()
            .iter()
            .flat_map(|shape| shape.unique_rotations.iter().map(move |edge_index| (shape, *edge_index)))
            .map(|(shape, edge_index)| (shape, edge_index, shape.construct_polygon_edge(&edge, edge_index)))
            .filter(|(shape, _, polygon)| self.check_fit(shape, polygon))
            .map(|(shape, edge_index, polygon)| Placement { shape: shape.clone(), polygon, edge_index })
            .collect()
    }

    // add_initial_tile places a random atlas shape at the origin in a random atlas orientation
    pub fn add_initial_tile<R: Prng + ?Sized>(&mut self, rng: &mut R) -> Result<TileId, GridError> {
        let atlas = self.atlas.clone().ok_or(GridError::MissingAtlas)?;
        let shape = select_random(atlas.shapes(), rng.next_f64()).ok_or(GridError::EmptyAtlas)?.clone();
        let angle = select_random(atlas.orientations(), rng.next_f64()).copied().unwrap_or_default();
        let polygon = shape.construct_polygon_ab(&ORIGIN, &Point(angle.cos(), angle.sin()), 0);
        debug!("initial tile {} at {} degrees", shape.name, angle.to_degrees().round());
        self.add_tile(shape, polygon)
    }

    pub fn segment_neighbors(&self, id: SegmentId) -> Option<SegmentNeighbors> {
        let n = self.tile(id.tile)?.size();
        if id.index >= n {
            return None;
        }
        Some(SegmentNeighbors {
            prev: SegmentId::new(id.tile, wrap_index(n, id.index, -1)),
            next: SegmentId::new(id.tile, wrap_index(n, id.index, 1)),
            across: self.segment_across(id),
        })
    }

    // segment_across returns the segment of the neighboring tile that shares the segment's tile edge
    pub fn segment_across(&self, id: SegmentId) -> Option<SegmentId> {
        let edge_id = self.tile(id.tile)?.edges.get(id.index)?;
        self.edge(*edge_id)?.opposite_side(id.tile).map(|side| SegmentId::new(side.tile, side.edge_index))
    }

    // polygon_neighbors returns, for every edge of a polygon that is not in the grid yet,
    // the segment of the tile already on the other side of that edge
    pub fn polygon_neighbors(&self, polygon: &Polygon) -> Vec<Option<SegmentId>> {
        polygon
            .edges()
            .iter()
            .map(|edge| {
                let (key, forward) = edge_key(edge.a(), edge.b());
                let grid_edge = self.edge_keys.get(&key).and_then(|id| self.edge(*id))?;
                let side = if forward { grid_edge.side_b } else { grid_edge.side_a };
                side.map(|side| SegmentId::new(side.tile, side.edge_index))
            })
            .collect()
    }

    // tile_neighbors returns the tiles sharing an edge with the tile, in edge order
    pub fn tile_neighbors(&self, id: TileId) -> Vec<TileId> {
        let tile = match self.tile(id) {
            Some(tile) => tile,
            None => return vec![],
        };
        tile.edges
            .iter()
            .filter_map(|edge_id| self.edge(*edge_id))
            .filter_map(|edge| edge.opposite_side(id))
            .map(|side| side.tile)
            .unique()
            .collect()
    }

    pub fn set_tile_colors(&mut self, id: TileId, colors: &TileColors) -> Result<(), GridError> {
        let tile = self.tile_mut(id).ok_or(GridError::UnknownTile(id))?;
        let colors = colors.resolve(tile.segments.len())?;
        for (segment, color) in tile.segments.iter_mut().zip(colors) {
            segment.color = Some(color);
        }
        Ok(())
    }

    pub fn set_segment_color(&mut self, id: SegmentId, color: Option<Color>) -> Result<(), GridError> {
        let segment = self
            .tile_mut(id.tile)
            .and_then(|tile| tile.segments.get_mut(id.index))
            .ok_or(GridError::UnknownSegment(id))?;
        segment.color = color;
        Ok(())
    }

    pub fn tile_colors(&self, id: TileId) -> Option<Vec<Color>> {
        self.tile(id).and_then(Tile::colors)
    }

    pub fn segment_color(&self, id: SegmentId) -> Option<&Color> {
        self.segment(id).and_then(|segment| segment.color.as_ref())
    }

    pub fn clear_tile_colors(&mut self, id: TileId) -> Result<(), GridError> {
        let tile = self.tile_mut(id).ok_or(GridError::UnknownTile(id))?;
        for segment in tile.segments.iter_mut() {
            segment.color = None;
        }
        Ok(())
    }

    fn check_edges_free(&self, polygon: &Polygon) -> Result<(), GridError> {
        for edge in polygon.edges() {
            let (key, forward) = edge_key(edge.a(), edge.b());
            if let Some(grid_edge) = self.edge_keys.get(&key).and_then(|id| self.edge(*id)) {
                let side = if forward { grid_edge.side_a } else { grid_edge.side_b };
                if side.is_some() {
                    return Err(GridError::EdgeInUse(*edge.a(), *edge.b()));
                }
            }
        }
        Ok(())
    }

    fn overlaps_any(&self, polygon: &Polygon) -> bool {
        cells(&polygon.bbox())
            .filter_map(|cell| self.buckets.get(&cell))
            .flatten()
            .unique()
            .filter_map(|id| self.tile(*id))
            .any(|tile| tile.polygon.overlaps(polygon, EPSILON))
    }

    fn vertex_or_insert(&mut self, point: &Point) -> VertexId {
        let key = point.key();
        if let Some(id) = self.vertex_keys.get(&key) {
            return *id;
        }
        let id = VertexId(self.vertices.len());
        self.vertices.push(Some(GridVertex::new(id, *point)));
        self.vertex_keys.insert(key, id);
        id
    }

    fn edge_or_insert(&mut self, a: (VertexId, Point), b: (VertexId, Point)) -> EdgeId {
        let (key, forward) = edge_key(&a.1, &b.1);
        if let Some(id) = self.edge_keys.get(&key) {
            return *id;
        }
        let id = EdgeId(self.edges.len());
        let edge = if forward { GridEdge::new(id, a, b) } else { GridEdge::new(id, b, a) };
        self.edges.push(Some(edge));
        self.edge_keys.insert(key, id);
        id
    }
}

// edge_key returns the direction invariant key of the edge and whether a -> b follows the key order
fn edge_key(a: &Point, b: &Point) -> ((PointKey, PointKey), bool) {
    let (ka, kb) = (a.key(), b.key());
    if ka <= kb {
        ((ka, kb), true)
    } else {
        ((kb, ka), false)
    }
}

// cells lists the spatial index cells a bounding box covers
fn cells(bbox: &BBox) -> impl Iterator<Item = PointKey> {
    let cell = |value: f64| (value / BUCKET_SIZE).floor() as i64;
    (cell(bbox.min_x)..=cell(bbox.max_x)).cartesian_product(cell(bbox.min_y)..=cell(bbox.max_y))
}
