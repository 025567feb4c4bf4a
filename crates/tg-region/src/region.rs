//! The `Region` arena.
//!
//! # Data layout
//!
//! ```text
//! cells:  Vec<Cell>                  indexed by CellId (ingestion order)
//! index:  FxHashMap<(x, y), CellId>  sparse coordinate lookup
//! points: Vec<CellId>                ingestion order, resorted by weight
//! edges:  Vec<Edge>                  indexed by EdgeId (creation order)
//! ```
//!
//! A cell exists iff it was ingested.  Track edges are appended to both
//! endpoints' incident lists when created; hop edges (synthetic trips of
//! macro-routes) live in the same arena but are never incident to a cell,
//! so graph searches cannot walk over them.

use rustc_hash::FxHashMap;

use tg_core::{CellId, CoreError, CoreResult, EdgeId, RouteId};

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One ingested grid cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    /// Log-scaled population density.
    pub weight: f64,
    pub is_station: bool,
    /// Incident track edges in creation order.  Only
    /// [`Region::split_edge`] ever removes an entry.
    pub edges: Vec<EdgeId>,
}

// ── Edge ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EdgeKind {
    /// Part of the station graph built by the Edge Builder.
    Track,
    /// Direct station-to-station trip of a macro-route; not in the graph.
    Hop,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge {
    pub from: CellId,
    pub to: CellId,
    /// Squared Euclidean grid distance between the endpoints.
    pub length: f64,
    pub kind: EdgeKind,
    /// Owning route.  Set once by the Route Builder.
    pub route: Option<RouteId>,
    /// Scratch flag used while routes are assembled.
    pub passed: bool,
}

impl Edge {
    /// The endpoint of this edge that is not `cell`.
    #[inline]
    pub fn other_end(&self, cell: CellId) -> CellId {
        if self.to == cell { self.from } else { self.to }
    }

    #[inline]
    pub fn touches(&self, cell: CellId) -> bool {
        self.from == cell || self.to == cell
    }
}

// ── Region ────────────────────────────────────────────────────────────────────

/// Sparse weighted grid plus the edge arena.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    cells:  Vec<Cell>,
    index:  FxHashMap<(u32, u32), CellId>,
    points: Vec<CellId>,
    edges:  Vec<Edge>,
    max_x:  u32,
    max_y:  u32,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Ingestion ─────────────────────────────────────────────────────────

    /// Ingest one cell.  Re-putting an existing coordinate overwrites its
    /// weight and keeps its id.
    pub fn put(&mut self, x: u32, y: u32, weight: f64) -> CellId {
        if let Some(&id) = self.index.get(&(x, y)) {
            self.cells[id.index()].weight = weight;
            return id;
        }
        let id = CellId(self.cells.len() as u32);
        self.cells.push(Cell { x, y, weight, is_station: false, edges: Vec::new() });
        self.index.insert((x, y), id);
        self.points.push(id);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        id
    }

    /// Stable sort of the point list, heaviest first.
    pub fn sort_points_by_weight(&mut self) {
        let cells = &self.cells;
        self.points
            .sort_by(|a, b| cells[b.index()].weight.total_cmp(&cells[a.index()].weight));
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell_at(&self, x: u32, y: u32) -> Option<CellId> {
        self.index.get(&(x, y)).copied()
    }

    /// Point list (ingestion order until [`sort_points_by_weight`](Self::sort_points_by_weight)).
    pub fn points(&self) -> &[CellId] {
        &self.points
    }

    /// Largest observed `(x, y)`.
    pub fn extent(&self) -> (u32, u32) {
        (self.max_x, self.max_y)
    }

    /// Euclidean length of the grid diagonal.
    pub fn diagonal(&self) -> f64 {
        (self.max_x as f64).hypot(self.max_y as f64)
    }

    #[inline]
    pub fn weight(&self, id: CellId) -> f64 {
        self.cells[id.index()].weight
    }

    #[inline]
    pub fn coords(&self, id: CellId) -> (u32, u32) {
        let c = &self.cells[id.index()];
        (c.x, c.y)
    }

    /// Squared Euclidean distance between two cells.
    #[inline]
    pub fn distance2(&self, a: CellId, b: CellId) -> f64 {
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        let dx = ax as f64 - bx as f64;
        let dy = ay as f64 - by as f64;
        dx * dx + dy * dy
    }

    // ── Stations ──────────────────────────────────────────────────────────

    #[inline]
    pub fn is_station(&self, id: CellId) -> bool {
        self.cells[id.index()].is_station
    }

    /// Mark a cell as a station.  Returns `false` if it already was one.
    pub fn mark_station(&mut self, id: CellId) -> bool {
        let cell = &mut self.cells[id.index()];
        let fresh = !cell.is_station;
        cell.is_station = true;
        fresh
    }

    pub fn mark_station_at(&mut self, x: u32, y: u32) -> CoreResult<bool> {
        let id = self.cell_at(x, y).ok_or(CoreError::NoCellAt { x, y })?;
        Ok(self.mark_station(id))
    }

    /// All stations ordered by `(x, y)`.
    pub fn stations(&self) -> Vec<CellId> {
        let mut out: Vec<CellId> = (0..self.cells.len() as u32)
            .map(CellId)
            .filter(|&id| self.is_station(id))
            .collect();
        out.sort_by_key(|&id| self.coords(id));
        out
    }

    pub fn station_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_station).count()
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Ids of all track edges in creation order.
    pub fn track_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind == EdgeKind::Track)
            .map(|(i, _)| EdgeId(i as u32))
    }

    /// Incident track edges of `cell`.
    #[inline]
    pub fn incident(&self, cell: CellId) -> &[EdgeId] {
        &self.cells[cell.index()].edges
    }

    #[inline]
    pub fn degree(&self, cell: CellId) -> usize {
        self.cells[cell.index()].edges.len()
    }

    /// `true` if a track edge already joins `a` and `b`.
    pub fn adjacent(&self, a: CellId, b: CellId) -> bool {
        self.incident(a).iter().any(|&e| self.edge(e).other_end(a) == b)
    }

    /// Add a track edge and record it on both endpoints.
    pub fn add_edge(&mut self, from: CellId, to: CellId) -> EdgeId {
        let id = self.push_edge(from, to, EdgeKind::Track);
        self.cells[from.index()].edges.push(id);
        self.cells[to.index()].edges.push(id);
        id
    }

    /// Reroute track edge `id` (A–B) through `via`.  `id` becomes A–`via`
    /// and the returned new edge is `via`–B, so both keep A → B direction.
    pub fn split_edge(&mut self, id: EdgeId, via: CellId) -> EdgeId {
        let (from, to) = {
            let e = &self.edges[id.index()];
            (e.from, e.to)
        };
        self.cells[to.index()].edges.retain(|&e| e != id);
        let length = self.distance2(from, via);
        let edge = &mut self.edges[id.index()];
        edge.to = via;
        edge.length = length;
        self.cells[via.index()].edges.push(id);
        self.add_edge(via, to)
    }

    /// Add a hop edge.  Hops are not recorded on their endpoints.
    pub fn add_hop(&mut self, from: CellId, to: CellId) -> EdgeId {
        self.push_edge(from, to, EdgeKind::Hop)
    }

    fn push_edge(&mut self, from: CellId, to: CellId, kind: EdgeKind) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        let length = self.distance2(from, to);
        self.edges.push(Edge { from, to, length, kind, route: None, passed: false });
        id
    }

    // ── Neighbourhood queries ─────────────────────────────────────────────

    /// Cells within Euclidean `radius` of the integer centre `(xc, yc)`,
    /// excluding the centre itself, with `weight >= min_weight` and, if
    /// `stations_only`, flagged as stations.  Ordered by `(x, y)`.
    pub fn points_in_radius(
        &self,
        xc: i64,
        yc: i64,
        radius: f64,
        min_weight: f64,
        stations_only: bool,
    ) -> Vec<CellId> {
        self.scan_disk(xc as f64, yc as f64, radius)
            .filter(|&id| {
                let c = self.cell(id);
                (c.x as i64, c.y as i64) != (xc, yc)
                    && c.weight >= min_weight
                    && (!stations_only || c.is_station)
            })
            .collect()
    }

    /// Stations within Euclidean `radius` of a real-valued centre.
    pub fn stations_in_disk(&self, cx: f64, cy: f64, radius: f64) -> Vec<CellId> {
        self.scan_disk(cx, cy, radius)
            .filter(|&id| self.is_station(id))
            .collect()
    }

    /// `true` if any station lies within `radius` of `cell` (excluding it).
    pub fn has_station_near(&self, cell: CellId, radius: f64) -> bool {
        let (x, y) = self.coords(cell);
        !self.points_in_radius(x as i64, y as i64, radius, f64::NEG_INFINITY, true).is_empty()
    }

    fn scan_disk(&self, cx: f64, cy: f64, radius: f64) -> impl Iterator<Item = CellId> + '_ {
        let r = radius.max(0.0);
        let r2 = r * r;
        let x_lo = (cx - r).ceil().max(0.0) as i64;
        let x_hi = (cx + r).floor().min(self.max_x as f64) as i64;
        let y_lo = (cy - r).ceil().max(0.0) as i64;
        let y_hi = (cy + r).floor().min(self.max_y as f64) as i64;

        (x_lo..=x_hi).flat_map(move |x| {
            (y_lo..=y_hi).filter_map(move |y| {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                if dx * dx + dy * dy > r2 {
                    return None;
                }
                self.cell_at(x as u32, y as u32)
            })
        })
    }
}
