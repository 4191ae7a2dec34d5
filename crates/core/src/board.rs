//! Square tile grid shared by generation, tracing, and the session controller.

use serde::Serialize;
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

use crate::connections::tiles_connected;
use crate::types::{Coord, Side, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub coord: Coord,
    pub kind: TileKind,
    pub rotation: u8,
    pub is_powered: bool,
    pub is_locked: bool,
    pub is_firewall: bool,
}

impl Tile {
    fn empty(coord: Coord) -> Self {
        Self {
            coord,
            kind: TileKind::Empty,
            rotation: 0,
            is_powered: false,
            is_locked: false,
            is_firewall: false,
        }
    }

    /// Stable `"{row}-{col}"` identity.
    pub fn id(&self) -> String {
        format!("{}-{}", self.coord.row, self.coord.col)
    }

    pub fn blocks_power(&self) -> bool {
        self.kind == TileKind::Blocker || self.is_firewall
    }

    pub fn connects_toward(&self, neighbor: &Tile, side: Side) -> bool {
        tiles_connected((self.kind, self.rotation), (neighbor.kind, neighbor.rotation), side)
    }

    pub fn view(&self) -> TileView {
        TileView {
            kind: self.kind,
            rotation: self.rotation,
            is_powered: self.is_powered,
            is_locked: self.is_locked,
            is_firewall: self.is_firewall,
        }
    }
}

/// Per-cell fields a renderer is allowed to see.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub kind: TileKind,
    pub rotation: u8,
    pub is_powered: bool,
    pub is_locked: bool,
    pub is_firewall: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RotateError {
    #[error("tile ({}, {}) is outside the grid", .0.row, .0.col)]
    OutOfBounds(Coord),
    #[error("tile ({}, {}) is locked", .0.row, .0.col)]
    Locked(Coord),
    #[error("tile ({}, {}) is a firewall", .0.row, .0.col)]
    Firewall(Coord),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// A `size` x `size` grid of placeholder tiles, each stamped with its own coordinate.
    pub fn empty(size: usize) -> Self {
        let tiles = (0..size * size).map(|index| Tile::empty(Coord::new(index / size, index % size)));
        Self { size, tiles: tiles.collect() }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    fn index_of(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord).then(|| coord.row * self.size + coord.col)
    }

    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        self.index_of(coord).map(|index| &self.tiles[index])
    }

    pub fn tile_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        self.index_of(coord).map(|index| &mut self.tiles[index])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.size.max(1))
    }

    pub fn neighbor(&self, coord: Coord, side: Side) -> Option<Coord> {
        coord.step(side, self.size)
    }

    /// First tile of `kind` in row-major order.
    pub fn find_kind(&self, kind: TileKind) -> Option<Coord> {
        self.tiles.iter().find(|tile| tile.kind == kind).map(|tile| tile.coord)
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }

    pub fn powered_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_powered).count()
    }

    /// Sets kind and rotation in place. Anchors come out locked.
    pub fn place(&mut self, coord: Coord, kind: TileKind, rotation: u8) -> Option<&mut Tile> {
        let tile = self.tile_mut(coord)?;
        tile.kind = kind;
        tile.rotation = rotation % 4;
        tile.is_locked = kind.is_anchor();
        Some(tile)
    }

    /// Advances one tile by a quarter turn and returns its new rotation.
    pub fn rotate_tile(&mut self, coord: Coord) -> Result<u8, RotateError> {
        let tile = self.tile_mut(coord).ok_or(RotateError::OutOfBounds(coord))?;
        if tile.is_locked {
            return Err(RotateError::Locked(coord));
        }
        if tile.is_firewall {
            return Err(RotateError::Firewall(coord));
        }
        tile.rotation = (tile.rotation + 1) % 4;
        Ok(tile.rotation)
    }

    pub(crate) fn clear_power(&mut self) {
        for tile in &mut self.tiles {
            tile.is_powered = false;
        }
    }

    pub fn views(&self) -> Vec<TileView> {
        self.tiles.iter().map(Tile::view).collect()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + self.tiles.len() * 3);
        bytes.extend((self.size as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(tile.kind.code());
            bytes.push(tile.rotation);
            bytes.push(
                u8::from(tile.is_powered)
                    | (u8::from(tile.is_locked) << 1)
                    | (u8::from(tile.is_firewall) << 2),
            );
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
