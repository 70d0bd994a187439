// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Text inventory loader.
//!
//! Reads a whitespace-delimited description of a building into a validated
//! `Inventory`. The format starts with the number of rooms, followed by one
//! record of four tokens per room:
//!
//! ```raw
//! N                               // number of rooms
//! id floor position occupied      // occupied is 0 (vacant) or 1 (occupied)
//! ...                             // N records in total
//! ```
//!
//! Records are token based, so line breaks are only a readability aid.
//! Everything after a `#` up to the end of the line is a comment. Tokens left
//! over after the last record are ignored.
//!
//! The loader accepts any `BufRead`, a raw reader, a file path or a string
//! slice. Structural problems (duplicate ids, two rooms on one spot) surface
//! as `LoaderError::Inventory` with the builder's diagnosis.

use crate::{
    inventory::{Inventory, InventoryBuilder, InventoryError},
    num::Coordinate,
    room::{Room, RoomId},
};
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// Upper bound on the rooms reserved up front from the header count.
/// Larger inventories grow while their records are read.
const MAX_PREALLOCATED_ROOMS: usize = 4096;

/// The error type for the inventory loading process.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended before all announced rooms were read.
    #[error("unexpected end of input while reading the inventory")]
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    #[error("could not parse token '{token}' as type {type_name}")]
    Parse {
        token: String,
        type_name: &'static str,
    },
    /// An occupancy flag other than `0` or `1`.
    #[error("room {id} has occupancy flag '{token}', expected 0 or 1")]
    InvalidOccupancy { id: RoomId, token: String },
    /// The rooms read do not form a valid inventory.
    #[error("invalid inventory: {0}")]
    Inventory(#[from] InventoryError),
}

/// A configurable reader for the text inventory format.
///
/// # Configuration
/// * `ignore_occupancy`: Load every room as vacant, regardless of the flag in
///   the input. The flag is still validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryLoader<T> {
    ignore_occupancy: bool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for InventoryLoader<T> {
    fn default() -> Self {
        Self {
            ignore_occupancy: false,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> InventoryLoader<T>
where
    T: Coordinate + FromStr,
{
    /// Creates a new loader with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether occupancy flags are discarded.
    #[inline]
    pub fn ignore_occupancy(mut self, yes: bool) -> Self {
        self.ignore_occupancy = yes;
        self
    }

    /// Loads an inventory from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Inventory<T>, LoaderError> {
        let mut tokens = Tokens::new(rdr);

        let num_rooms: usize = tokens.parse()?;
        let mut builder = InventoryBuilder::with_capacity(num_rooms.min(MAX_PREALLOCATED_ROOMS));

        for _ in 0..num_rooms {
            let id = RoomId::new(tokens.parse()?);
            let floor: T = tokens.parse()?;
            let position: T = tokens.parse()?;
            let occupied = match tokens.next_token()?.as_str() {
                "0" => false,
                "1" => true,
                other => {
                    return Err(LoaderError::InvalidOccupancy {
                        id,
                        token: other.to_owned(),
                    });
                }
            };

            let occupied = occupied && !self.ignore_occupancy;
            builder.add(Room::new(id, floor, position).with_occupied(occupied));
        }

        Ok(builder.build()?)
    }

    /// Loads an inventory from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Inventory<T>, LoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an inventory from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Inventory<T>, LoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an inventory from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Inventory<T>, LoaderError> {
        self.from_bufread(s.as_bytes())
    }
}

/// Splits a line-oriented reader into whitespace-delimited tokens, dropping `#` comments.
struct Tokens<R> {
    rdr: R,
    line: String,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Result<String, LoaderError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.rdr.read_line(&mut self.line)? == 0 {
                return Err(LoaderError::UnexpectedEof);
            }
            let content = self.line.split('#').next().unwrap_or_default();
            self.pending
                .extend(content.split_whitespace().map(str::to_owned));
        }
        self.pending.pop_front().ok_or(LoaderError::UnexpectedEof)
    }

    fn parse<V: FromStr>(&mut self) -> Result<V, LoaderError> {
        let token = self.next_token()?;
        token.parse::<V>().map_err(|_| LoaderError::Parse {
            token,
            type_name: std::any::type_name::<V>(),
        })
    }
}
