use std::ops::Range;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("index {index} is out of range for {len} item(s)")]
    OutOfRange { index: usize, len: usize },
}

/// Where an item sits relative to the current one on the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPosition {
    Center,
    Left,
    Right,
    Hidden(isize),
}

impl SlotPosition {
    pub fn css_class(self) -> &'static str {
        match self {
            SlotPosition::Center => "is-center",
            SlotPosition::Left => "is-left",
            SlotPosition::Right => "is-right",
            SlotPosition::Hidden(offset) if offset < 0 => "is-hidden-left",
            SlotPosition::Hidden(_) => "is-hidden-right",
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, SlotPosition::Hidden(_))
    }
}

/// Circular index over a bounded list of items.
///
/// `current_index` is always `< len` when the list is non-empty. An empty
/// carousel accepts every operation as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    current: usize,
    paused: bool,
    direction: Direction,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: 0,
            paused: false,
            direction: Direction::Forward,
        }
    }

    pub fn starting_at(len: usize, index: usize) -> Result<Self, CarouselError> {
        let mut state = Self::new(len);
        state.jump_to(index)?;
        state.direction = Direction::Forward;
        Ok(state)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// `None` when there is nothing to show.
    pub fn current(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.current)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn advance(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.len;
        self.direction = Direction::Forward;
    }

    pub fn retreat(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current = (self.current + self.len - 1) % self.len;
        self.direction = Direction::Backward;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Autoplay step. Returns `false` when paused or empty.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.is_empty() {
            return false;
        }
        self.advance();
        true
    }

    /// Out-of-range indexes are rejected and leave the state untouched.
    pub fn jump_to(&mut self, index: usize) -> Result<(), CarouselError> {
        if index >= self.len {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len,
            });
        }
        if index != self.current {
            self.direction = if index > self.current {
                Direction::Forward
            } else {
                Direction::Backward
            };
        }
        self.current = index;
        Ok(())
    }

    /// Shortest signed distance from the current item to `index`.
    pub fn offset_of(&self, index: usize) -> Option<isize> {
        if index >= self.len {
            return None;
        }
        let forward = (index + self.len - self.current) % self.len;
        let offset = if forward * 2 > self.len {
            forward as isize - self.len as isize
        } else {
            forward as isize
        };
        Some(offset)
    }

    pub fn position_of(&self, index: usize) -> Option<SlotPosition> {
        self.offset_of(index).map(|offset| match offset {
            0 => SlotPosition::Center,
            -1 => SlotPosition::Left,
            1 => SlotPosition::Right,
            other => SlotPosition::Hidden(other),
        })
    }
}

/// Page-at-a-time view over a list, wrapping at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pages: CarouselState,
    page_size: usize,
    total: usize,
}

impl Pagination {
    pub fn new(total: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            pages: CarouselState::new(total.div_ceil(page_size)),
            page_size,
            total,
        }
    }

    pub fn page(&self) -> usize {
        self.pages.current_index()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn next(&mut self) {
        self.pages.advance();
    }

    pub fn prev(&mut self) {
        self.pages.retreat();
    }

    pub fn go_to(&mut self, page: usize) -> Result<(), CarouselError> {
        self.pages.jump_to(page)
    }

    pub fn visible_range(&self) -> Range<usize> {
        if self.pages.is_empty() {
            return 0..0;
        }
        let start = self.page() * self.page_size;
        start..(start + self.page_size).min(self.total)
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;
