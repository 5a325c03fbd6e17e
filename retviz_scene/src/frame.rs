// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::{Mark, MarkId};

/// One complete redraw: the marks that should be on screen.
///
/// A frame fully replaces its predecessor. [`Frame::replace`] discards the
/// previous marks, sorts the new ones into paint order, and rebuilds the id
/// index, so drawing the same frame twice yields the same output and nothing
/// from an earlier draw can leak through.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    view: Rect,
    /// Sorted ascending by `(z_index, id)`.
    marks: Vec<Mark>,
    index: HashMap<MarkId, usize>,
}

impl Frame {
    /// Creates an empty frame covering `view`.
    pub fn new(view: Rect) -> Self {
        Self {
            view,
            marks: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates a frame covering `view` holding `marks`.
    pub fn from_marks(view: Rect, marks: Vec<Mark>) -> Self {
        let mut frame = Self::new(view);
        frame.replace(marks);
        frame
    }

    /// Replaces the frame contents with `marks`.
    ///
    /// Previous marks are discarded entirely. If two marks share an id, the
    /// later one in `marks` wins and the earlier one is dropped.
    pub fn replace(&mut self, marks: Vec<Mark>) {
        self.index.clear();
        self.marks.clear();
        for mark in marks {
            match self.index.get(&mark.id) {
                Some(&slot) => self.marks[slot] = mark,
                None => {
                    self.index.insert(mark.id, self.marks.len());
                    self.marks.push(mark);
                }
            }
        }
        self.marks.sort_by_key(|mark| (mark.z_index, mark.id));
        self.index.clear();
        for (slot, mark) in self.marks.iter().enumerate() {
            self.index.insert(mark.id, slot);
        }
    }

    /// The viewport rectangle this frame was drawn for.
    pub fn view(&self) -> Rect {
        self.view
    }

    /// Marks in paint order (ascending `(z_index, id)`).
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Looks up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.index.get(&id).map(|&slot| &self.marks[slot])
    }

    /// Number of marks in the frame.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether the frame holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
