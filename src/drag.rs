/// Incremental pointer drag in screen coordinates.
///
/// Each move is measured against the last recorded position, not the press
/// point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    anchor_x: i32,
    anchor_y: i32,
    dragging: bool,
}

impl DragState {
    pub fn press(&mut self, x: i32, y: i32) {
        self.anchor_x = x;
        self.anchor_y = y;
        self.dragging = true;
    }

    /// Returns the delta to move the window by, if a drag is in progress.
    pub fn move_to(&mut self, x: i32, y: i32) -> Option<(i32, i32)> {
        if !self.dragging {
            return None;
        }
        let delta = (x - self.anchor_x, y - self.anchor_y);
        self.anchor_x = x;
        self.anchor_y = y;
        Some(delta)
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn anchor(&self) -> (i32, i32) {
        (self.anchor_x, self.anchor_y)
    }
}
