// state local to the tui: where the cursor is. the grid size is synced
// from DisplayState every frame so the cursor never leaves the grid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TuiState {
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub rows: usize,
    pub steps: usize,
}

impl TuiState {
    pub fn sync(&mut self, rows: usize, steps: usize) {
        self.rows = rows;
        self.steps = steps;
        self.cursor_row = self.cursor_row.min(rows.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(steps.saturating_sub(1));
    }

    // wraps around the edges
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        if self.rows == 0 || self.steps == 0 {
            return;
        }
        self.cursor_row = wrap(self.cursor_row, d_row, self.rows);
        self.cursor_col = wrap(self.cursor_col, d_col, self.steps);
    }
}

fn wrap(pos: usize, delta: isize, len: usize) -> usize {
    (pos as isize + delta).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_and_follows_resizes() {
        let mut ts = TuiState::default();
        ts.sync(6, 16);
        ts.move_cursor(-1, -1);
        assert_eq!((ts.cursor_row, ts.cursor_col), (5, 15));
        ts.sync(6, 8);
        assert_eq!(ts.cursor_col, 7);
        ts.move_cursor(0, 1);
        assert_eq!(ts.cursor_col, 0);
    }
}
