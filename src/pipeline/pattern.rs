// The pattern store: which sounds fire on which steps.

use crate::error::InvalidGridAccess;
use crate::shared::NUM_SOUNDS;

/// One row of steps per sound, every row exactly `steps` long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    rows: [Vec<bool>; NUM_SOUNDS],
    steps: usize,
}

impl Pattern {
    pub fn new(steps: usize) -> Self {
        let steps = steps.max(1);
        Self {
            rows: std::array::from_fn(|_| vec![false; steps]),
            steps,
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn rows(&self) -> &[Vec<bool>; NUM_SOUNDS] {
        &self.rows
    }

    /// Read a cell; anything outside the grid reads as inactive.
    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), InvalidGridAccess> {
        let (rows, cols) = (NUM_SOUNDS, self.steps);
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(InvalidGridAccess { row, col, rows, cols })?;
        *cell = !*cell;
        Ok(())
    }

    /// Change the width. Steps below the smaller of the two widths keep
    /// their value, new steps start off.
    pub fn resize(&mut self, steps: usize) {
        let steps = steps.max(1);
        for row in &mut self.rows {
            row.resize(steps, false);
        }
        self.steps = steps;
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn checkerboard(steps: usize) -> Pattern {
        let mut p = Pattern::new(steps);
        for row in 0..NUM_SOUNDS {
            for col in 0..steps {
                if (row + col) % 2 == 0 {
                    p.toggle(row, col).unwrap();
                }
            }
        }
        p
    }

    #[test]
    fn new_pattern_is_empty() {
        let p = Pattern::new(16);
        assert_eq!(p.steps(), 16);
        assert!(p.rows().iter().all(|r| r.len() == 16 && r.iter().all(|c| !c)));
    }

    #[test]
    fn toggle_flips_one_cell() {
        let mut p = Pattern::new(8);
        p.toggle(2, 5).unwrap();
        assert!(p.is_active(2, 5));
        assert!(!p.is_active(1, 5));
        assert!(!p.is_active(3, 5));
        p.toggle(2, 5).unwrap();
        assert!(!p.is_active(2, 5));
    }

    #[test]
    fn out_of_bounds_toggle_is_rejected_untouched() {
        let mut p = checkerboard(8);
        let before = p.clone();
        assert_eq!(
            p.toggle(0, 8),
            Err(InvalidGridAccess { row: 0, col: 8, rows: NUM_SOUNDS, cols: 8 })
        );
        assert_eq!(
            p.toggle(NUM_SOUNDS, 0),
            Err(InvalidGridAccess { row: NUM_SOUNDS, col: 0, rows: NUM_SOUNDS, cols: 8 })
        );
        assert_eq!(p, before);
        assert!(!p.is_active(0, 100));
        assert!(!p.is_active(100, 0));
    }

    #[test]
    fn resize_keeps_the_overlapping_prefix() {
        let original = checkerboard(16);
        for (n1, n2, n3) in [(16, 8, 32), (16, 4, 12), (16, 32, 5), (16, 1, 16)] {
            let mut p = original.clone();
            assert_eq!(p.steps(), n1);
            p.resize(n2);
            p.resize(n3);
            assert_eq!(p.steps(), n3);
            let keep = n1.min(n2).min(n3);
            for row in 0..NUM_SOUNDS {
                assert_eq!(p.rows()[row].len(), n3);
                for col in 0..keep {
                    assert_eq!(p.is_active(row, col), original.is_active(row, col), "({row}, {col})");
                }
                // anything that was cut off comes back off
                for col in n1.min(n2)..n3 {
                    assert!(!p.is_active(row, col));
                }
            }
        }
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut p = checkerboard(12);
        p.clear();
        assert_eq!(p, Pattern::new(12));
    }
}
