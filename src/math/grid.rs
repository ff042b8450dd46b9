use crate::error::{MeshError, Result};

/// Upper bound on cells per generation pass (2048 x 2048).
pub const MAX_CELLS: u64 = 4_194_304;

/// Relative slack when deciding whether the step divides the span evenly.
const DIVISION_SLACK: f64 = 1e-9;

/// Parameter domain (degrees) and the uniform sampling step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDomain {
    pub u_range: (f64, f64),
    pub v_range: (f64, f64),
    pub step: f64,
}

impl Default for GridDomain {
    fn default() -> Self {
        Self {
            u_range: (0.0, 360.0),
            v_range: (-180.0, 180.0),
            step: 5.0,
        }
    }
}

/// One grid square `[u0, u1] x [v0, v1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub u0: f64,
    pub u1: f64,
    pub v0: f64,
    pub v1: f64,
}

/// Validated cell counts for a domain. Only obtainable through
/// [`GridDomain::layout`], so holding one means the grid is well formed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    domain: GridDomain,
    cells_u: usize,
    cells_v: usize,
}

impl GridDomain {
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_u_range(mut self, min: f64, max: f64) -> Self {
        self.u_range = (min, max);
        self
    }

    pub fn with_v_range(mut self, min: f64, max: f64) -> Self {
        self.v_range = (min, max);
        self
    }

    /// Checks step and bounds, and sizes the grid.
    ///
    /// The step is rejected first, before anything else is looked at.
    pub fn layout(&self) -> Result<GridLayout> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(MeshError::InvalidStep(self.step));
        }
        check_range("u", self.u_range)?;
        check_range("v", self.v_range)?;

        let cells_u = cells_along(self.u_range, self.step);
        let cells_v = cells_along(self.v_range, self.step);
        let total = cells_u * cells_v;
        if total > MAX_CELLS as f64 {
            return Err(MeshError::TooManyCells {
                cells: total.min(u64::MAX as f64) as u64,
                limit: MAX_CELLS,
            });
        }

        Ok(GridLayout {
            domain: *self,
            cells_u: cells_u as usize,
            cells_v: cells_v as usize,
        })
    }
}

fn check_range(axis: &'static str, (min, max): (f64, f64)) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return Err(MeshError::InvalidDomain { axis, min, max });
    }
    Ok(())
}

fn cells_along((min, max): (f64, f64), step: f64) -> f64 {
    let ratio = (max - min) / step;
    (ratio * (1.0 - DIVISION_SLACK)).ceil().max(1.0)
}

impl GridLayout {
    pub fn domain(&self) -> &GridDomain {
        &self.domain
    }

    pub fn cells_u(&self) -> usize {
        self.cells_u
    }

    pub fn cells_v(&self) -> usize {
        self.cells_v
    }

    pub fn cell_count(&self) -> usize {
        self.cells_u * self.cells_v
    }

    fn edge((min, max): (f64, f64), index: usize, count: usize, step: f64) -> f64 {
        if index >= count {
            max
        } else {
            (min + index as f64 * step).min(max)
        }
    }

    /// Cell at column `i` (along u) and row `j` (along v). The last cell on
    /// each axis is clamped to the domain maximum.
    pub fn cell(&self, i: usize, j: usize) -> Cell {
        let GridDomain {
            u_range,
            v_range,
            step,
        } = self.domain;
        Cell {
            u0: Self::edge(u_range, i, self.cells_u, step),
            u1: Self::edge(u_range, i + 1, self.cells_u, step),
            v0: Self::edge(v_range, j, self.cells_v, step),
            v1: Self::edge(v_range, j + 1, self.cells_v, step),
        }
    }

    /// All cells, rows of constant `v` outermost and `u` varying fastest.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cells_v).flat_map(move |j| (0..self.cells_u).map(move |i| self.cell(i, j)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_grid_is_72_by_72() {
        let layout = GridDomain::default().layout().unwrap();
        assert_eq!(layout.cells_u(), 72);
        assert_eq!(layout.cells_v(), 72);
        assert_eq!(layout.cell_count(), 5184);
    }

    #[test]
    fn coarse_grid_is_4_by_4() {
        let layout = GridDomain::default().with_step(90.0).layout().unwrap();
        assert_eq!((layout.cells_u(), layout.cells_v()), (4, 4));
    }

    #[test]
    fn rejects_non_positive_step() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = GridDomain::default().with_step(step).layout().unwrap_err();
            assert!(matches!(err, MeshError::InvalidStep(_)), "step {step}");
        }
    }

    #[test]
    fn rejects_inverted_domain() {
        let err = GridDomain::default().with_v_range(10.0, -10.0).layout().unwrap_err();
        assert_eq!(
            err,
            MeshError::InvalidDomain {
                axis: "v",
                min: 10.0,
                max: -10.0
            }
        );
    }

    #[test]
    fn rejects_oversized_grid() {
        let err = GridDomain::default().with_step(1e-6).layout().unwrap_err();
        assert!(matches!(err, MeshError::TooManyCells { .. }));
    }

    #[test]
    fn uneven_step_clamps_last_cell() {
        let layout = GridDomain::default()
            .with_u_range(0.0, 10.0)
            .with_v_range(0.0, 3.0)
            .with_step(4.0)
            .layout()
            .unwrap();
        assert_eq!((layout.cells_u(), layout.cells_v()), (3, 1));

        let last = layout.cell(2, 0);
        assert_eq!(last.u0, 8.0);
        assert_eq!(last.u1, 10.0);
        assert_eq!(last.v0, 0.0);
        assert_eq!(last.v1, 3.0);
    }

    #[test]
    fn cells_iterate_u_fastest() {
        let layout = GridDomain::default().with_step(90.0).layout().unwrap();
        let cells: Vec<Cell> = layout.cells().collect();
        assert_eq!(cells.len(), 16);
        assert_eq!((cells[0].u0, cells[0].v0), (0.0, -180.0));
        assert_eq!((cells[1].u0, cells[1].v0), (90.0, -180.0));
        assert_eq!((cells[4].u0, cells[4].v0), (0.0, -90.0));
        assert_eq!((cells[15].u1, cells[15].v1), (360.0, 180.0));
    }
}
