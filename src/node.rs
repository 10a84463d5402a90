use crate::cell::Cell;

/// Cost bookkeeping for one discovered cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeCost {
    /// Best known cost from the start
    pub g: f64,
    /// Estimated remaining cost to the goal
    pub h: f64,
    /// `g + h`, the expansion priority
    pub f: f64,
    /// Predecessor on the best known path
    pub parent: Option<Cell>,
}

impl NodeCost {
    /// Cost record for the search origin
    pub fn origin(start: Cell, goal: Cell) -> Self {
        let h = start.distance(&goal);
        NodeCost {
            g: 0.0,
            h,
            f: h,
            parent: None,
        }
    }

    /// Record a (better) path to `cell` through `parent` with cost `g`
    pub fn relax(&mut self, cell: Cell, parent: Cell, g: f64, goal: Cell) {
        self.parent = Some(parent);
        self.g = g;
        self.h = cell.distance(&goal);
        self.f = self.g + self.h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let node = NodeCost::origin(Cell::new(0, 0), Cell::new(3, 4));
        assert_eq!(node.g, 0.0);
        assert_eq!(node.h, 5.0);
        assert_eq!(node.f, 5.0);
        assert_eq!(node.parent, None);
    }

    #[test]
    fn test_relax_recomputes_h_and_f() {
        let mut node = NodeCost::default();
        node.relax(Cell::new(1, 1), Cell::new(0, 0), 1.5, Cell::new(1, 4));
        assert_eq!(node.parent, Some(Cell::new(0, 0)));
        assert_eq!(node.h, 3.0);
        assert_eq!(node.f, 4.5);
    }
}
