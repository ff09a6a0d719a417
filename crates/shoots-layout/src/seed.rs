#![forbid(unsafe_code)]

//! The dashboard's starting layout.

use crate::block::BlockSpec;
use crate::config::GridConfig;
use crate::engine::{GridError, GridLayoutEngine};

/// Three 6×4 blocks side by side along the top row of the reference grid.
#[must_use]
pub fn dashboard_blocks() -> Vec<BlockSpec> {
    vec![
        BlockSpec::new(1, 0, 0, 6, 4),
        BlockSpec::new(2, 6, 0, 6, 4),
        BlockSpec::new(3, 12, 0, 6, 4),
    ]
}

impl GridLayoutEngine {
    /// Engine seeded with [`dashboard_blocks`].
    pub fn dashboard(config: GridConfig) -> Result<Self, GridError> {
        Self::new(config, dashboard_blocks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_fits_default_grid() {
        let engine = GridLayoutEngine::dashboard(GridConfig::default()).expect("valid seed");
        assert_eq!(engine.blocks().len(), 3);
        assert_eq!(engine.columns(), 28);
        assert_eq!(engine.validate_layout(), Ok(()));
        assert!(engine.blocks().iter().all(|b| b.label == "6×4 Block"));
    }

    #[test]
    fn dashboard_rejects_too_narrow_reference() {
        let config = GridConfig {
            columns: crate::Responsive::new(7)
                .at(crate::Breakpoint::Md, 14)
                .at(crate::Breakpoint::Lg, 14),
            ..GridConfig::default()
        };
        assert!(matches!(
            GridLayoutEngine::dashboard(config),
            Err(GridError::OutOfBounds { .. })
        ));
    }
}
