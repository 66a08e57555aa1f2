//! Scan configuration.

/// Which tile entities count as ring barrels and as turtles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Exact tile entity id of a barrel.
    pub container_id: String,
    /// Tile entity id prefix of a turtle (`turtle`, `turtleex`, ...).
    pub control_prefix: String,
}

impl ScanConfig {
    pub const DEFAULT_CONTAINER_ID: &'static str = "TileEntityBarrel";
    pub const DEFAULT_CONTROL_PREFIX: &'static str = "turtle";

    #[must_use]
    pub fn is_container(&self, kind: &str) -> bool {
        kind == self.container_id
    }

    #[must_use]
    pub fn is_control(&self, kind: &str) -> bool {
        kind.starts_with(&self.control_prefix)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            container_id: Self::DEFAULT_CONTAINER_ID.to_string(),
            control_prefix: Self::DEFAULT_CONTROL_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matchers() {
        let config = ScanConfig::default();
        assert!(config.is_container("TileEntityBarrel"));
        assert!(!config.is_container("TileEntityBarrelX"));
        assert!(config.is_control("turtle"));
        assert!(config.is_control("turtleex"));
        assert!(!config.is_control("computer"));
    }
}
