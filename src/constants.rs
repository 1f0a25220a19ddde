//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and scanner thresholds.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Passive Tree";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "passive-tree";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "PASSIVE_TREE_CONFIG_DIR";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "passive-tree";

/// Largest radius a detected circle is clamped to.
pub const MAX_RADIUS: u32 = 20;

/// Smallest radius a detected circle is clamped to.
pub const MIN_RADIUS: u32 = 5;

/// Contours with a smaller area are isolated pixels, not nodes.
pub const MIN_CONTOUR_AREA: f64 = 2.0;
