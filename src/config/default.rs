//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Movable Dashboard Configuration
#
# Every value below is the built-in default. Delete a section to fall back
# to it. Edits made in the dashboard are not written back to this file.

[tui]
# Event-loop tick, e.g. "100ms", "1s".
tick_rate = "250ms"
# error | warn | info | debug | trace. MDASH_LOG overrides this.
log_level = "info"
# Log file while the dashboard is open. Empty disables logging there.
log_file = ""
# Where new charts go: "bottom" or "first-available-row".
placement = "bottom"
# Terminal rows per grid row.
row_height = 4

# Minimum terminal width (columns) per breakpoint. Omitted keys keep the
# built-ins: lg = 120, md = 100, sm = 77, xs = 48, xxs = 0.
[grid.breakpoints]

# Grid columns per breakpoint. Built-ins: lg = 12, md = 10, sm = 6, xs = 4,
# xxs = 2.
[grid.columns]

# ---------------------------------------------------------------------------
# Static cards. body.kind is "text" (lines), "list" (items, ordered) or
# "actions" (labels).
# ---------------------------------------------------------------------------

[[cards]]
id = "a"
title = "Sales Overview"
body = { kind = "text", lines = ["Total Sales: $10,000", "[View Details]"] }

[[cards]]
id = "b"
title = "User Activity"
body = { kind = "text", lines = ["Active Users: 1,234", "[View Report]"] }

[[cards]]
id = "c"
title = "Recent Orders"
body = { kind = "list", ordered = false, items = ["Order #1234", "Order #5678"] }

[[cards]]
id = "d"
title = "Top Products"
body = { kind = "list", ordered = true, items = ["Product A", "Product B", "Product C"] }

[[cards]]
id = "e"
title = "Quick Actions"
body = { kind = "actions", labels = ["Add Product", "Generate Report"] }

# ---------------------------------------------------------------------------
# Charts. type is "bar", "line" or "pie". An empty title becomes
# "<Source> <Type> Chart".
# ---------------------------------------------------------------------------

[[charts]]
id = "f"
type = "bar"
data_source = "sales"
title = "Sales and Profit"
axis_titles = { x = "Month", y = "Sales" }
points = [
    { x = "Jan", y = "4000" },
    { x = "Feb", y = "3000" },
    { x = "Mar", y = "5000" },
    { x = "Apr", y = "4500" },
]

[[charts]]
id = "g"
type = "line"
data_source = "customers"
title = "Customer Trends"
axis_titles = { x = "Month", y = "Customers" }
points = [
    { x = "Jan", y = "120" },
    { x = "Feb", y = "180" },
    { x = "Mar", y = "160" },
    { x = "Apr", y = "240" },
]

[[charts]]
id = "h"
type = "pie"
data_source = "products"
title = "Product Distribution"
axis_titles = { x = "", y = "" }
points = [
    { x = "Product A", y = "45" },
    { x = "Product B", y = "30" },
    { x = "Product C", y = "25" },
]

# ---------------------------------------------------------------------------
# Layouts per breakpoint, in grid units. Breakpoints without a layout are
# derived from the nearest wider one.
# ---------------------------------------------------------------------------

[layout]
lg = [
    { id = "a", x = 0, y = 0, w = 6, h = 2 },
    { id = "b", x = 6, y = 0, w = 6, h = 2 },
    { id = "c", x = 0, y = 2, w = 4, h = 2 },
    { id = "d", x = 4, y = 2, w = 4, h = 2 },
    { id = "e", x = 8, y = 2, w = 4, h = 2 },
    { id = "f", x = 0, y = 4, w = 6, h = 3 },
    { id = "g", x = 6, y = 4, w = 6, h = 3 },
    { id = "h", x = 0, y = 7, w = 6, h = 3 },
]
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// See [`create_default_config_at`].
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Writes the default template to `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

/// Writes the template, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_err)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
