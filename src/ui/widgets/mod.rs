// src/ui/widgets/mod.rs

// Widget modules of both pages. Each exposes a `render_*` function that reads
// from `App` and draws into the area it is given.

pub mod archive_view;     // Year/month tree of the vulnerability bulletin.
pub mod footer;           // Key hints for the current screen and mode.
pub mod info_panel;       // The `--info` terminal panels.
pub mod input;            // Search box and category selector.
pub mod log_view;         // Tail of the log file.
pub mod resources_view;   // Categories, featured documents, recent table.
pub mod rules_popup;      // Publication rules and warnings.
pub mod tabs;             // Page switcher.
pub mod viewer_popup;     // Document viewer overlay.
