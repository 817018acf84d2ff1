//! # Toolstrip Engine
//!
//! Framework-agnostic core of the overflow-aware toolbar.
//!
//! ## Modules
//!
//! - **`partition`**: greedy split of an ordered item list into the visible
//!   button row and the collapsed overflow menu.
//! - **`measure`**: the width-measurement state machine that decides which
//!   width the partitioner may trust.
//! - **`capability`**: the explicit render context (`collapsed` flag plus a
//!   close handle) handed to every rendered item.
//!
//! ## Usage
//!
//! ```rust
//! use toolstrip_engine::{LayoutState, Measure, partition};
//!
//! struct Button(&'static str, u16);
//!
//! impl Measure for Button {
//!     fn id(&self) -> &str { self.0 }
//!     fn width(&self) -> u16 { self.1 }
//! }
//!
//! let items = vec![Button("a", 40), Button("b", 40), Button("c", 40)];
//! let mut layout = LayoutState::new(20);
//! layout.sync_ids(items.iter().map(Measure::id));
//! layout.observe_buttons_width(100);
//!
//! let split = partition(&items, layout.available_width(), layout.overflow_trigger_width());
//! assert_eq!(split.visible.len(), 2);
//! assert_eq!(split.collapsed.len(), 1);
//! ```

pub mod capability;
pub mod measure;
pub mod partition;

pub use capability::{CloseHandle, RenderContext};
pub use measure::{LayoutState, MeasurePhase, same_ids};
pub use partition::{Measure, Partition, PartitionIndices, partition, partition_indices, partition_point};
