mod animation;
mod component;
mod health;
mod jitter;
mod model;
mod palette;
mod render;
mod state;
mod surface;
mod types;

pub use component::TopologyCanvas;
pub use health::{HealthSummary, HealthThresholds, summarize};
pub use model::Infrastructure;
pub use palette::node_glyph;
pub use types::{ConnectionMedium, ConnectionStatus, Endpoint, NodeKind, NodeStatus, TopologyNode};
