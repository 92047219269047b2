pub mod axis;
pub mod axis_padding;
pub mod radius;
pub mod series;
pub mod size_config;
pub mod types;

pub use axis::{AxisExtent, AxisKind};
pub use axis_padding::{AxisDim, AxisPaddingOutcome, SizePaddingContributor, pad_axis};
pub use radius::{SeriesRadiusState, compute_radii, compute_radius};
pub use series::BubbleSeries;
pub use size_config::{ResolvedSizeBounds, SizeBy, SizeConfig, SizeValue};
pub use types::{BubblePoint, PlotArea, Viewport};
