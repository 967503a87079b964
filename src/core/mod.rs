pub mod choreography;
pub mod completion;
pub mod dataset;
pub mod entity_state;
pub mod labels;
pub mod primitives;
pub mod ranking;
pub mod scheduler;
pub mod types;

pub use choreography::{
    ChoreographyMode, ChoreographyPolicy, ChoreographyTiming, EffectiveTime, GrowthWindow,
    StepPlan,
};
pub use completion::CompletionDetector;
pub use dataset::{DatasetRow, Entity, StepColumn, TimeSeriesDataset};
pub use entity_state::EntityAnimationState;
pub use labels::{
    EstimatedTextMeasurer, LabelFormat, LabelGenerator, TextMeasurer, ValueLabel,
    estimate_text_width_px, parse_value_label,
};
pub use primitives::{
    MONTH_STEP_LABEL_FORMAT, decimal_to_f64, lerp_exact, step_labels_from_dates, window_progress,
};
pub use ranking::{RankedEntity, RankingPolicy, SlotLayout};
pub use scheduler::{
    FrameScheduler, ScheduleState, SchedulerPhase, SchedulerSettings, TickReport,
};
pub use types::{EntityId, Geometry, Viewport};
