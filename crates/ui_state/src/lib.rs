//! Component-scoped UI state: carousels, accordions, forms and the document
//! viewer. Each state object is owned by whoever renders it and is dropped
//! with it; nothing here is a process-wide singleton.

pub mod accordion;
pub mod autoplay;
pub mod carousel;
pub mod form;
pub mod gesture;
pub mod viewer;

pub use accordion::AccordionState;
pub use autoplay::{CarouselDriver, DriverPhase, DEFAULT_AUTOPLAY_INTERVAL};
pub use carousel::{CarouselError, CarouselState, Direction, Pagination, SlotPosition};
pub use form::{FieldRule, FieldSpec, FormSnapshot, FormState, INVALID_FORMAT, REQUIRED};
pub use gesture::{SwipeOutcome, SwipeTracker, MIN_SWIPE_DISTANCE};
pub use viewer::{DocumentFallback, DocumentViewer, LoadStatus, Zoom};
