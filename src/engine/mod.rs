//! Banner selection engine
//!
//! Flow: [`BannerSelector`] fetches a place's banners from the store, keeps
//! the ones passing [`eligibility`], and lets [`picker`] draw one by weight.
//! After rendering, the caller reports it through [`ImpressionRecorder`];
//! clicks go through [`ClickRecorder`]. Both recorders deactivate a banner on
//! the call that brings a counter up to its cap.
//!
//! All state lives in the [`BannerStore`](crate::storage::BannerStore);
//! time and randomness are injected via [`Clock`] and [`RandomSource`].

pub mod click;
pub mod clock;
pub mod eligibility;
pub mod impression;
pub mod lifecycle;
pub mod picker;
pub mod random;
pub mod selector;

pub use click::{ClickMeta, ClickRecorder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use eligibility::{Ineligible, eligible, is_eligible};
pub use impression::ImpressionRecorder;
pub use lifecycle::CounterUpdate;
pub use picker::pick;
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use selector::BannerSelector;
