//! Cadence Timers
//!
//! Human-paced on/off timing for the signals a station plays. Every timer is
//! a small state machine stepped with the current time and a random source;
//! it answers with a [`CadenceEvent`] telling the station what to do with its
//! generators.
//!
//! - **TwoToneCadence**: ringback, busy, reorder and dial tone
//! - **DigitCadence**: DTMF dialing with human gaps between digit groups
//! - **MorseCadence**: CW keying at a given speed with a slightly uneven fist
//! - **SteppedCadence**: fixed multi-tone sequences (exchange error tone)
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::SmallRng, SeedableRng};
//! use tele_cadence::{Cadence, CadenceEvent, TwoToneCadence, TwoToneProfile};
//!
//! let mut rng = SmallRng::seed_from_u64(1);
//! let mut ring = TwoToneCadence::new(TwoToneProfile::RINGBACK);
//! ring.start(true);
//!
//! assert_eq!(ring.step(0, &mut rng), CadenceEvent::TurnOn);
//! assert_eq!(ring.step(1000, &mut rng), CadenceEvent::LeaveOn);
//! assert_eq!(ring.step(2000, &mut rng), CadenceEvent::TurnOff);
//! assert_eq!(ring.step(6000, &mut rng), CadenceEvent::TurnOn);
//! ```

pub mod digits;
pub mod event;
pub mod morse;
pub mod stepped;
pub mod timer;
pub mod timing;
pub mod two_tone;

pub use digits::{DigitCadence, DigitTiming, GROUP_BREAKS};
pub use event::{Cadence, CadenceEvent, CadenceState};
pub use morse::{morse_code, KeyingTiming, MorseCadence};
pub use stepped::{SteppedCadence, ToneStep, ERROR_TONE, QUIET};
pub use timer::CadenceTimer;
pub use timing::DurationRange;
pub use two_tone::{TwoToneCadence, TwoToneProfile};
