//! Setup-time configuration flow.
//!
//! Runs once per new entry, never on the audio path:
//!
//! ```text
//! SetupInput ──duplicate?──▶ AlreadyConfigured
//!            ──invalid?────▶ Invalid(InvalidInput)
//!            ──probe (GET /v1/models/{id})
//!                 ├─ 401          ──▶ Invalid(InvalidAuth)
//!                 ├─ unreachable  ──▶ Invalid(CannotConnect)
//!                 ├─ other        ──▶ Invalid(Unknown)
//!                 └─ ok           ──▶ Created(ConfigEntry)  (added to the store)
//! ```

pub mod flow;

pub use flow::{
    connect_mistral, validate_input, SetupError, SetupFlow, SetupForm, SetupInput, SetupOutcome,
};
