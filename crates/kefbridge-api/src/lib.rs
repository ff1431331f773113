//! Async client for the KEF wireless speaker HTTP control API.
//!
//! KEF's networked speakers (LSX, LS50 Wireless II, ...) expose a small
//! unauthenticated REST surface on port 50001: POST endpoints for actions
//! (power, volume, mute, source, transport) and GET endpoints for host and
//! player status. [`SpeakerClient`] wraps that surface with typed payloads:
//!
//! - Actions fail with [`Error::CommandFailed`] on transport errors or
//!   non-success statuses; volume and source are validated *before* any
//!   network call and reject bad input with [`Error::InvalidArgument`].
//! - Status queries fail with [`Error::QueryFailed`] / [`Error::Decode`],
//!   except [`SpeakerClient::status`], which deliberately swallows every
//!   failure and reports [`PowerState::Standby`] -- an unreachable speaker
//!   is indistinguishable from one that is off.
//!
//! The client holds no state beyond the target address; every call is an
//! independent request with no caching or retry.

pub mod client;
pub mod error;
pub mod model;

pub use client::SpeakerClient;
pub use error::Error;
pub use model::{HostStatus, PlayerStatus, PowerState, Source};
