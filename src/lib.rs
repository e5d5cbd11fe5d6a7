//! # codemap-site
//!
//! Infrastructure synthesis and landing-page interaction tooling for the
//! EHR code mapper's web presence.
//!
//! Two independent concerns live here, sharing only configuration and the
//! CLI:
//!
//! - **Infrastructure**: a typed resource graph declaring the product's
//!   vector storage (one vector bucket, one vector search index that
//!   depends on it) rendered as a CloudFormation-style manifest with two
//!   exported outputs.
//! - **Page engine**: a headless model of the marketing page's
//!   interactions (scroll reveal, anchor scrolling, nav restyle, card
//!   carousel, video overlay, hover feedback) as pure state transitions
//!   driven through an explicit event-binding table.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌───────────────┐   ┌──────────────────┐
//! │  config    │──▶│  stack/graph  │──▶│ template + synth │──▶ template.json
//! │  (TOML)    │   │ (resource DAG)│   │ (CloudFormation) │
//! └────────────┘   └───────────────┘   └──────────────────┘
//!       │
//!       │          ┌───────────────┐   ┌──────────────────┐
//!       └─────────▶│ dom/bindings  │──▶│ simulate / run   │──▶ effect log
//!                  │ (page engine) │   │ (event dispatch) │
//!                  └───────────────┘   └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cmsite validate                             # check the stack declaration
//! cmsite synth --output cdk.out/template.json # render the manifest
//! cmsite outputs                              # show exported values
//! cmsite page bindings                        # list the event table
//! cmsite page simulate --trace demos/landing-trace.json
//! cmsite page run --ticks 8                   # drive the carousel live
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`resource`] | Typed resource and output model |
//! | [`graph`] | Resource DAG with topological emission |
//! | [`stack`] | The code-mapping stack definition |
//! | [`template`] | Manifest rendering and digests |
//! | [`dom`] | Headless page model |
//! | [`events`] | Page events and effects |
//! | [`interactions`] | Interaction behaviors over explicit state |
//! | [`bindings`] | Event-binding table and dispatch |
//! | [`simulate`] | Trace replay |

pub mod bindings;
pub mod config;
pub mod dom;
pub mod events;
pub mod graph;
pub mod interactions;
pub mod live;
pub mod outputs;
pub mod report;
pub mod resource;
pub mod simulate;
pub mod stack;
pub mod synth;
pub mod template;
pub mod validate;
