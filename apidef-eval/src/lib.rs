//! Evaluation of apidef designs.
//!
//! Designs are written as nested builder calls against an [`Evaluator`]:
//!
//! ```
//! use apidef_eval::evaluate;
//! use apidef_expr::Primitive;
//!
//! let evaluation = evaluate(|ev| {
//!     ev.service("divider", |ev| {
//!         ev.error("invalid_arguments", ());
//!         ev.method("divide", |ev| {
//!             ev.payload_with((), |ev| {
//!                 ev.attribute("a", Primitive::Int);
//!                 ev.attribute("b", Primitive::Int);
//!             });
//!             ev.result(Primitive::Float64);
//!             ev.error("div_by_zero", ());
//!         });
//!     });
//! });
//!
//! assert!(!evaluation.has_errors());
//! ```
//!
//! Calls made where they do not belong (a `method` outside a `service`, a
//! `title` outside the `api`) are recorded as diagnostics and evaluation
//! carries on, so a single run reports every problem in the design.

mod args;
mod context;
mod dsl;
mod evaluator;

pub use args::AttributeArgs;
pub use context::Context;
pub use evaluator::{EvalState, Evaluation, Evaluator, PHASE, evaluate};
