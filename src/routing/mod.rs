//! Request routing.
//!
//! Routes pair a path pattern (`/users/:id`) with a method set and an
//! opaque handler name. The table matches in declaration order and the
//! first route that fits wins, so applications declare most-specific
//! routes first; the table never reorders or ranks patterns.

pub mod route;
pub mod table;

pub use route::{Route, Segment};
pub use table::{RouteMatch, RoutingTable};
