//! Load-balancing domain models.
//!
//! | u-loadbalance | Manufacturing | Computing | Logistics |
//! |---------------|---------------|-----------|-----------|
//! | Task | Job | Batch job | Parcel |
//! | Processor | Identical machine | CPU core | Truck |

mod task;

pub use task::{Task, TaskSet};
