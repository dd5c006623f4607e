// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod column_select;
pub mod debounce;
pub mod dual_list;
pub mod forms;
pub mod ids;
pub mod model;
pub mod money;
pub mod query;
pub mod search;

pub use column_select::*;
pub use debounce::{Debounced, debounce};
pub use dual_list::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
