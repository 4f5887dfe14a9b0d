// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dataset;
pub mod i18n;
pub mod model;
pub mod state;
pub mod views;

pub use dataset::*;
pub use model::*;
pub use state::*;
pub use views::*;
