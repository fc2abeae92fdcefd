// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation middleware (route guard).

pub mod guard;

pub use guard::{resolve, Location, Navigation, Navigator, Resolution};
