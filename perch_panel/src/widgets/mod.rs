// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made configurations for common floating panels.

pub mod date_picker;
pub mod dropdown;
pub mod tooltip;
